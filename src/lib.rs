pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use config::Config;
pub use error::{AppError, AppResult};

// The connection lives behind an Arc: the router and the auth middleware
// each hold their own copy of the state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloneable<T: Clone>() {}

    #[test]
    fn app_state_clones_for_router_and_middleware() {
        cloneable::<AppState>();
    }
}
