use sea_orm::{Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Open the Postgres pool the ride and booking services run against. The
/// connection is verified with a ping before migrations touch it.
pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::Internal(format!("could not reach the rideshare database: {}", e)))?;

    db.ping()
        .await
        .map_err(|e| AppError::Internal(format!("database ping failed: {}", e)))?;

    Ok(db)
}
