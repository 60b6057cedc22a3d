use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, booking, message, ride};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Everything else requires a valid bearer token
    let api_routes = Router::new()
        // Rides
        .route("/rides", get(ride::search_rides).post(ride::publish_ride))
        .route("/rides/mine", get(ride::my_rides))
        .route("/rides/{id}/status", put(ride::update_status))
        .route("/rides/{id}", delete(ride::delete_ride))
        .route("/rides/{id}/bookings", get(booking::ride_bookings))
        // Bookings
        .route("/bookings", post(booking::create_booking).get(booking::my_bookings))
        .route("/bookings/{id}", delete(booking::cancel_booking))
        // Messages
        .route(
            "/rides/{id}/messages",
            get(message::ride_messages).post(message::send_message),
        )
        .route("/messages", get(message::my_conversations))
        .route("/messages/{id}/read", put(message::mark_read))
        // Profile
        .route("/profile", get(auth::profile).put(auth::update_profile))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes)
        .with_state(state)
}
