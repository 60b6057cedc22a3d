use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{booking, ride};
use crate::error::AppResult;
use crate::handlers::ride::DriverSummary;
use crate::services;
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub ride_id: Uuid,
    pub seats_booked: i32,
}

#[derive(Debug, Serialize)]
pub struct PassengerBookingResponse {
    #[serde(flatten)]
    pub booking: booking::Model,
    pub ride: Option<ride::Model>,
    pub driver: Option<DriverSummary>,
}

#[derive(Debug, Serialize)]
pub struct RideManifestEntry {
    pub booking_id: Uuid,
    pub passenger_id: Uuid,
    pub passenger_name: String,
    pub seats_booked: i32,
    pub total_price: f64,
    pub booking_status: booking::BookingStatus,
}

/// Book seats on a ride. The total price is computed server-side from the
/// ride's current price per seat.
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<booking::Model>> {
    let booking = services::booking::create_booking(
        state.db.as_ref(),
        claims.sub,
        payload.ride_id,
        payload.seats_booked,
    )
    .await?;
    Ok(Json(booking))
}

/// Cancel one of the logged-in passenger's bookings
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    services::booking::cancel_booking(state.db.as_ref(), claims.sub, booking_id).await?;
    Ok(Json(serde_json::json!({ "message": "Booking cancelled" })))
}

/// The logged-in passenger's bookings with ride and driver details
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<PassengerBookingResponse>>> {
    let rows = services::booking::get_bookings_by_passenger(state.db.as_ref(), claims.sub).await?;

    let responses = rows
        .into_iter()
        .map(|row| PassengerBookingResponse {
            booking: row.booking,
            ride: row.ride,
            driver: row.driver.map(|d| DriverSummary {
                id: d.id,
                name: d.name,
                rating: d.rating,
                profile_picture_url: d.profile_picture_url,
            }),
        })
        .collect();

    Ok(Json(responses))
}

/// Passenger manifest for one of the driver's rides
pub async fn ride_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(ride_id): Path<Uuid>,
) -> AppResult<Json<Vec<RideManifestEntry>>> {
    let rows = services::booking::get_bookings_by_ride(state.db.as_ref(), claims.sub, ride_id).await?;

    let entries = rows
        .into_iter()
        .map(|(b, passenger)| RideManifestEntry {
            booking_id: b.id,
            passenger_id: b.passenger_id,
            passenger_name: passenger.map(|p| p.name).unwrap_or_default(),
            seats_booked: b.seats_booked,
            total_price: b.total_price,
            booking_status: b.booking_status,
        })
        .collect();

    Ok(Json(entries))
}
