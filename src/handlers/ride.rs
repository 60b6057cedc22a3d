use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::ride::{self, RideStatus, VehicleType};
use crate::error::AppResult;
use crate::services;
use crate::services::ride::{CreateRide, RideDeletion};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PublishRideRequest {
    pub pickup_address: String,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub drop_address: String,
    pub drop_latitude: Option<f64>,
    pub drop_longitude: Option<f64>,
    pub departure_date: NaiveDate,
    pub departure_time: String,
    pub expected_drop_time: Option<DateTime<Utc>>,
    pub total_seats: i32,
    pub vehicle_type: VehicleType,
    pub price_per_seat: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRideStatusRequest {
    pub status: RideStatus,
}

#[derive(Debug, Serialize)]
pub struct DriverSummary {
    pub id: Uuid,
    pub name: String,
    pub rating: f64,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchRideResponse {
    #[serde(flatten)]
    pub ride: ride::Model,
    pub driver: Option<DriverSummary>,
}

/// Publish a ride offer
pub async fn publish_ride(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PublishRideRequest>,
) -> AppResult<Json<ride::Model>> {
    let data = CreateRide {
        pickup_address: payload.pickup_address,
        pickup_latitude: payload.pickup_latitude,
        pickup_longitude: payload.pickup_longitude,
        drop_address: payload.drop_address,
        drop_latitude: payload.drop_latitude,
        drop_longitude: payload.drop_longitude,
        departure_date: payload.departure_date,
        departure_time: payload.departure_time,
        expected_drop_time: payload.expected_drop_time,
        total_seats: payload.total_seats,
        vehicle_type: payload.vehicle_type,
        price_per_seat: payload.price_per_seat,
        description: payload.description,
    };

    let ride =
        services::ride::create_ride(state.db.as_ref(), &state.config, claims.sub, data).await?;
    Ok(Json(ride))
}

/// Search rides open for booking
pub async fn search_rides(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SearchRideResponse>>> {
    let rides = services::ride::get_available_rides(state.db.as_ref()).await?;

    let responses = rides
        .into_iter()
        .map(|(ride, driver)| SearchRideResponse {
            ride,
            driver: driver.map(|d| DriverSummary {
                id: d.id,
                name: d.name,
                rating: d.rating,
                profile_picture_url: d.profile_picture_url,
            }),
        })
        .collect();

    Ok(Json(responses))
}

/// Rides published by the logged-in driver
pub async fn my_rides(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<ride::Model>>> {
    let rides = services::ride::get_rides_by_driver(state.db.as_ref(), claims.sub).await?;
    Ok(Json(rides))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(ride_id): Path<Uuid>,
    Json(payload): Json<UpdateRideStatusRequest>,
) -> AppResult<Json<ride::Model>> {
    let ride =
        services::ride::update_ride_status(state.db.as_ref(), claims.sub, ride_id, payload.status)
            .await?;
    Ok(Json(ride))
}

pub async fn delete_ride(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(ride_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = services::ride::delete_ride(state.db.as_ref(), claims.sub, ride_id).await?;

    let message = match outcome {
        RideDeletion::Deleted => "Ride deleted",
        RideDeletion::Cancelled => "Ride has bookings and was cancelled instead",
    };
    Ok(Json(serde_json::json!({ "message": message })))
}
