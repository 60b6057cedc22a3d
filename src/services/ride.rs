use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::config::Config;
use crate::entities::ride::{self, RideStatus, VehicleType};
use crate::entities::{booking, user};
use crate::error::{AppError, AppResult};
use crate::services::conflict;

#[derive(Debug, Clone)]
pub struct CreateRide {
    pub pickup_address: String,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub drop_address: String,
    pub drop_latitude: Option<f64>,
    pub drop_longitude: Option<f64>,
    pub departure_date: NaiveDate,
    /// Wall-clock departure time, zero-padded 24-hour "HH:MM".
    pub departure_time: String,
    pub expected_drop_time: Option<DateTime<Utc>>,
    pub total_seats: i32,
    pub vehicle_type: VehicleType,
    /// Form input, parsed and validated here.
    pub price_per_seat: String,
    pub description: Option<String>,
}

/// Outcome of a delete request: rides with bookings are only soft-cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideDeletion {
    Deleted,
    Cancelled,
}

pub(crate) fn combine_date_and_time(date: NaiveDate, time: &str) -> AppResult<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::Validation("departure time must be in HH:MM format".to_string()))?;
    Ok(date.and_time(time).and_utc())
}

fn validate(data: &CreateRide) -> AppResult<f64> {
    if data.pickup_address.trim().is_empty() {
        return Err(AppError::Validation("pickup address is required".to_string()));
    }
    if data.drop_address.trim().is_empty() {
        return Err(AppError::Validation("drop address is required".to_string()));
    }
    if data.total_seats < 1 {
        return Err(AppError::Validation(
            "at least one seat must be offered".to_string(),
        ));
    }
    let price: f64 = data
        .price_per_seat
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("price per seat must be a number".to_string()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(
            "price per seat must be non-negative".to_string(),
        ));
    }
    Ok(price)
}

fn format_conflict_time(time: &sea_orm::prelude::DateTimeWithTimeZone) -> String {
    time.with_timezone(&Utc)
        .format("%a, %b %-d, %Y at %I:%M %p")
        .to_string()
}

/// Publish a ride. The departure date and wall-clock time arrive as separate
/// selections and are combined into one absolute timestamp before the
/// driver's schedule is checked for overlap.
pub async fn create_ride(
    db: &DatabaseConnection,
    config: &Config,
    driver_id: Uuid,
    data: CreateRide,
) -> AppResult<ride::Model> {
    let price = validate(&data)?;
    let pickup_time = combine_date_and_time(data.departure_date, &data.departure_time)?;

    if let Some(conflicting) = conflict::check_time_conflict(
        db,
        driver_id,
        pickup_time,
        config.default_ride_duration_hours,
    )
    .await
    {
        return Err(AppError::ScheduleConflict {
            ride_id: conflicting.id,
            pickup_address: conflicting.pickup_address,
            drop_address: conflicting.drop_address,
            pickup_time: format_conflict_time(&conflicting.pickup_time),
        });
    }

    let now = Utc::now();
    let new_ride = ride::ActiveModel {
        id: Set(Uuid::new_v4()),
        driver_id: Set(driver_id),
        pickup_address: Set(data.pickup_address.trim().to_string()),
        pickup_latitude: Set(data.pickup_latitude),
        pickup_longitude: Set(data.pickup_longitude),
        drop_address: Set(data.drop_address.trim().to_string()),
        drop_latitude: Set(data.drop_latitude),
        drop_longitude: Set(data.drop_longitude),
        pickup_time: Set(pickup_time.into()),
        expected_drop_time: Set(data.expected_drop_time.map(Into::into)),
        total_seats: Set(data.total_seats),
        available_seats: Set(data.total_seats),
        vehicle_type: Set(data.vehicle_type),
        price_per_seat: Set(price),
        description: Set(data.description),
        status: Set(RideStatus::Available),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let ride = new_ride.insert(db).await?;
    tracing::info!(ride_id = %ride.id, %driver_id, "ride published");
    Ok(ride)
}

/// Rides owned by a driver, soonest departure first.
pub async fn get_rides_by_driver(
    db: &DatabaseConnection,
    driver_id: Uuid,
) -> AppResult<Vec<ride::Model>> {
    let rides = ride::Entity::find()
        .filter(ride::Column::DriverId.eq(driver_id))
        .order_by_asc(ride::Column::PickupTime)
        .all(db)
        .await?;
    Ok(rides)
}

/// Rides open for booking (available status with seats left), joined with
/// their driver for the search results.
pub async fn get_available_rides(
    db: &DatabaseConnection,
) -> AppResult<Vec<(ride::Model, Option<user::Model>)>> {
    let rides = ride::Entity::find()
        .filter(ride::Column::Status.eq(RideStatus::Available))
        .filter(ride::Column::AvailableSeats.gt(0))
        .order_by_asc(ride::Column::PickupTime)
        .find_also_related(user::Entity)
        .all(db)
        .await?;
    Ok(rides)
}

pub async fn update_ride_status(
    db: &DatabaseConnection,
    driver_id: Uuid,
    ride_id: Uuid,
    status: RideStatus,
) -> AppResult<ride::Model> {
    let ride = ride::Entity::find_by_id(ride_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

    if ride.driver_id != driver_id {
        return Err(AppError::Forbidden(
            "you can only update your own rides".to_string(),
        ));
    }

    let mut active: ride::ActiveModel = ride.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(db).await?)
}

/// Remove a ride from the driver's schedule. A ride that bookings still
/// reference is soft-cancelled instead of deleted, so booking history keeps
/// a valid row to point at.
pub async fn delete_ride(
    db: &DatabaseConnection,
    driver_id: Uuid,
    ride_id: Uuid,
) -> AppResult<RideDeletion> {
    let ride = ride::Entity::find_by_id(ride_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

    if ride.driver_id != driver_id {
        return Err(AppError::Forbidden(
            "you can only delete your own rides".to_string(),
        ));
    }

    let referenced = booking::Entity::find()
        .filter(booking::Column::RideId.eq(ride_id))
        .count(db)
        .await?;

    if referenced > 0 {
        let mut active: ride::ActiveModel = ride.into();
        active.status = Set(RideStatus::Cancelled);
        active.updated_at = Set(Utc::now().into());
        active.update(db).await?;
        return Ok(RideDeletion::Cancelled);
    }

    ride::Entity::delete_by_id(ride_id).exec(db).await?;
    Ok(RideDeletion::Deleted)
}
