use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::ride::{self, RideStatus};
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::services::message::{self, ConfirmationDetails};

/// A passenger's booking joined with its ride and the ride's driver.
#[derive(Debug, Clone)]
pub struct PassengerBooking {
    pub booking: booking::Model,
    pub ride: Option<ride::Model>,
    pub driver: Option<user::Model>,
}

/// Book seats on a ride.
///
/// The read-time checks give precise errors, but enforcement does not rest on
/// them: seats are taken with a conditional decrement that re-verifies
/// availability at write time, and the unique (ride, passenger) index catches
/// racing duplicate inserts. A previously cancelled booking for the pair is
/// revived in place rather than re-inserted, conditionally on it still being
/// cancelled when the update lands.
pub async fn create_booking(
    db: &DatabaseConnection,
    passenger_id: Uuid,
    ride_id: Uuid,
    seats_booked: i32,
) -> AppResult<booking::Model> {
    if seats_booked < 1 {
        return Err(AppError::Validation(
            "must book at least one seat".to_string(),
        ));
    }

    let ride = ride::Entity::find_by_id(ride_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

    if ride.available_seats < seats_booked {
        return Err(AppError::InsufficientSeats {
            available: ride.available_seats,
        });
    }
    if ride.status != RideStatus::Available {
        return Err(AppError::RideUnavailable);
    }

    // Frozen at booking time; later price edits never touch existing bookings.
    let total_price = seats_booked as f64 * ride.price_per_seat;

    // Display name only; booking must not fail because the profile read did.
    let passenger = match user::Entity::find_by_id(passenger_id).one(db).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(%passenger_id, error = %e, "passenger profile read failed");
            None
        }
    };

    let existing = booking::Entity::find()
        .filter(booking::Column::RideId.eq(ride_id))
        .filter(booking::Column::PassengerId.eq(passenger_id))
        .one(db)
        .await?;

    if let Some(b) = &existing {
        if b.booking_status != BookingStatus::Cancelled {
            return Err(AppError::DuplicateBooking);
        }
    }

    // Reserve seats before writing the booking; a failed booking write is
    // compensated below, so the counter can never undercount confirmed seats.
    reserve_seats(db, ride_id, seats_booked).await?;

    let now = Utc::now();
    let written = match existing {
        Some(prev) => revive_cancelled(db, &prev, seats_booked, total_price, now).await,
        None => booking::ActiveModel {
            id: Set(Uuid::new_v4()),
            ride_id: Set(ride_id),
            passenger_id: Set(passenger_id),
            seats_booked: Set(seats_booked),
            total_price: Set(total_price),
            booking_status: Set(BookingStatus::Confirmed),
            booked_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await,
    };

    let booked = match written {
        Ok(b) => b,
        Err(e) => {
            if let Err(re) = release_seats(db, ride_id, seats_booked).await {
                tracing::error!(
                    %ride_id,
                    error = %re,
                    "seat compensation failed after booking write error"
                );
            }
            // A racing insert for the same pair lands on the unique index;
            // a racing rebook flips the cancelled row first and leaves
            // nothing to update. Both read as an existing booking.
            if matches!(e, DbErr::RecordNotUpdated) || unique_violation(e.sql_err()) {
                return Err(AppError::DuplicateBooking);
            }
            return Err(e.into());
        }
    };

    notify_driver(db, &ride, &booked, passenger.as_ref()).await;

    tracing::info!(
        booking_id = %booked.id,
        %ride_id,
        %passenger_id,
        seats_booked,
        "booking confirmed"
    );
    Ok(booked)
}

/// Rebook by flipping the cancelled row back to confirmed, but only if it is
/// still cancelled at write time. Losing that condition means another rebook
/// for the same pair got there first; it surfaces as `RecordNotUpdated` so
/// the caller compensates the seats it reserved.
async fn revive_cancelled(
    db: &DatabaseConnection,
    prev: &booking::Model,
    seats_booked: i32,
    total_price: f64,
    now: DateTime<Utc>,
) -> Result<booking::Model, DbErr> {
    let res = booking::Entity::update_many()
        .col_expr(booking::Column::SeatsBooked, Expr::value(seats_booked))
        .col_expr(booking::Column::TotalPrice, Expr::value(total_price))
        .col_expr(
            booking::Column::BookingStatus,
            Expr::value(BookingStatus::Confirmed),
        )
        .col_expr(booking::Column::BookedAt, Expr::value(now))
        .col_expr(booking::Column::UpdatedAt, Expr::value(now))
        .filter(booking::Column::Id.eq(prev.id))
        .filter(booking::Column::BookingStatus.eq(BookingStatus::Cancelled))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        return Err(DbErr::RecordNotUpdated);
    }

    Ok(booking::Model {
        id: prev.id,
        ride_id: prev.ride_id,
        passenger_id: prev.passenger_id,
        seats_booked,
        total_price,
        booking_status: BookingStatus::Confirmed,
        booked_at: now.into(),
        updated_at: now.into(),
    })
}

fn unique_violation(e: Option<SqlErr>) -> bool {
    matches!(e, Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Take `seats` from the ride with a single conditional update: it succeeds
/// only if the ride is still open for booking and has the seats at write
/// time, which is what makes concurrent bookings of the last seat safe.
async fn reserve_seats(db: &DatabaseConnection, ride_id: Uuid, seats: i32) -> AppResult<()> {
    let res = ride::Entity::update_many()
        .col_expr(
            ride::Column::AvailableSeats,
            Expr::col(ride::Column::AvailableSeats).sub(seats),
        )
        .col_expr(ride::Column::UpdatedAt, Expr::current_timestamp().into())
        .filter(ride::Column::Id.eq(ride_id))
        .filter(ride::Column::Status.eq(RideStatus::Available))
        .filter(ride::Column::AvailableSeats.gte(seats))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        // Precondition lost between read and write; re-read once to classify.
        let ride = ride::Entity::find_by_id(ride_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;
        if ride.status != RideStatus::Available {
            return Err(AppError::RideUnavailable);
        }
        return Err(AppError::InsufficientSeats {
            available: ride.available_seats,
        });
    }

    Ok(())
}

/// Give `seats` back, capped at the ride's total so a stray double release
/// cannot inflate the counter.
async fn release_seats(db: &DatabaseConnection, ride_id: Uuid, seats: i32) -> AppResult<()> {
    let res = ride::Entity::update_many()
        .col_expr(
            ride::Column::AvailableSeats,
            Expr::col(ride::Column::AvailableSeats).add(seats),
        )
        .col_expr(ride::Column::UpdatedAt, Expr::current_timestamp().into())
        .filter(ride::Column::Id.eq(ride_id))
        .filter(
            Expr::col(ride::Column::AvailableSeats)
                .lte(Expr::col(ride::Column::TotalSeats).sub(seats)),
        )
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        tracing::warn!(
            %ride_id,
            seats,
            "seat release skipped: ride missing or counter already at capacity"
        );
    }

    Ok(())
}

async fn notify_driver(
    db: &DatabaseConnection,
    ride: &ride::Model,
    booked: &booking::Model,
    passenger: Option<&user::Model>,
) {
    let passenger_name = passenger
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "A passenger".to_string());

    let driver_name = match user::Entity::find_by_id(ride.driver_id).one(db).await {
        Ok(Some(d)) => d.name,
        Ok(None) => "there".to_string(),
        Err(e) => {
            tracing::warn!(driver_id = %ride.driver_id, error = %e, "driver profile read failed");
            "there".to_string()
        }
    };

    let details = ConfirmationDetails {
        pickup_address: ride.pickup_address.clone(),
        drop_address: ride.drop_address.clone(),
        pickup_time: ride.pickup_time.with_timezone(&Utc),
        vehicle_type: ride.vehicle_type,
        seats_booked: booked.seats_booked,
        total_price: booked.total_price,
    };

    if let Err(e) = message::send_booking_confirmation(
        db,
        ride.id,
        booked.passenger_id,
        ride.driver_id,
        &passenger_name,
        &driver_name,
        &details,
    )
    .await
    {
        // The seats are reserved and the booking row exists; losing the chat
        // message is the lesser failure.
        tracing::warn!(booking_id = %booked.id, error = %e, "confirmation message failed");
    }
}

/// Cancel a booking and give its seats back. The status flip is conditional,
/// so a doubled cancel request releases seats only once.
pub async fn cancel_booking(
    db: &DatabaseConnection,
    passenger_id: Uuid,
    booking_id: Uuid,
) -> AppResult<()> {
    let booked = booking::Entity::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booked.passenger_id != passenger_id {
        return Err(AppError::Forbidden(
            "you can only cancel your own bookings".to_string(),
        ));
    }

    match booked.booking_status {
        BookingStatus::Cancelled => {
            return Err(AppError::Validation(
                "booking is already cancelled".to_string(),
            ));
        }
        BookingStatus::Completed => {
            return Err(AppError::Validation(
                "completed bookings cannot be cancelled".to_string(),
            ));
        }
        BookingStatus::Pending | BookingStatus::Confirmed => {}
    }

    let res = booking::Entity::update_many()
        .col_expr(
            booking::Column::BookingStatus,
            Expr::value(BookingStatus::Cancelled),
        )
        .col_expr(booking::Column::UpdatedAt, Expr::current_timestamp().into())
        .filter(booking::Column::Id.eq(booking_id))
        .filter(booking::Column::BookingStatus.is_in([BookingStatus::Pending, BookingStatus::Confirmed]))
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        return Err(AppError::Validation(
            "booking is already cancelled".to_string(),
        ));
    }

    release_seats(db, booked.ride_id, booked.seats_booked).await?;

    tracing::info!(%booking_id, ride_id = %booked.ride_id, "booking cancelled");
    Ok(())
}

/// A passenger's bookings joined with ride and driver, newest first.
pub async fn get_bookings_by_passenger(
    db: &DatabaseConnection,
    passenger_id: Uuid,
) -> AppResult<Vec<PassengerBooking>> {
    let rows = booking::Entity::find()
        .filter(booking::Column::PassengerId.eq(passenger_id))
        .order_by_desc(booking::Column::BookedAt)
        .find_also_related(ride::Entity)
        .all(db)
        .await?;

    let driver_ids: Vec<Uuid> = rows
        .iter()
        .filter_map(|(_, r)| r.as_ref().map(|r| r.driver_id))
        .collect();

    let drivers = if driver_ids.is_empty() {
        Vec::new()
    } else {
        user::Entity::find()
            .filter(user::Column::Id.is_in(driver_ids))
            .all(db)
            .await?
    };

    Ok(rows
        .into_iter()
        .map(|(b, r)| {
            let driver = r
                .as_ref()
                .and_then(|r| drivers.iter().find(|d| d.id == r.driver_id).cloned());
            PassengerBooking {
                booking: b,
                ride: r,
                driver,
            }
        })
        .collect())
}

/// Bookings on a ride with the passenger attached, for the driver's
/// manifest. Only the ride's owner may see it.
pub async fn get_bookings_by_ride(
    db: &DatabaseConnection,
    driver_id: Uuid,
    ride_id: Uuid,
) -> AppResult<Vec<(booking::Model, Option<user::Model>)>> {
    let ride = ride::Entity::find_by_id(ride_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

    if ride.driver_id != driver_id {
        return Err(AppError::Forbidden(
            "you can only view bookings for your own rides".to_string(),
        ));
    }

    let rows = booking::Entity::find()
        .filter(booking::Column::RideId.eq(ride_id))
        .order_by_asc(booking::Column::BookedAt)
        .find_also_related(user::Entity)
        .all(db)
        .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::message::{self as message_entity, MessageType};
    use crate::entities::ride::VehicleType;
    use chrono::{DateTime, TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn ride_model(available: i32, total: i32, price: f64, status: RideStatus) -> ride::Model {
        ride::Model {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            pickup_address: "Andheri West".to_string(),
            pickup_latitude: None,
            pickup_longitude: None,
            drop_address: "Bandra East".to_string(),
            drop_latitude: None,
            drop_longitude: None,
            pickup_time: departure().into(),
            expected_drop_time: None,
            total_seats: total,
            available_seats: available,
            vehicle_type: VehicleType::Car,
            price_per_seat: price,
            description: None,
            status,
            created_at: departure().into(),
            updated_at: departure().into(),
        }
    }

    fn user_model(name: &str) -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "x".to_string(),
            name: name.to_string(),
            phone_number: None,
            profile_picture_url: None,
            rating: 5.0,
            total_rides: 0,
            is_verified: false,
            created_at: departure().into(),
            updated_at: departure().into(),
        }
    }

    fn booking_model(
        ride_id: Uuid,
        passenger_id: Uuid,
        seats: i32,
        price: f64,
        status: BookingStatus,
    ) -> booking::Model {
        booking::Model {
            id: Uuid::new_v4(),
            ride_id,
            passenger_id,
            seats_booked: seats,
            total_price: price,
            booking_status: status,
            booked_at: departure().into(),
            updated_at: departure().into(),
        }
    }

    fn message_model(ride_id: Uuid, sender: Uuid, receiver: Uuid) -> message_entity::Model {
        message_entity::Model {
            id: Uuid::new_v4(),
            ride_id,
            sender_id: sender,
            receiver_id: receiver,
            body: "hello".to_string(),
            message_type: MessageType::Text,
            is_read: false,
            sent_at: departure().into(),
        }
    }

    fn reserved() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn booking_freezes_price_and_decrements_seats() {
        let ride = ride_model(4, 4, 100.0, RideStatus::Available);
        let passenger = user_model("Asha");
        let driver = user_model("Ravi");
        let created = booking_model(ride.id, passenger.id, 3, 300.0, BookingStatus::Confirmed);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .append_query_results([vec![passenger.clone()]])
            .append_query_results([Vec::<booking::Model>::new()])
            .append_exec_results([reserved()])
            .append_query_results([vec![created.clone()]])
            .append_query_results([vec![driver]])
            .append_query_results([vec![message_model(ride.id, passenger.id, ride.driver_id)]])
            .into_connection();

        let booked = create_booking(&db, passenger.id, ride.id, 3).await.unwrap();
        assert_eq!(booked.seats_booked, 3);
        assert_eq!(booked.total_price, 300.0);
        assert_eq!(booked.booking_status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn booking_more_seats_than_remain_fails() {
        // 3 of 4 seats already taken; asking for 2 must fail citing the 1 left
        let ride = ride_model(1, 4, 100.0, RideStatus::Available);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .into_connection();

        let err = create_booking(&db, Uuid::new_v4(), ride.id, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientSeats { available: 1 }));
    }

    #[tokio::test]
    async fn booking_a_cancelled_ride_fails() {
        let ride = ride_model(4, 4, 100.0, RideStatus::Cancelled);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .into_connection();

        let err = create_booking(&db, Uuid::new_v4(), ride.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RideUnavailable));
    }

    #[tokio::test]
    async fn active_booking_for_the_same_ride_is_rejected() {
        let ride = ride_model(4, 4, 100.0, RideStatus::Available);
        let passenger = user_model("Asha");
        let active = booking_model(ride.id, passenger.id, 1, 100.0, BookingStatus::Confirmed);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .append_query_results([vec![passenger.clone()]])
            .append_query_results([vec![active]])
            .into_connection();

        let err = create_booking(&db, passenger.id, ride.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateBooking));
    }

    #[tokio::test]
    async fn rebooking_after_cancel_reuses_the_same_row() {
        let ride = ride_model(4, 4, 100.0, RideStatus::Available);
        let passenger = user_model("Asha");
        let driver = user_model("Ravi");

        let cancelled = booking_model(ride.id, passenger.id, 1, 100.0, BookingStatus::Cancelled);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .append_query_results([vec![passenger.clone()]])
            .append_query_results([vec![cancelled.clone()]])
            .append_exec_results([reserved(), reserved()])
            .append_query_results([vec![driver]])
            .append_query_results([vec![message_model(ride.id, passenger.id, ride.driver_id)]])
            .into_connection();

        let booked = create_booking(&db, passenger.id, ride.id, 2).await.unwrap();
        assert_eq!(booked.id, cancelled.id);
        assert_eq!(booked.seats_booked, 2);
        assert_eq!(booked.total_price, 200.0);
        assert_eq!(booked.booking_status, BookingStatus::Confirmed);
    }

    fn release_count(log: &[sea_orm::Transaction]) -> usize {
        log.iter()
            .flat_map(|t| t.statements())
            .filter(|s| s.sql.contains(r#""available_seats" = "available_seats" + "#))
            .count()
    }

    #[tokio::test]
    async fn racing_rebooks_confirm_only_one_and_give_seats_back() {
        // Both devices read the cancelled row; the loser's revive matches
        // nothing and its reserved seats must come back.
        let ride = ride_model(4, 4, 100.0, RideStatus::Available);
        let passenger = user_model("Asha");
        let cancelled = booking_model(ride.id, passenger.id, 1, 100.0, BookingStatus::Cancelled);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .append_query_results([vec![passenger.clone()]])
            .append_query_results([vec![cancelled.clone()]])
            .append_exec_results([
                reserved(),
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                reserved(),
            ])
            .into_connection();

        let err = create_booking(&db, passenger.id, ride.id, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateBooking));

        let log = db.into_transaction_log();
        assert_eq!(release_count(&log), 1);
    }

    #[tokio::test]
    async fn failed_booking_write_gives_the_seats_back() {
        let ride = ride_model(4, 4, 100.0, RideStatus::Available);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .append_query_results([vec![user_model("Asha")]])
            .append_query_results([Vec::<booking::Model>::new()])
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .append_exec_results([reserved(), reserved()])
            .into_connection();

        let err = create_booking(&db, Uuid::new_v4(), ride.id, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));

        let log = db.into_transaction_log();
        assert_eq!(release_count(&log), 1);
    }

    #[test]
    fn only_unique_index_collisions_read_as_duplicates() {
        assert!(unique_violation(Some(SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"ux_booking_ride_passenger\""
                .to_string(),
        ))));
        assert!(!unique_violation(Some(
            SqlErr::ForeignKeyConstraintViolation("fk_booking_ride".to_string())
        )));
        assert!(!unique_violation(None));
    }

    #[tokio::test]
    async fn lost_seat_race_is_reported_from_the_write_time_recheck() {
        // The stale read still shows a seat, but the conditional decrement
        // finds none left and the re-read classifies the failure.
        let ride = ride_model(1, 4, 100.0, RideStatus::Available);
        let mut drained = ride.clone();
        drained.available_seats = 0;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ride.clone()]])
            .append_query_results([vec![user_model("Asha")]])
            .append_query_results([Vec::<booking::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![drained]])
            .into_connection();

        let err = create_booking(&db, Uuid::new_v4(), ride.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientSeats { available: 0 }));
    }

    #[tokio::test]
    async fn zero_seat_requests_are_rejected_before_any_read() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = create_booking(&db, Uuid::new_v4(), Uuid::new_v4(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn cancelling_releases_seats_once() {
        let ride = ride_model(2, 4, 100.0, RideStatus::Available);
        let passenger_id = Uuid::new_v4();
        let booked = booking_model(ride.id, passenger_id, 2, 200.0, BookingStatus::Confirmed);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booked.clone()]])
            .append_exec_results([reserved(), reserved()])
            .into_connection();

        cancel_booking(&db, passenger_id, booked.id).await.unwrap();
    }

    #[tokio::test]
    async fn cancelling_someone_elses_booking_is_forbidden() {
        let booked = booking_model(
            Uuid::new_v4(),
            Uuid::new_v4(),
            1,
            100.0,
            BookingStatus::Confirmed,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booked.clone()]])
            .into_connection();

        let err = cancel_booking(&db, Uuid::new_v4(), booked.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn cancelling_twice_fails_the_second_time() {
        let passenger_id = Uuid::new_v4();
        let booked = booking_model(
            Uuid::new_v4(),
            passenger_id,
            1,
            100.0,
            BookingStatus::Cancelled,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booked.clone()]])
            .into_connection();

        let err = cancel_booking(&db, passenger_id, booked.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn passenger_bookings_come_back_joined_with_ride_and_driver() {
        let driver = user_model("Ravi");
        let mut ride = ride_model(2, 4, 100.0, RideStatus::Available);
        ride.driver_id = driver.id;
        let passenger_id = Uuid::new_v4();
        let booked = booking_model(ride.id, passenger_id, 2, 200.0, BookingStatus::Confirmed);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![(booked.clone(), ride.clone())]])
            .append_query_results([vec![driver.clone()]])
            .into_connection();

        let rows = get_bookings_by_passenger(&db, passenger_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].booking.id, booked.id);
        assert_eq!(rows[0].ride.as_ref().unwrap().id, ride.id);
        assert_eq!(rows[0].driver.as_ref().unwrap().name, "Ravi");
    }
}
