use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::ride::{self, RideStatus};

/// Conflict window of an existing ride: `[pickup_time, end)`, where the end
/// falls back to `pickup_time + default_duration` when the driver gave no
/// expected drop time.
pub fn ride_window(
    ride: &ride::Model,
    default_duration: Duration,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = ride.pickup_time.with_timezone(&Utc);
    let end = match ride.expected_drop_time {
        Some(t) => t.with_timezone(&Utc),
        None => start + default_duration,
    };
    (start, end)
}

/// Half-open interval overlap. Touching endpoints do not overlap, so a ride
/// ending at 12:00 never conflicts with one starting at 12:00.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Scan the driver's schedule for a ride whose conflict window overlaps the
/// proposed `[start, start + duration_hours)` window. Cancelled and completed
/// rides cannot conflict. Returns the first overlapping ride found.
///
/// Fails open: when the ride fetch errors, the failure is logged and no
/// conflict is reported rather than blocking publication.
pub async fn check_time_conflict(
    db: &DatabaseConnection,
    driver_id: Uuid,
    proposed_start: DateTime<Utc>,
    duration_hours: i64,
) -> Option<ride::Model> {
    let rides = match ride::Entity::find()
        .filter(ride::Column::DriverId.eq(driver_id))
        .all(db)
        .await
    {
        Ok(rides) => rides,
        Err(e) => {
            tracing::warn!(
                %driver_id,
                error = %e,
                "conflict check skipped: could not fetch driver rides"
            );
            return None;
        }
    };

    let duration = Duration::hours(duration_hours);
    let proposed_end = proposed_start + duration;

    rides.into_iter().find(|r| {
        if r.status != RideStatus::Available && r.status != RideStatus::Active {
            return false;
        }
        let (start, end) = ride_window(r, duration);
        windows_overlap(proposed_start, proposed_end, start, end)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ride::VehicleType;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    fn ride_at(
        start: DateTime<Utc>,
        drop_time: Option<DateTime<Utc>>,
        status: RideStatus,
    ) -> ride::Model {
        ride::Model {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            pickup_address: "Andheri".to_string(),
            pickup_latitude: None,
            pickup_longitude: None,
            drop_address: "Bandra".to_string(),
            drop_latitude: None,
            drop_longitude: None,
            pickup_time: start.into(),
            expected_drop_time: drop_time.map(Into::into),
            total_seats: 4,
            available_seats: 4,
            vehicle_type: VehicleType::Car,
            price_per_seat: 100.0,
            description: None,
            status,
            created_at: start.into(),
            updated_at: start.into(),
        }
    }

    #[test]
    fn overlapping_windows_conflict() {
        assert!(windows_overlap(at(10, 0), at(12, 0), at(11, 0), at(13, 0)));
        assert!(windows_overlap(at(11, 0), at(13, 0), at(10, 0), at(12, 0)));
        // proposed contains existing
        assert!(windows_overlap(at(9, 0), at(14, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn abutting_windows_do_not_conflict() {
        assert!(!windows_overlap(at(10, 0), at(12, 0), at(12, 0), at(14, 0)));
        assert!(!windows_overlap(at(12, 0), at(14, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn window_falls_back_to_default_duration() {
        let r = ride_at(at(9, 0), None, RideStatus::Available);
        let (start, end) = ride_window(&r, Duration::hours(2));
        assert_eq!(start, at(9, 0));
        assert_eq!(end, at(11, 0));

        let r = ride_at(at(9, 0), Some(at(10, 30)), RideStatus::Available);
        let (_, end) = ride_window(&r, Duration::hours(2));
        assert_eq!(end, at(10, 30));
    }

    #[tokio::test]
    async fn finds_overlap_against_scheduled_ride() {
        let existing = ride_at(at(9, 0), Some(at(11, 0)), RideStatus::Available);
        let driver_id = existing.driver_id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .append_query_results([vec![existing.clone()]])
            .into_connection();

        let conflict = check_time_conflict(&db, driver_id, at(10, 30), 2).await;
        assert_eq!(conflict.map(|r| r.id), Some(existing.id));

        // 11:00 start abuts the 11:00 drop, so it must pass
        let conflict = check_time_conflict(&db, driver_id, at(11, 0), 2).await;
        assert!(conflict.is_none());
    }

    #[tokio::test]
    async fn cancelled_rides_cannot_conflict() {
        let existing = ride_at(at(9, 0), Some(at(11, 0)), RideStatus::Cancelled);
        let driver_id = existing.driver_id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .into_connection();

        assert!(check_time_conflict(&db, driver_id, at(10, 0), 2).await.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_reports_no_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        assert!(check_time_conflict(&db, Uuid::new_v4(), at(10, 0), 2).await.is_none());
    }
}
