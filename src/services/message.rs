use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::message::{self, MessageType};
use crate::entities::ride::VehicleType;
use crate::error::{AppError, AppResult};

/// Everything the booking confirmation template needs, captured at booking
/// time so the text reflects the price and seats that were actually booked.
#[derive(Debug, Clone)]
pub struct ConfirmationDetails {
    pub pickup_address: String,
    pub drop_address: String,
    pub pickup_time: DateTime<Utc>,
    pub vehicle_type: VehicleType,
    pub seats_booked: i32,
    pub total_price: f64,
}

pub fn confirmation_body(
    passenger_name: &str,
    driver_name: &str,
    details: &ConfirmationDetails,
) -> String {
    let date = details.pickup_time.format("%a, %b %-d, %Y");
    let time = details.pickup_time.format("%I:%M %p");

    format!(
        "🎉 Hey {driver_name}!\n\n\
         I'm {passenger_name} and I just booked your ride!\n\n\
         📋 Booking Details:\n\
         🚗 Vehicle: {vehicle}\n\
         📅 Date: {date}\n\
         ⏰ Time: {time}\n\
         📍 From: {from}\n\
         📍 To: {to}\n\
         💺 Seats: {seats}\n\
         💰 Total: ₹{total}\n\n\
         Looking forward to the ride! 🚀",
        vehicle = details.vehicle_type,
        from = details.pickup_address,
        to = details.drop_address,
        seats = details.seats_booked,
        total = details.total_price,
    )
}

pub async fn send_message(
    db: &DatabaseConnection,
    ride_id: Uuid,
    sender_id: Uuid,
    receiver_id: Uuid,
    body: String,
    message_type: MessageType,
) -> AppResult<message::Model> {
    if body.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let new_message = message::ActiveModel {
        id: Set(Uuid::new_v4()),
        ride_id: Set(ride_id),
        sender_id: Set(sender_id),
        receiver_id: Set(receiver_id),
        body: Set(body),
        message_type: Set(message_type),
        is_read: Set(false),
        sent_at: Set(Utc::now().into()),
    };

    Ok(new_message.insert(db).await?)
}

/// Templated confirmation from passenger to driver, persisted as an unread
/// text message. The caller treats failure as non-fatal.
pub async fn send_booking_confirmation(
    db: &DatabaseConnection,
    ride_id: Uuid,
    passenger_id: Uuid,
    driver_id: Uuid,
    passenger_name: &str,
    driver_name: &str,
    details: &ConfirmationDetails,
) -> AppResult<message::Model> {
    let body = confirmation_body(passenger_name, driver_name, details);
    send_message(db, ride_id, passenger_id, driver_id, body, MessageType::Text).await
}

/// Ride conversation, oldest message first.
pub async fn get_messages_by_ride(
    db: &DatabaseConnection,
    ride_id: Uuid,
) -> AppResult<Vec<message::Model>> {
    let messages = message::Entity::find()
        .filter(message::Column::RideId.eq(ride_id))
        .order_by_asc(message::Column::SentAt)
        .all(db)
        .await?;
    Ok(messages)
}

/// Inbox view: every message the user sent or received, newest first.
pub async fn get_conversations_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Vec<message::Model>> {
    let messages = message::Entity::find()
        .filter(
            Condition::any()
                .add(message::Column::SenderId.eq(user_id))
                .add(message::Column::ReceiverId.eq(user_id)),
        )
        .order_by_desc(message::Column::SentAt)
        .all(db)
        .await?;
    Ok(messages)
}

pub async fn mark_message_read(
    db: &DatabaseConnection,
    user_id: Uuid,
    message_id: Uuid,
) -> AppResult<message::Model> {
    let msg = message::Entity::find_by_id(message_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

    if msg.receiver_id != user_id {
        return Err(AppError::Forbidden(
            "only the receiver can mark a message as read".to_string(),
        ));
    }

    let mut active: message::ActiveModel = msg.into();
    active.is_read = Set(true);
    Ok(active.update(db).await?)
}
