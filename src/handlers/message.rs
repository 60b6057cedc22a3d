use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::message::{self, MessageType};
use crate::error::AppResult;
use crate::services;
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Uuid,
    pub body: String,
    #[serde(default)]
    pub message_type: Option<MessageType>,
}

/// Send a message in a ride conversation
pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(ride_id): Path<Uuid>,
    Json(payload): Json<SendMessageRequest>,
) -> AppResult<Json<message::Model>> {
    let message = services::message::send_message(
        state.db.as_ref(),
        ride_id,
        claims.sub,
        payload.receiver_id,
        payload.body,
        payload.message_type.unwrap_or(MessageType::Text),
    )
    .await?;
    Ok(Json(message))
}

/// Conversation for a ride, oldest first
pub async fn ride_messages(
    State(state): State<AppState>,
    Path(ride_id): Path<Uuid>,
) -> AppResult<Json<Vec<message::Model>>> {
    let messages = services::message::get_messages_by_ride(state.db.as_ref(), ride_id).await?;
    Ok(Json(messages))
}

/// Inbox for the logged-in user, newest first
pub async fn my_conversations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<message::Model>>> {
    let messages =
        services::message::get_conversations_for_user(state.db.as_ref(), claims.sub).await?;
    Ok(Json(messages))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(message_id): Path<Uuid>,
) -> AppResult<Json<message::Model>> {
    let message =
        services::message::mark_message_read(state.db.as_ref(), claims.sub, message_id).await?;
    Ok(Json(message))
}
