//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use parley_shared::protocol::MessagePayload;

use crate::{
    domain::{GroupId, Message, MessageBody, UserId},
    infrastructure::dto::http::{CreateGroupRequest, GroupDto, SendMessageRequest},
    ui::state::AppState,
};

use super::{auth::AuthenticatedUser, error::ApiError};

fn to_payloads(messages: &[Message]) -> Vec<MessagePayload> {
    messages.iter().map(MessagePayload::from).collect()
}

fn message_body(
    request: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<MessageBody, ApiError> {
    let Json(request) = request?;
    Ok(MessageBody::new(request.text, request.image_url)?)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Currently online user ids
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let users = state.get_online_users_usecase.execute().await;
    Json(users.into_iter().map(UserId::into_string).collect())
}

/// Send a direct message. The response never depends on whether the recipient is online.
pub async fn send_direct_message(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(me): AuthenticatedUser,
    Path(recipient_id): Path<String>,
    request: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessagePayload>), ApiError> {
    let recipient_id = UserId::try_from(recipient_id)?;
    let body = message_body(request)?;

    let message = state
        .send_message_usecase
        .send_direct(me, recipient_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(MessagePayload::from(&message))))
}

/// Direct message history between the caller and a peer
pub async fn get_direct_messages(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(me): AuthenticatedUser,
    Path(peer_id): Path<String>,
) -> Result<Json<Vec<MessagePayload>>, ApiError> {
    let peer_id = UserId::try_from(peer_id)?;
    let messages = state.get_messages_usecase.direct(&me, &peer_id).await?;
    Ok(Json(to_payloads(&messages)))
}

/// Create a group. The caller becomes its creator and first member.
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(me): AuthenticatedUser,
    request: Result<Json<CreateGroupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GroupDto>), ApiError> {
    let Json(request) = request?;
    let group = state
        .create_group_usecase
        .execute(me, request.name, request.member_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(GroupDto::from(&group))))
}

/// Send a message to a group the caller belongs to
pub async fn send_group_message(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(me): AuthenticatedUser,
    Path(group_id): Path<String>,
    request: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessagePayload>), ApiError> {
    let group_id = GroupId::try_from(group_id)?;
    let body = message_body(request)?;

    let message = state
        .send_message_usecase
        .send_to_group(me, group_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(MessagePayload::from(&message))))
}

/// Group message history
pub async fn get_group_messages(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(me): AuthenticatedUser,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<MessagePayload>>, ApiError> {
    let group_id = GroupId::try_from(group_id)?;
    let messages = state.get_messages_usecase.group(&me, &group_id).await?;
    Ok(Json(to_payloads(&messages)))
}
