//! Agent playground routes (simulated chat and call sessions).

#[cfg(test)]
#[path = "playground_test.rs"]
mod playground_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::call::{self, CallError};
use crate::services::chat::{self, ChatError};
use crate::services::playground::{CallSettings, ChatSettings, Environment, Microphone, Variant};
use crate::state::{AppState, CallSnapshot, ChatSnapshot};

pub(crate) fn chat_error_to_status(err: ChatError) -> StatusCode {
    match err {
        ChatError::NotFound(_) => StatusCode::NOT_FOUND,
        ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
    }
}

pub(crate) fn call_error_to_status(err: CallError) -> StatusCode {
    match err {
        CallError::NotFound(_) => StatusCode::NOT_FOUND,
        CallError::AlreadyActive(_) => StatusCode::CONFLICT,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenChatBody {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub variant: Variant,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenCallBody {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub microphone: Microphone,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub content: String,
}

// =============================================================================
// CHAT
// =============================================================================

/// `POST /api/chat`: open a chat session.
pub async fn open_chat(
    State(state): State<AppState>,
    Json(body): Json<OpenChatBody>,
) -> (StatusCode, Json<ChatSnapshot>) {
    let snapshot = chat::open_session(&state, body.environment, body.variant).await;
    (StatusCode::CREATED, Json(snapshot))
}

/// `GET /api/chat/:id`: current transcript.
pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSnapshot>, StatusCode> {
    chat::get_session(&state, id)
        .await
        .map(Json)
        .map_err(chat_error_to_status)
}

/// `PATCH /api/chat/:id`: switch environment and/or variant.
pub async fn configure_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(settings): Json<ChatSettings>,
) -> Result<Json<ChatSnapshot>, StatusCode> {
    if settings.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    chat::configure_session(&state, id, settings)
        .await
        .map(Json)
        .map_err(chat_error_to_status)
}

/// `POST /api/chat/:id/messages`: send a message; the reply arrives later.
pub async fn send_chat_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageBody>,
) -> Result<(StatusCode, Json<ChatSnapshot>), StatusCode> {
    let snapshot = chat::send_message(&state, id, &body.content)
        .await
        .map_err(chat_error_to_status)?;
    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

/// `POST /api/chat/:id/reset`: back to the greeting.
pub async fn reset_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSnapshot>, StatusCode> {
    chat::reset_session(&state, id)
        .await
        .map(Json)
        .map_err(chat_error_to_status)
}

/// `DELETE /api/chat/:id`: close the session.
pub async fn close_chat(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    chat::close_session(&state, id)
        .await
        .map_err(chat_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// CALL
// =============================================================================

/// `POST /api/call`: open an idle call session.
pub async fn open_call(
    State(state): State<AppState>,
    Json(body): Json<OpenCallBody>,
) -> (StatusCode, Json<CallSnapshot>) {
    let snapshot = call::open_session(&state, body.environment, body.variant, body.microphone).await;
    (StatusCode::CREATED, Json(snapshot))
}

/// `GET /api/call/:id`: phase and duration.
pub async fn get_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CallSnapshot>, StatusCode> {
    call::get_session(&state, id)
        .await
        .map(Json)
        .map_err(call_error_to_status)
}

/// `PATCH /api/call/:id`: change settings while idle.
pub async fn configure_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(settings): Json<CallSettings>,
) -> Result<Json<CallSnapshot>, StatusCode> {
    if settings.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    call::configure_session(&state, id, settings)
        .await
        .map(Json)
        .map_err(call_error_to_status)
}

/// `POST /api/call/:id/start`: begin connecting.
pub async fn start_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CallSnapshot>, StatusCode> {
    call::start_call(&state, id)
        .await
        .map(Json)
        .map_err(call_error_to_status)
}

/// `POST /api/call/:id/end`: hang up.
pub async fn end_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CallSnapshot>, StatusCode> {
    call::end_call(&state, id)
        .await
        .map(Json)
        .map_err(call_error_to_status)
}

/// `DELETE /api/call/:id`: hang up and close the session.
pub async fn close_call(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    call::close_session(&state, id)
        .await
        .map_err(call_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}
