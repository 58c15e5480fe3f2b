//! Chat playground: a simulated conversation with the agent under test.
//!
//! DESIGN
//! ======
//! Sending a message appends it immediately and spawns a reply task that
//! sleeps for the configured delay, then appends a canned assistant reply.
//! The task's `AbortHandle` is kept on the session; reset and close abort
//! every pending reply, so nothing lands after either. A reply task that
//! wakes to find its session gone exits quietly.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::time::Duration;

use topics::ErrorCode;
use uuid::Uuid;

use crate::services::playground::{ChatSettings, Environment, Variant};
use crate::state::{AppState, CHAT_GREETING, ChatMessage, ChatRole, ChatSession, ChatSnapshot};

pub const DEMO_REPLY: &str = "Thank you for your message. I'm a demo assistant, so I can't provide real \
                              responses yet. But this is how the chat interface would work!";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat session not found: {0}")]
    NotFound(Uuid),
    #[error("message is empty")]
    EmptyMessage,
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_CHAT_NOT_FOUND",
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
        }
    }
}

/// Open a new session seeded with the assistant greeting.
pub async fn open_session(state: &AppState, environment: Environment, variant: Variant) -> ChatSnapshot {
    let session = ChatSession::new(environment, variant);
    let snapshot = session.snapshot();
    state.chats.write().await.insert(session.id, session);
    tracing::info!(
        session_id = %snapshot.id,
        environment = environment.label(),
        variant = variant.label(),
        "chat session opened"
    );
    snapshot
}

/// # Errors
///
/// Returns `NotFound` for an unknown session.
pub async fn get_session(state: &AppState, session_id: Uuid) -> Result<ChatSnapshot, ChatError> {
    let chats = state.chats.read().await;
    chats
        .get(&session_id)
        .map(ChatSession::snapshot)
        .ok_or(ChatError::NotFound(session_id))
}

/// Switch environment and/or variant. The transcript is kept as-is.
///
/// # Errors
///
/// Returns `NotFound` for an unknown session.
pub async fn configure_session(
    state: &AppState,
    session_id: Uuid,
    settings: ChatSettings,
) -> Result<ChatSnapshot, ChatError> {
    let mut chats = state.chats.write().await;
    let session = chats
        .get_mut(&session_id)
        .ok_or(ChatError::NotFound(session_id))?;
    if let Some(environment) = settings.environment {
        session.environment = environment;
    }
    if let Some(variant) = settings.variant {
        session.variant = variant;
    }
    tracing::debug!(
        %session_id,
        environment = session.environment.label(),
        variant = session.variant.label(),
        "chat session configured"
    );
    Ok(session.snapshot())
}

/// Append a user message and schedule the simulated reply.
///
/// # Errors
///
/// Returns `EmptyMessage` for blank input and `NotFound` for an unknown
/// session.
pub async fn send_message(state: &AppState, session_id: Uuid, content: &str) -> Result<ChatSnapshot, ChatError> {
    let text = content.trim();
    if text.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let mut chats = state.chats.write().await;
    let session = chats
        .get_mut(&session_id)
        .ok_or(ChatError::NotFound(session_id))?;

    session.messages.push(ChatMessage::new(ChatRole::User, text));
    session.typing = true;
    session.pending.retain(|handle| !handle.is_finished());

    let task = tokio::spawn(deliver_reply(state.clone(), session_id, state.playground.reply_delay));
    session.pending.push(task.abort_handle());

    tracing::debug!(%session_id, messages = session.messages.len(), "chat message queued");
    Ok(session.snapshot())
}

async fn deliver_reply(state: AppState, session_id: Uuid, delay: Duration) {
    tokio::time::sleep(delay).await;

    let mut chats = state.chats.write().await;
    let Some(session) = chats.get_mut(&session_id) else {
        return;
    };
    session.messages.push(ChatMessage::new(ChatRole::Assistant, DEMO_REPLY));
    // This task is still running, so more than one live handle means
    // another reply is on its way.
    session.pending.retain(|handle| !handle.is_finished());
    session.typing = session.pending.len() > 1;
}

/// Restore the greeting-only transcript and drop pending replies.
///
/// # Errors
///
/// Returns `NotFound` for an unknown session.
pub async fn reset_session(state: &AppState, session_id: Uuid) -> Result<ChatSnapshot, ChatError> {
    let mut chats = state.chats.write().await;
    let session = chats
        .get_mut(&session_id)
        .ok_or(ChatError::NotFound(session_id))?;
    session.cancel_pending();
    session.messages = vec![ChatMessage::new(ChatRole::Assistant, CHAT_GREETING)];
    tracing::debug!(%session_id, "chat session reset");
    Ok(session.snapshot())
}

/// Remove a session and cancel its pending replies.
///
/// # Errors
///
/// Returns `NotFound` for an unknown session.
pub async fn close_session(state: &AppState, session_id: Uuid) -> Result<(), ChatError> {
    let mut session = state
        .chats
        .write()
        .await
        .remove(&session_id)
        .ok_or(ChatError::NotFound(session_id))?;
    session.cancel_pending();
    tracing::info!(%session_id, "chat session closed");
    Ok(())
}
