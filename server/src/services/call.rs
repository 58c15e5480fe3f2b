//! Call playground: a simulated voice call with the agent under test.
//!
//! DESIGN
//! ======
//! `start` moves the session to `Connecting` and spawns one task that
//! sleeps for the connect delay, flips to `InCall`, then increments the
//! duration once per tick. `end` aborts that task and resets to `Idle`.
//! The task re-checks the session on every wake, so a closed session
//! stops the loop even if the abort raced with a tick.

#[cfg(test)]
#[path = "call_test.rs"]
mod call_test;

use tokio::time::{Instant, interval_at};
use topics::ErrorCode;
use uuid::Uuid;

use crate::config::PlaygroundConfig;
use crate::services::playground::{CallSettings, Environment, Microphone, Variant};
use crate::state::{AppState, CallPhase, CallSession, CallSnapshot};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CallError {
    #[error("call session not found: {0}")]
    NotFound(Uuid),
    #[error("call already active: {0}")]
    AlreadyActive(Uuid),
}

impl ErrorCode for CallError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_CALL_NOT_FOUND",
            Self::AlreadyActive(_) => "E_CALL_ACTIVE",
        }
    }
}

/// Open an idle call session.
pub async fn open_session(
    state: &AppState,
    environment: Environment,
    variant: Variant,
    microphone: Microphone,
) -> CallSnapshot {
    let call = CallSession::new(environment, variant, microphone);
    let snapshot = call.snapshot();
    state.calls.write().await.insert(call.id, call);
    tracing::info!(session_id = %snapshot.id, microphone = microphone.label(), "call session opened");
    snapshot
}

/// # Errors
///
/// Returns `NotFound` for an unknown session.
pub async fn get_session(state: &AppState, session_id: Uuid) -> Result<CallSnapshot, CallError> {
    let calls = state.calls.read().await;
    calls
        .get(&session_id)
        .map(CallSession::snapshot)
        .ok_or(CallError::NotFound(session_id))
}

/// Change environment, variant, or microphone. Settings are locked while
/// a call is connecting or in progress.
///
/// # Errors
///
/// Returns `NotFound` for an unknown session and `AlreadyActive` if the
/// call is not idle; a rejected update changes nothing.
pub async fn configure_session(
    state: &AppState,
    session_id: Uuid,
    settings: CallSettings,
) -> Result<CallSnapshot, CallError> {
    let mut calls = state.calls.write().await;
    let call = calls
        .get_mut(&session_id)
        .ok_or(CallError::NotFound(session_id))?;
    if call.phase != CallPhase::Idle {
        let err = CallError::AlreadyActive(session_id);
        tracing::warn!(%session_id, code = err.error_code(), "call settings locked while active");
        return Err(err);
    }

    if let Some(environment) = settings.environment {
        call.environment = environment;
    }
    if let Some(variant) = settings.variant {
        call.variant = variant;
    }
    if let Some(microphone) = settings.microphone {
        call.microphone = microphone;
    }
    tracing::debug!(%session_id, microphone = call.microphone.label(), "call session configured");
    Ok(call.snapshot())
}

/// Begin connecting.
///
/// # Errors
///
/// Returns `NotFound` for an unknown session and `AlreadyActive` if the
/// call is connecting or in progress.
pub async fn start_call(state: &AppState, session_id: Uuid) -> Result<CallSnapshot, CallError> {
    let mut calls = state.calls.write().await;
    let call = calls
        .get_mut(&session_id)
        .ok_or(CallError::NotFound(session_id))?;
    if call.phase != CallPhase::Idle {
        return Err(CallError::AlreadyActive(session_id));
    }

    call.phase = CallPhase::Connecting;
    call.duration_secs = 0;
    let task = tokio::spawn(run_call(state.clone(), session_id, state.playground));
    call.task = Some(task.abort_handle());

    tracing::info!(%session_id, "call connecting");
    Ok(call.snapshot())
}

async fn run_call(state: AppState, session_id: Uuid, timing: PlaygroundConfig) {
    tokio::time::sleep(timing.connect_delay).await;
    {
        let mut calls = state.calls.write().await;
        let Some(call) = calls.get_mut(&session_id) else {
            return;
        };
        call.phase = CallPhase::InCall;
    }
    tracing::debug!(%session_id, "call connected");

    let mut ticker = interval_at(Instant::now() + timing.tick, timing.tick);
    loop {
        ticker.tick().await;
        let mut calls = state.calls.write().await;
        match calls.get_mut(&session_id) {
            Some(call) if call.phase == CallPhase::InCall => call.duration_secs += 1,
            _ => return,
        }
    }
}

/// Hang up. Ending an idle call is a no-op.
///
/// # Errors
///
/// Returns `NotFound` for an unknown session.
pub async fn end_call(state: &AppState, session_id: Uuid) -> Result<CallSnapshot, CallError> {
    let mut calls = state.calls.write().await;
    let call = calls
        .get_mut(&session_id)
        .ok_or(CallError::NotFound(session_id))?;
    let was = call.phase;
    call.hang_up();
    if was != CallPhase::Idle {
        tracing::info!(%session_id, "call ended");
    }
    Ok(call.snapshot())
}

/// Remove a session, hanging up first.
///
/// # Errors
///
/// Returns `NotFound` for an unknown session.
pub async fn close_session(state: &AppState, session_id: Uuid) -> Result<(), CallError> {
    let mut call = state
        .calls
        .write()
        .await
        .remove(&session_id)
        .ok_or(CallError::NotFound(session_id))?;
    call.hang_up();
    tracing::info!(%session_id, "call session closed");
    Ok(())
}
