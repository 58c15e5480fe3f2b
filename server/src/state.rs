//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the topic store plus the live playground sessions. Each map is
//! behind its own `RwLock`; every request takes the lock for a single
//! operation, so store operations still run to completion one at a time.
//!
//! Sessions keep the `AbortHandle`s of their timer tasks so closing a
//! session can cancel pending work.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use topics::TopicStore;
use topics::topic::now_ms;
use uuid::Uuid;

use crate::config::PlaygroundConfig;
use crate::services::playground::{Environment, Microphone, Variant, format_duration};

// =============================================================================
// CHAT SESSION
// =============================================================================

pub const CHAT_GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    /// Milliseconds since Unix epoch.
    pub ts: i64,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), role, content: content.into(), ts: now_ms() }
    }
}

/// A simulated conversation with the agent under test.
#[derive(Debug)]
pub struct ChatSession {
    pub id: Uuid,
    pub environment: Environment,
    pub variant: Variant,
    pub messages: Vec<ChatMessage>,
    pub typing: bool,
    /// Reply tasks not yet known to have finished.
    pub pending: Vec<AbortHandle>,
}

impl ChatSession {
    #[must_use]
    pub fn new(environment: Environment, variant: Variant) -> Self {
        Self {
            id: Uuid::new_v4(),
            environment,
            variant,
            messages: vec![ChatMessage::new(ChatRole::Assistant, CHAT_GREETING)],
            typing: false,
            pending: Vec::new(),
        }
    }

    /// Abort every pending reply. Safe to call repeatedly.
    pub fn cancel_pending(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        self.typing = false;
    }

    #[must_use]
    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            id: self.id,
            environment: self.environment,
            variant: self.variant,
            messages: self.messages.clone(),
            typing: self.typing,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSnapshot {
    pub id: Uuid,
    pub environment: Environment,
    pub variant: Variant,
    pub messages: Vec<ChatMessage>,
    pub typing: bool,
}

// =============================================================================
// CALL SESSION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallPhase {
    Idle,
    Connecting,
    InCall,
}

/// A simulated voice call with the agent under test.
#[derive(Debug)]
pub struct CallSession {
    pub id: Uuid,
    pub environment: Environment,
    pub variant: Variant,
    pub microphone: Microphone,
    pub phase: CallPhase,
    pub duration_secs: u64,
    /// Connect-then-tick task while a call is active.
    pub task: Option<AbortHandle>,
}

impl CallSession {
    #[must_use]
    pub fn new(environment: Environment, variant: Variant, microphone: Microphone) -> Self {
        Self {
            id: Uuid::new_v4(),
            environment,
            variant,
            microphone,
            phase: CallPhase::Idle,
            duration_secs: 0,
            task: None,
        }
    }

    /// Stop timers and return to idle. Safe to call repeatedly.
    pub fn hang_up(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.phase = CallPhase::Idle;
        self.duration_secs = 0;
    }

    #[must_use]
    pub fn snapshot(&self) -> CallSnapshot {
        CallSnapshot {
            id: self.id,
            environment: self.environment,
            variant: self.variant,
            microphone: self.microphone,
            phase: self.phase,
            duration_secs: self.duration_secs,
            duration: format_duration(self.duration_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CallSnapshot {
    pub id: Uuid,
    pub environment: Environment,
    pub variant: Variant,
    pub microphone: Microphone,
    pub phase: CallPhase,
    pub duration_secs: u64,
    /// `MM:SS`
    pub duration: String,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub topics: Arc<RwLock<TopicStore>>,
    pub chats: Arc<RwLock<HashMap<Uuid, ChatSession>>>,
    pub calls: Arc<RwLock<HashMap<Uuid, CallSession>>>,
    pub playground: PlaygroundConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: TopicStore, playground: PlaygroundConfig) -> Self {
        Self {
            topics: Arc::new(RwLock::new(store)),
            chats: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(HashMap::new())),
            playground,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
