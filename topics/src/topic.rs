//! Topic model.
//!
//! DESIGN
//! ======
//! Timestamps are milliseconds since the Unix epoch, matching the `ts`
//! convention used on the wire. Both are optional on input so externally
//! supplied topics without timestamps still sort (as the epoch).

#[cfg(test)]
#[path = "topic_test.rs"]
mod topic_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TopicId = Uuid;
pub type QueryId = Uuid;

/// A sample user utterance attached to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleQuery {
    pub id: QueryId,
    pub value: String,
}

impl ExampleQuery {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), value: value.into() }
    }

    /// A blank row reserved for new input.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new())
    }

    /// Same value under a fresh identifier.
    #[must_use]
    pub fn reissued(&self) -> Self {
        Self::new(self.value.clone())
    }
}

/// One knowledge-base entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub content: String,
    /// Comma-separated action identifiers. Empty means none configured.
    pub actions: String,
    pub example_queries: Vec<ExampleQuery>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Topic {
    /// A blank topic with a single empty example-query row.
    #[must_use]
    pub fn blank(now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            content: String::new(),
            actions: String::new(),
            example_queries: vec![ExampleQuery::blank()],
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Copy for a duplicate: new id, empty name, fresh row ids, new timestamps.
    #[must_use]
    pub fn duplicate(&self, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            content: self.content.clone(),
            actions: self.actions.clone(),
            example_queries: self.example_queries.iter().map(ExampleQuery::reissued).collect(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    #[must_use]
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Individual action identifiers, trimmed, empties dropped.
    pub fn action_list(&self) -> impl Iterator<Item = &str> {
        self.actions.split(',').map(str::trim).filter(|a| !a.is_empty())
    }

    /// Sort key for recency; a missing timestamp counts as the epoch.
    #[must_use]
    pub fn updated_ms(&self) -> i64 {
        self.updated_at.unwrap_or(0)
    }
}

/// Partial field update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_queries: Option<Vec<ExampleQuery>>,
}

impl TopicPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.actions.is_none() && self.example_queries.is_none()
    }

    /// Apply the present fields onto `topic`.
    ///
    /// An empty `example_queries` list is replaced by a single blank row so
    /// the sequence never goes empty.
    pub fn apply(&self, topic: &mut Topic) {
        if let Some(name) = &self.name {
            topic.name.clone_from(name);
        }
        if let Some(content) = &self.content {
            topic.content.clone_from(content);
        }
        if let Some(actions) = &self.actions {
            topic.actions.clone_from(actions);
        }
        if let Some(queries) = &self.example_queries {
            topic.example_queries = if queries.is_empty() { vec![ExampleQuery::blank()] } else { queries.clone() };
        }
    }
}

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(i64::MAX)
}
