//! Per-card presentation state.
//!
//! DESIGN
//! ======
//! "View more" and the actions section visibility are transient UI concerns,
//! kept out of `Topic` so they never leak into stored data. Removing the
//! actions section also clears `actions`, which goes through the store.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use std::sync::Arc;

use crate::error::TopicError;
use crate::store::TopicStore;
use crate::topic::{ExampleQuery, Topic};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardState {
    /// Show every example-query row instead of the first one only.
    pub show_all_queries: bool,
    /// Whether the actions editor is open.
    pub show_actions: bool,
}

impl CardState {
    /// Initial state for a card: actions open iff the topic already has some.
    #[must_use]
    pub fn for_topic(topic: &Topic) -> Self {
        Self { show_all_queries: false, show_actions: topic.has_actions() }
    }

    pub fn toggle_queries(&mut self) {
        self.show_all_queries = !self.show_all_queries;
    }

    /// Rows to render under the current setting.
    #[must_use]
    pub fn visible_queries<'a>(&self, topic: &'a Topic) -> &'a [ExampleQuery] {
        if self.show_all_queries {
            &topic.example_queries
        } else {
            let end = topic.example_queries.len().min(1);
            &topic.example_queries[..end]
        }
    }

    /// Label for the expander, or `None` when there is a single row.
    #[must_use]
    pub fn more_label(&self, topic: &Topic) -> Option<String> {
        let len = topic.example_queries.len();
        if len <= 1 {
            return None;
        }
        Some(if self.show_all_queries { "View less".to_owned() } else { format!("View more ({} more)", len - 1) })
    }

    pub fn open_actions(&mut self) {
        self.show_actions = true;
    }

    /// Close the actions editor and clear the topic's actions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the topic no longer exists; the card stays open.
    pub fn remove_actions(&mut self, store: &mut TopicStore, topic: &Topic) -> Result<Arc<Topic>, TopicError> {
        let updated = store.update_topic(topic.id, |t| t.actions.clear())?;
        self.show_actions = false;
        Ok(updated)
    }
}
