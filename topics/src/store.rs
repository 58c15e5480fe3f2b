//! Topic collection manager.
//!
//! DESIGN
//! ======
//! Topics are held as `Arc<Topic>` in prepend order (newest insert first,
//! independent of display order). Updates clone the current value, apply
//! the change, stamp `updated_at`, and swap the `Arc`, so any snapshot a
//! caller obtained earlier stays valid and unchanged.
//!
//! Collapse state is a side map keyed by topic id. Every live topic has an
//! entry; delete removes it. Missing entries read as expanded.
//!
//! Unknown ids return `TopicError::NotFound` and leave all state unchanged.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::TopicError;
use crate::queries;
use crate::topic::{Topic, TopicId, TopicPatch, now_ms};
use crate::view::{self, SortKey, ViewState};

#[derive(Debug, Default)]
pub struct TopicStore {
    topics: Vec<Arc<Topic>>,
    collapse: HashMap<TopicId, bool>,
    search_query: String,
    sort_key: SortKey,
    /// Last timestamp handed out; keeps `updated_at` non-decreasing.
    last_stamp: i64,
}

impl TopicStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing topics (kept in the given order), all expanded.
    #[must_use]
    pub fn from_topics(topics: impl IntoIterator<Item = Topic>) -> Self {
        let topics: Vec<Arc<Topic>> = topics.into_iter().map(Arc::new).collect();
        let collapse = topics.iter().map(|t| (t.id, true)).collect();
        let last_stamp = topics
            .iter()
            .filter_map(|t| t.updated_at)
            .max()
            .unwrap_or(0);
        Self { topics, collapse, search_query: String::new(), sort_key: SortKey::default(), last_stamp }
    }

    fn stamp(&mut self) -> i64 {
        self.last_stamp = now_ms().max(self.last_stamp);
        self.last_stamp
    }

    fn position(&self, id: TopicId) -> Result<usize, TopicError> {
        self.topics
            .iter()
            .position(|t| t.id == id)
            .ok_or(TopicError::NotFound(id))
    }

    fn prepend(&mut self, topic: Topic) -> Arc<Topic> {
        let topic = Arc::new(topic);
        self.collapse.insert(topic.id, true);
        self.topics.insert(0, Arc::clone(&topic));
        topic
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Prepend a blank, expanded topic.
    pub fn add_topic(&mut self) -> Arc<Topic> {
        let now = self.stamp();
        let topic = self.prepend(Topic::blank(now));
        tracing::debug!(topic_id = %topic.id, "topic added");
        topic
    }

    /// Apply `mutator` to a copy of the topic and store the copy with a new
    /// `updated_at`. The topic id cannot be changed by the mutator.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no topic has `id`.
    pub fn update_topic<F>(&mut self, id: TopicId, mutator: F) -> Result<Arc<Topic>, TopicError>
    where
        F: FnOnce(&mut Topic),
    {
        self.try_update_topic(id, |topic| {
            mutator(topic);
            Ok(())
        })
    }

    /// Like [`update_topic`](Self::update_topic), but the mutator may fail,
    /// in which case nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or the mutator's error.
    pub fn try_update_topic<F>(&mut self, id: TopicId, mutator: F) -> Result<Arc<Topic>, TopicError>
    where
        F: FnOnce(&mut Topic) -> Result<(), TopicError>,
    {
        let idx = self.position(id)?;
        let mut next = Topic::clone(&self.topics[idx]);
        mutator(&mut next)?;
        next.id = id;
        next.updated_at = Some(self.stamp());

        let next = Arc::new(next);
        self.topics[idx] = Arc::clone(&next);
        tracing::debug!(topic_id = %id, "topic updated");
        Ok(next)
    }

    /// Apply a partial field update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no topic has `id`.
    pub fn apply_patch(&mut self, id: TopicId, patch: &TopicPatch) -> Result<Arc<Topic>, TopicError> {
        self.update_topic(id, |topic| patch.apply(topic))
    }

    /// Remove a topic and its collapse entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no topic has `id`.
    pub fn delete_topic(&mut self, id: TopicId) -> Result<Arc<Topic>, TopicError> {
        let idx = self.position(id)?;
        let removed = self.topics.remove(idx);
        self.collapse.remove(&id);
        tracing::debug!(topic_id = %id, "topic deleted");
        Ok(removed)
    }

    /// Prepend a copy of a topic with a fresh id, an empty name, and fresh
    /// example-query ids.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no topic has `id`.
    pub fn duplicate_topic(&mut self, id: TopicId) -> Result<Arc<Topic>, TopicError> {
        let idx = self.position(id)?;
        let now = self.stamp();
        let copy = self.topics[idx].duplicate(now);
        let copy = self.prepend(copy);
        tracing::debug!(source_id = %id, topic_id = %copy.id, "topic duplicated");
        Ok(copy)
    }

    // =========================================================================
    // EXAMPLE QUERIES
    // =========================================================================

    /// Edit example-query row `index`, growing the list per the auto-grow rule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown topic, `QueryIndexOutOfRange` for a
    /// bad index.
    pub fn edit_example_query(&mut self, id: TopicId, index: usize, value: &str) -> Result<Arc<Topic>, TopicError> {
        self.try_update_topic(id, |topic| queries::edit_row(&mut topic.example_queries, index, value))
    }

    /// Remove example-query row `index`. Removing the last remaining row is a
    /// no-op and does not touch `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown topic, `QueryIndexOutOfRange` for a
    /// bad index.
    pub fn remove_example_query(&mut self, id: TopicId, index: usize) -> Result<Arc<Topic>, TopicError> {
        let idx = self.position(id)?;
        if self.topics[idx].example_queries.len() <= 1 {
            return Ok(Arc::clone(&self.topics[idx]));
        }
        self.try_update_topic(id, |topic| queries::remove_row(&mut topic.example_queries, index).map(|_| ()))
    }

    // =========================================================================
    // COLLAPSE STATE
    // =========================================================================

    /// Whether a topic is expanded. Unknown ids read as expanded.
    #[must_use]
    pub fn is_expanded(&self, id: TopicId) -> bool {
        self.collapse.get(&id).copied().unwrap_or(true)
    }

    /// Flip a topic's expanded flag and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no topic has `id`.
    pub fn toggle_topic(&mut self, id: TopicId) -> Result<bool, TopicError> {
        self.position(id)?;
        let entry = self.collapse.entry(id).or_insert(true);
        *entry = !*entry;
        Ok(*entry)
    }

    /// True when every collapse entry is collapsed (vacuously true when empty).
    #[must_use]
    pub fn all_collapsed(&self) -> bool {
        self.collapse.values().all(|expanded| !expanded)
    }

    /// Expand everything if everything is collapsed, otherwise collapse
    /// everything. Returns the new expanded flag.
    pub fn toggle_collapse_all(&mut self) -> bool {
        let expanded = self.all_collapsed();
        let mut next: HashMap<TopicId, bool> = self.collapse.keys().map(|id| (*id, expanded)).collect();
        for topic in &self.topics {
            next.insert(topic.id, expanded);
        }
        self.collapse = next;
        tracing::debug!(expanded, "collapse state toggled for all topics");
        expanded
    }

    // =========================================================================
    // VIEW
    // =========================================================================

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// All topics in insertion (prepend) order.
    #[must_use]
    pub fn topics(&self) -> &[Arc<Topic>] {
        &self.topics
    }

    #[must_use]
    pub fn get(&self, id: TopicId) -> Option<Arc<Topic>> {
        self.topics.iter().find(|t| t.id == id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Number of collapse entries held; equals `len()` unless entries were
    /// written for topics that no longer exist.
    #[must_use]
    pub fn collapse_entries(&self) -> usize {
        self.collapse.len()
    }

    /// Filtered and sorted topics under the current search and sort.
    #[must_use]
    pub fn view(&self) -> Vec<Arc<Topic>> {
        view::derive(&self.topics, &self.search_query, self.sort_key)
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        ViewState::classify(self.topics.len(), self.view().len())
    }

    /// Header count: "No topics", "1 topic", "N topics".
    #[must_use]
    pub fn topic_count_label(&self) -> String {
        match self.topics.len() {
            0 => "No topics".to_owned(),
            1 => "1 topic".to_owned(),
            n => format!("{n} topics"),
        }
    }

    /// Export is only offered once there is something to export.
    #[must_use]
    pub fn can_export(&self) -> bool {
        !self.topics.is_empty()
    }
}
