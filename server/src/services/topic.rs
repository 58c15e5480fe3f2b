//! Topic service: store access, view assembly, and mutation logging.
//!
//! DESIGN
//! ======
//! Each function takes the store lock for exactly one store operation and
//! returns owned response values, so handlers never hold the lock across
//! serialization.

#[cfg(test)]
#[path = "topic_test.rs"]
mod topic_test;

use serde::Serialize;
use topics::{ErrorCode, SortKey, Topic, TopicError, TopicId, TopicPatch, TopicStore, ViewState};

use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

/// A topic plus its collapse state.
#[derive(Debug, Clone, Serialize)]
pub struct TopicItem {
    #[serde(flatten)]
    pub topic: Topic,
    pub expanded: bool,
}

/// The derived list the dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct TopicListing {
    pub topics: Vec<TopicItem>,
    pub view_state: ViewState,
    pub total: usize,
    pub count_label: String,
    pub all_collapsed: bool,
    pub can_export: bool,
    pub search: String,
    pub sort: SortKey,
}

fn item(store: &TopicStore, topic: &Topic) -> TopicItem {
    TopicItem { topic: topic.clone(), expanded: store.is_expanded(topic.id) }
}

fn listing(store: &TopicStore) -> TopicListing {
    let visible = store.view();
    TopicListing {
        view_state: ViewState::classify(store.len(), visible.len()),
        topics: visible.iter().map(|t| item(store, t)).collect(),
        total: store.len(),
        count_label: store.topic_count_label(),
        all_collapsed: store.all_collapsed(),
        can_export: store.can_export(),
        search: store.search_query().to_owned(),
        sort: store.sort_key(),
    }
}

fn log_failure(op: &'static str, err: &TopicError) {
    tracing::warn!(op, code = err.error_code(), error = %err, "topic operation failed");
}

// =============================================================================
// READ
// =============================================================================

pub async fn list_topics(state: &AppState) -> TopicListing {
    let store = state.topics.read().await;
    listing(&store)
}

/// # Errors
///
/// Returns `NotFound` if no topic has `id`.
pub async fn get_topic(state: &AppState, id: TopicId) -> Result<TopicItem, TopicError> {
    let store = state.topics.read().await;
    let topic = store.get(id).ok_or(TopicError::NotFound(id))?;
    Ok(item(&store, &topic))
}

// =============================================================================
// VIEW CONTROLS
// =============================================================================

/// Update search and/or sort, returning the re-derived listing.
///
/// # Errors
///
/// Returns `InvalidSortKey` for an unrecognized sort name; nothing changes.
pub async fn set_view(state: &AppState, search: Option<String>, sort: Option<&str>) -> Result<TopicListing, TopicError> {
    let sort = sort
        .map(str::parse::<SortKey>)
        .transpose()
        .inspect_err(|e| log_failure("set_view", e))?;

    let mut store = state.topics.write().await;
    if let Some(search) = search {
        store.set_search_query(search);
    }
    if let Some(sort) = sort {
        store.set_sort_key(sort);
    }
    tracing::debug!(search = store.search_query(), sort = %store.sort_key(), "topic view updated");
    Ok(listing(&store))
}

/// Flip every topic to expanded (if all were collapsed) or collapsed.
pub async fn toggle_collapse_all(state: &AppState) -> bool {
    let mut store = state.topics.write().await;
    store.toggle_collapse_all()
}

/// # Errors
///
/// Returns `NotFound` if no topic has `id`.
pub async fn toggle_topic(state: &AppState, id: TopicId) -> Result<bool, TopicError> {
    let mut store = state.topics.write().await;
    store.toggle_topic(id).inspect_err(|e| log_failure("toggle", e))
}

// =============================================================================
// MUTATIONS
// =============================================================================

pub async fn create_topic(state: &AppState) -> TopicItem {
    let mut store = state.topics.write().await;
    let topic = store.add_topic();
    tracing::info!(topic_id = %topic.id, total = store.len(), "topic created");
    item(&store, &topic)
}

/// # Errors
///
/// Returns `NotFound` if no topic has `id`.
pub async fn patch_topic(state: &AppState, id: TopicId, patch: &TopicPatch) -> Result<TopicItem, TopicError> {
    let mut store = state.topics.write().await;
    let topic = store
        .apply_patch(id, patch)
        .inspect_err(|e| log_failure("patch", e))?;
    tracing::info!(topic_id = %id, "topic patched");
    Ok(item(&store, &topic))
}

/// # Errors
///
/// Returns `NotFound` if no topic has `id`.
pub async fn delete_topic(state: &AppState, id: TopicId) -> Result<(), TopicError> {
    let mut store = state.topics.write().await;
    store
        .delete_topic(id)
        .inspect_err(|e| log_failure("delete", e))?;
    tracing::info!(topic_id = %id, total = store.len(), "topic deleted");
    Ok(())
}

/// # Errors
///
/// Returns `NotFound` if no topic has `id`.
pub async fn duplicate_topic(state: &AppState, id: TopicId) -> Result<TopicItem, TopicError> {
    let mut store = state.topics.write().await;
    let copy = store
        .duplicate_topic(id)
        .inspect_err(|e| log_failure("duplicate", e))?;
    tracing::info!(source_id = %id, topic_id = %copy.id, "topic duplicated");
    Ok(item(&store, &copy))
}

/// # Errors
///
/// Returns `NotFound` or `QueryIndexOutOfRange`.
pub async fn edit_query(state: &AppState, id: TopicId, index: usize, value: &str) -> Result<TopicItem, TopicError> {
    let mut store = state.topics.write().await;
    let topic = store
        .edit_example_query(id, index, value)
        .inspect_err(|e| log_failure("edit_query", e))?;
    Ok(item(&store, &topic))
}

/// # Errors
///
/// Returns `NotFound` or `QueryIndexOutOfRange`.
pub async fn remove_query(state: &AppState, id: TopicId, index: usize) -> Result<TopicItem, TopicError> {
    let mut store = state.topics.write().await;
    let topic = store
        .remove_example_query(id, index)
        .inspect_err(|e| log_failure("remove_query", e))?;
    Ok(item(&store, &topic))
}
