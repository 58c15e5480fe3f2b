use std::collections::HashSet;

use uuid::Uuid;

use super::*;
use crate::error::ErrorCode;
use crate::topic::ExampleQuery;

fn topic(name: &str, content: &str, updated_at: i64) -> Topic {
    Topic {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        content: content.to_owned(),
        actions: String::new(),
        example_queries: vec![ExampleQuery::new("q1"), ExampleQuery::blank()],
        created_at: Some(updated_at),
        updated_at: Some(updated_at),
    }
}

fn names(topics: &[Arc<Topic>]) -> Vec<String> {
    topics.iter().map(|t| t.name.clone()).collect()
}

// =============================================================
// add / delete
// =============================================================

#[test]
fn add_topic_prepends_expanded_blank() {
    let mut store = TopicStore::new();
    let first = store.add_topic();
    let second = store.add_topic();

    assert_eq!(store.len(), 2);
    assert_eq!(store.topics()[0].id, second.id);
    assert_eq!(store.topics()[1].id, first.id);
    assert!(store.is_expanded(second.id));
    assert_eq!(second.example_queries.len(), 1);
    assert!(second.created_at.is_some());
    assert_eq!(second.created_at, second.updated_at);
}

#[test]
fn add_then_delete_all_leaves_no_collapse_entries() {
    let mut store = TopicStore::new();
    let ids: Vec<_> = (0..5).map(|_| store.add_topic().id).collect();
    assert_eq!(store.collapse_entries(), 5);

    for id in ids {
        store.delete_topic(id).unwrap();
    }
    assert!(store.is_empty());
    assert_eq!(store.collapse_entries(), 0);
    assert_eq!(store.view_state(), ViewState::Empty);
}

#[test]
fn delete_unknown_id_is_not_found_and_changes_nothing() {
    let mut store = TopicStore::new();
    store.add_topic();
    let missing = Uuid::new_v4();
    let err = store.delete_topic(missing).unwrap_err();
    assert_eq!(err, TopicError::NotFound(missing));
    assert_eq!(err.error_code(), "E_TOPIC_NOT_FOUND");
    assert_eq!(store.len(), 1);
    assert_eq!(store.collapse_entries(), 1);
}

// =============================================================
// update
// =============================================================

#[test]
fn update_replaces_value_and_keeps_old_snapshot() {
    let mut store = TopicStore::from_topics([topic("before", "c", 1)]);
    let id = store.topics()[0].id;
    let snapshot = store.get(id).unwrap();

    let updated = store.update_topic(id, |t| t.name = "after".into()).unwrap();

    assert_eq!(snapshot.name, "before");
    assert_eq!(snapshot.updated_at, Some(1));
    assert_eq!(updated.name, "after");
    assert_eq!(updated.content, "c");
    assert_eq!(updated.created_at, Some(1));
    assert!(updated.updated_ms() > 1);
    assert_eq!(store.get(id).unwrap().name, "after");
}

#[test]
fn repeated_identical_update_is_idempotent_apart_from_timestamp() {
    let mut store = TopicStore::new();
    let id = store.add_topic().id;
    let first = store.update_topic(id, |t| t.content = "same".into()).unwrap();
    let second = store.update_topic(id, |t| t.content = "same".into()).unwrap();

    assert_eq!(first.name, second.name);
    assert_eq!(first.content, second.content);
    assert_eq!(first.actions, second.actions);
    assert_eq!(first.example_queries, second.example_queries);
    assert!(second.updated_ms() >= first.updated_ms());
}

#[test]
fn mutator_cannot_change_id() {
    let mut store = TopicStore::new();
    let id = store.add_topic().id;
    let updated = store.update_topic(id, |t| t.id = Uuid::nil()).unwrap();
    assert_eq!(updated.id, id);
    assert!(store.get(Uuid::nil()).is_none());
}

#[test]
fn update_unknown_id_leaves_collection_unchanged() {
    let mut store = TopicStore::from_topics([topic("a", "", 1)]);
    let before: Vec<_> = store.topics().to_vec();
    let result = store.update_topic(Uuid::new_v4(), |t| t.name = "x".into());
    assert!(matches!(result, Err(TopicError::NotFound(_))));
    assert_eq!(store.topics(), before.as_slice());
}

#[test]
fn apply_patch_updates_fields() {
    let mut store = TopicStore::new();
    let id = store.add_topic().id;
    let patch = TopicPatch { name: Some("Refunds".into()), actions: Some("issue_refund".into()), ..TopicPatch::default() };
    let updated = store.apply_patch(id, &patch).unwrap();
    assert_eq!(updated.name, "Refunds");
    assert_eq!(updated.actions, "issue_refund");
    assert!(updated.content.is_empty());
}

// =============================================================
// duplicate
// =============================================================

#[test]
fn duplicate_prepends_copy_with_fresh_ids() {
    let mut source = topic("Orders", "track", 1);
    source.actions = "lookup_order".into();
    let mut store = TopicStore::from_topics([source.clone(), topic("Other", "", 2)]);

    let copy = store.duplicate_topic(source.id).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(store.topics()[0].id, copy.id);
    assert!(copy.name.is_empty());
    assert_eq!(copy.content, "track");
    assert_eq!(copy.actions, "lookup_order");
    assert!(store.topics()[1..].iter().all(|t| t.id != copy.id));
    assert!(store.is_expanded(copy.id));

    let source_ids: HashSet<_> = source.example_queries.iter().map(|q| q.id).collect();
    assert!(copy.example_queries.iter().all(|q| !source_ids.contains(&q.id)));
    assert_eq!(copy.example_queries.len(), source.example_queries.len());
}

#[test]
fn duplicate_unknown_id_is_not_found() {
    let mut store = TopicStore::new();
    assert!(matches!(store.duplicate_topic(Uuid::new_v4()), Err(TopicError::NotFound(_))));
    assert!(store.is_empty());
}

// =============================================================
// example queries
// =============================================================

#[test]
fn edit_tail_query_grows_and_stamps() {
    let mut store = TopicStore::new();
    let added = store.add_topic();
    let updated = store.edit_example_query(added.id, 0, "Hello").unwrap();
    assert_eq!(updated.example_queries.len(), 2);
    assert_eq!(updated.example_queries[0].value, "Hello");
    assert!(updated.updated_ms() >= added.updated_ms());
}

#[test]
fn edit_query_out_of_range_leaves_topic_unchanged() {
    let mut store = TopicStore::from_topics([topic("a", "", 1)]);
    let id = store.topics()[0].id;
    let err = store.edit_example_query(id, 9, "x").unwrap_err();
    assert!(matches!(err, TopicError::QueryIndexOutOfRange { index: 9, len: 2 }));
    assert_eq!(store.get(id).unwrap().updated_at, Some(1));
}

#[test]
fn remove_last_remaining_query_is_noop() {
    let mut store = TopicStore::new();
    let added = store.add_topic();
    let after = store.remove_example_query(added.id, 0).unwrap();
    assert_eq!(after.example_queries.len(), 1);
    assert_eq!(after.updated_at, added.updated_at);
}

#[test]
fn remove_query_drops_row() {
    let mut store = TopicStore::from_topics([topic("a", "", 1)]);
    let id = store.topics()[0].id;
    let after = store.remove_example_query(id, 0).unwrap();
    assert_eq!(after.example_queries.len(), 1);
    assert!(after.example_queries[0].value.is_empty());
}

// =============================================================
// collapse state
// =============================================================

#[test]
fn toggle_topic_flips_entry() {
    let mut store = TopicStore::new();
    let id = store.add_topic().id;
    assert!(!store.toggle_topic(id).unwrap());
    assert!(!store.is_expanded(id));
    assert!(store.toggle_topic(id).unwrap());
    assert!(store.is_expanded(id));
}

#[test]
fn toggle_unknown_topic_does_not_create_entry() {
    let mut store = TopicStore::new();
    assert!(store.toggle_topic(Uuid::new_v4()).is_err());
    assert_eq!(store.collapse_entries(), 0);
}

#[test]
fn unknown_ids_read_as_expanded() {
    let store = TopicStore::new();
    assert!(store.is_expanded(Uuid::new_v4()));
}

#[test]
fn collapse_all_twice_returns_to_all_expanded() {
    let mut store = TopicStore::new();
    let ids: Vec<_> = (0..3).map(|_| store.add_topic().id).collect();

    assert!(!store.toggle_collapse_all());
    assert!(ids.iter().all(|id| !store.is_expanded(*id)));
    assert!(store.all_collapsed());

    assert!(store.toggle_collapse_all());
    assert!(ids.iter().all(|id| store.is_expanded(*id)));
}

#[test]
fn collapse_all_with_mixed_state_collapses_everything() {
    let mut store = TopicStore::new();
    let a = store.add_topic().id;
    let b = store.add_topic().id;
    store.toggle_topic(a).unwrap();

    assert!(!store.toggle_collapse_all());
    assert!(!store.is_expanded(a));
    assert!(!store.is_expanded(b));
}

// =============================================================
// view
// =============================================================

#[test]
fn end_to_end_sort_and_search() {
    let a = topic("Alpha refunds", "money back", 100);
    let b = topic("Billing", "invoices", 200);
    let mut store = TopicStore::from_topics([a.clone(), b.clone()]);

    store.set_sort_key(SortKey::Newest);
    assert_eq!(names(&store.view()), ["Billing", "Alpha refunds"]);

    store.set_sort_key(SortKey::Oldest);
    assert_eq!(names(&store.view()), ["Alpha refunds", "Billing"]);

    store.set_search_query("REFUND");
    assert_eq!(names(&store.view()), ["Alpha refunds"]);
    assert_eq!(store.view_state(), ViewState::Populated);

    store.set_search_query("zebra");
    assert!(store.view().is_empty());
    assert_eq!(store.view_state(), ViewState::NoMatch);

    assert_eq!(names(store.topics()), ["Alpha refunds", "Billing"]);
}

#[test]
fn count_label_and_export_flag() {
    let mut store = TopicStore::new();
    assert_eq!(store.topic_count_label(), "No topics");
    assert!(!store.can_export());
    store.add_topic();
    assert_eq!(store.topic_count_label(), "1 topic");
    store.add_topic();
    assert_eq!(store.topic_count_label(), "2 topics");
    assert!(store.can_export());
}

#[test]
fn updated_at_never_goes_backwards_after_seeding_future_timestamps() {
    let future = now_ms() + 60_000;
    let mut store = TopicStore::from_topics([topic("a", "", future)]);
    let id = store.topics()[0].id;
    let updated = store.update_topic(id, |t| t.name = "b".into()).unwrap();
    assert!(updated.updated_ms() >= future);
}
