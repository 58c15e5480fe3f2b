use super::*;
use crate::state::test_helpers;
use uuid::Uuid;

#[tokio::test]
async fn create_topic_is_listed_expanded() {
    let state = test_helpers::test_app_state();
    let created = create_topic(&state).await;
    assert!(created.expanded);

    let listing = list_topics(&state).await;
    assert_eq!(listing.total, 1);
    assert_eq!(listing.count_label, "1 topic");
    assert_eq!(listing.view_state, ViewState::Populated);
    assert_eq!(listing.topics[0].topic.id, created.topic.id);
}

#[tokio::test]
async fn empty_store_lists_empty_state() {
    let state = test_helpers::test_app_state();
    let listing = list_topics(&state).await;
    assert_eq!(listing.view_state, ViewState::Empty);
    assert!(!listing.can_export);
    assert!(listing.all_collapsed);
}

#[tokio::test]
async fn set_view_filters_and_sorts() {
    let state = test_helpers::seeded_app_state();
    let listing = set_view(&state, Some("order".into()), Some("name-asc")).await.unwrap();
    assert_eq!(listing.sort, SortKey::NameAsc);
    assert_eq!(listing.search, "order");
    let names: Vec<_> = listing.topics.iter().map(|t| t.topic.name.as_str()).collect();
    assert_eq!(names, ["Order Status"]);

    let listing = set_view(&state, Some("nothing like this".into()), None).await.unwrap();
    assert_eq!(listing.view_state, ViewState::NoMatch);
    assert_eq!(listing.total, 3);
}

#[tokio::test]
async fn set_view_rejects_unknown_sort_without_changing_search() {
    let state = test_helpers::seeded_app_state();
    let err = set_view(&state, Some("greeting".into()), Some("alphabetical")).await.unwrap_err();
    assert!(matches!(err, TopicError::InvalidSortKey(_)));
    assert_eq!(list_topics(&state).await.search, "");
}

#[tokio::test]
async fn patch_then_get_round_trips_fields() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;
    let patch = TopicPatch { name: Some("Refunds".into()), ..TopicPatch::default() };
    patch_topic(&state, id, &patch).await.unwrap();

    let fetched = get_topic(&state, id).await.unwrap();
    assert_eq!(fetched.topic.name, "Refunds");
}

#[tokio::test]
async fn delete_unknown_topic_is_not_found() {
    let state = test_helpers::test_app_state();
    let err = delete_topic(&state, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TopicError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_adds_second_topic() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;
    let copy = duplicate_topic(&state, id).await.unwrap();
    assert_ne!(copy.topic.id, id);
    assert_eq!(list_topics(&state).await.total, 2);
}

#[tokio::test]
async fn toggle_and_collapse_all() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;
    assert!(!toggle_topic(&state, id).await.unwrap());
    assert!(list_topics(&state).await.all_collapsed);

    assert!(toggle_collapse_all(&state).await);
    assert!(get_topic(&state, id).await.unwrap().expanded);
}

#[tokio::test]
async fn query_rows_grow_and_shrink() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;
    let grown = edit_query(&state, id, 0, "Hello").await.unwrap();
    assert_eq!(grown.topic.example_queries.len(), 2);

    let shrunk = remove_query(&state, id, 1).await.unwrap();
    assert_eq!(shrunk.topic.example_queries.len(), 1);

    let unchanged = remove_query(&state, id, 0).await.unwrap();
    assert_eq!(unchanged.topic.example_queries.len(), 1);
}

#[tokio::test]
async fn listing_serializes_topic_fields_flat() {
    let state = test_helpers::test_app_state();
    create_topic(&state).await;
    let json = serde_json::to_value(list_topics(&state).await).unwrap();
    let first = &json["topics"][0];
    assert!(first.get("id").is_some());
    assert!(first.get("example_queries").is_some());
    assert_eq!(first["expanded"], true);
    assert_eq!(json["view_state"], "populated");
    assert_eq!(json["sort"], "newest");
}
