use super::*;
use crate::state::test_helpers;
use topics::ViewState;

#[test]
fn topic_error_to_status_maps_not_found() {
    assert_eq!(topic_error_to_status(TopicError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
}

#[test]
fn topic_error_to_status_maps_bad_input() {
    let err = TopicError::QueryIndexOutOfRange { index: 4, len: 1 };
    assert_eq!(topic_error_to_status(err), StatusCode::BAD_REQUEST);
    assert_eq!(topic_error_to_status(TopicError::InvalidSortKey("x".into())), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_returns_created_and_lists() {
    let state = test_helpers::test_app_state();
    let (status, Json(created)) = create_topic(State(state.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let Json(listing) = list_topics(State(state)).await;
    assert_eq!(listing.total, 1);
    assert_eq!(listing.topics[0].topic.id, created.topic.id);
}

#[tokio::test]
async fn get_unknown_topic_is_404() {
    let state = test_helpers::test_app_state();
    let err = get_topic(State(state), Path(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_updates_and_empty_patch_is_rejected() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;

    let patch = TopicPatch { content: Some("Refund policy".into()), ..TopicPatch::default() };
    let Json(updated) = patch_topic(State(state.clone()), Path(id), Json(patch)).await.unwrap();
    assert_eq!(updated.topic.content, "Refund policy");

    let err = patch_topic(State(state), Path(id), Json(TopicPatch::default()))
        .await
        .unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_returns_no_content_then_404() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;
    assert_eq!(delete_topic(State(state.clone()), Path(id)).await, Ok(StatusCode::NO_CONTENT));
    assert_eq!(delete_topic(State(state), Path(id)).await, Err(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn duplicate_returns_created_copy() {
    let state = test_helpers::seeded_app_state();
    let source = state.topics.read().await.topics()[0].clone();
    let (status, Json(copy)) = duplicate_topic(State(state.clone()), Path(source.id)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert!(copy.topic.name.is_empty());
    assert_eq!(copy.topic.content, source.content);
    assert_eq!(state.topics.read().await.len(), 4);
}

#[tokio::test]
async fn toggle_and_collapse_all_responses() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;

    let Json(toggled) = toggle_topic(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(toggled.id, id);
    assert!(!toggled.expanded);

    let Json(all) = collapse_all(State(state.clone())).await;
    assert!(all.expanded);

    assert_eq!(
        toggle_topic(State(state), Path(Uuid::new_v4())).await.unwrap_err(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn update_view_sets_search_and_rejects_bad_sort() {
    let state = test_helpers::seeded_app_state();
    let body = ViewBody { search: Some("zzz".into()), sort: Some("oldest".into()) };
    let Json(listing) = update_view(State(state.clone()), Json(body)).await.unwrap();
    assert_eq!(listing.view_state, ViewState::NoMatch);

    let body = ViewBody { search: None, sort: Some("sideways".into()) };
    let err = update_view(State(state), Json(body)).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn query_row_routes() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_topic(&state).await;

    let body = QueryBody { value: "Hello".into() };
    let Json(item) = edit_query(State(state.clone()), Path((id, 0)), Json(body)).await.unwrap();
    assert_eq!(item.topic.example_queries.len(), 2);

    let body = QueryBody { value: "x".into() };
    let err = edit_query(State(state.clone()), Path((id, 5)), Json(body)).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);

    let Json(item) = remove_query(State(state), Path((id, 0))).await.unwrap();
    assert_eq!(item.topic.example_queries.len(), 1);
    assert!(item.topic.example_queries[0].value.is_empty());
}
