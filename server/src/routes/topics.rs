//! Knowledge-base topic routes.

#[cfg(test)]
#[path = "topics_test.rs"]
mod topics_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use topics::{TopicError, TopicPatch};
use uuid::Uuid;

use crate::services::topic::{self, TopicItem, TopicListing};
use crate::state::AppState;

pub(crate) fn topic_error_to_status(err: TopicError) -> StatusCode {
    match err {
        TopicError::NotFound(_) => StatusCode::NOT_FOUND,
        TopicError::QueryIndexOutOfRange { .. } | TopicError::InvalidSortKey(_) => StatusCode::BAD_REQUEST,
    }
}

#[derive(Deserialize)]
pub struct ViewBody {
    pub search: Option<String>,
    pub sort: Option<String>,
}

#[derive(Deserialize)]
pub struct QueryBody {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: Uuid,
    pub expanded: bool,
}

#[derive(Debug, Serialize)]
pub struct CollapseAllResponse {
    pub expanded: bool,
}

/// `GET /api/topics`: filtered, sorted listing under the current view.
pub async fn list_topics(State(state): State<AppState>) -> Json<TopicListing> {
    Json(topic::list_topics(&state).await)
}

/// `PATCH /api/topics/view`: change search and/or sort.
pub async fn update_view(
    State(state): State<AppState>,
    Json(body): Json<ViewBody>,
) -> Result<Json<TopicListing>, StatusCode> {
    topic::set_view(&state, body.search, body.sort.as_deref())
        .await
        .map(Json)
        .map_err(topic_error_to_status)
}

/// `POST /api/topics`: add a blank topic.
pub async fn create_topic(State(state): State<AppState>) -> (StatusCode, Json<TopicItem>) {
    (StatusCode::CREATED, Json(topic::create_topic(&state).await))
}

/// `GET /api/topics/:id`: fetch one topic.
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TopicItem>, StatusCode> {
    topic::get_topic(&state, id)
        .await
        .map(Json)
        .map_err(topic_error_to_status)
}

/// `PATCH /api/topics/:id`: update name, content, actions, or queries.
pub async fn patch_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TopicPatch>,
) -> Result<Json<TopicItem>, StatusCode> {
    if patch.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    topic::patch_topic(&state, id, &patch)
        .await
        .map(Json)
        .map_err(topic_error_to_status)
}

/// `DELETE /api/topics/:id`: remove a topic.
pub async fn delete_topic(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    topic::delete_topic(&state, id)
        .await
        .map_err(topic_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/topics/:id/duplicate`: copy a topic under a new id.
pub async fn duplicate_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<TopicItem>), StatusCode> {
    let copy = topic::duplicate_topic(&state, id)
        .await
        .map_err(topic_error_to_status)?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// `POST /api/topics/:id/toggle`: flip expanded/collapsed.
pub async fn toggle_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let expanded = topic::toggle_topic(&state, id)
        .await
        .map_err(topic_error_to_status)?;
    Ok(Json(ToggleResponse { id, expanded }))
}

/// `POST /api/topics/collapse-all`: expand all or collapse all.
pub async fn collapse_all(State(state): State<AppState>) -> Json<CollapseAllResponse> {
    Json(CollapseAllResponse { expanded: topic::toggle_collapse_all(&state).await })
}

/// `PUT /api/topics/:id/queries/:index`: edit one example-query row.
pub async fn edit_query(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(body): Json<QueryBody>,
) -> Result<Json<TopicItem>, StatusCode> {
    topic::edit_query(&state, id, index, &body.value)
        .await
        .map(Json)
        .map_err(topic_error_to_status)
}

/// `DELETE /api/topics/:id/queries/:index`: remove one example-query row.
pub async fn remove_query(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<TopicItem>, StatusCode> {
    topic::remove_query(&state, id, index)
        .await
        .map(Json)
        .map_err(topic_error_to_status)
}
