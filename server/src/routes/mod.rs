//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API for the knowledge base and the agent
//! playground under a single Axum router. Errors are returned as bare
//! status codes; the service layer logs the structured error code.

pub mod playground;
pub mod topics;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/topics", get(topics::list_topics).post(topics::create_topic))
        .route("/api/topics/view", patch(topics::update_view))
        .route("/api/topics/collapse-all", post(topics::collapse_all))
        .route(
            "/api/topics/{id}",
            get(topics::get_topic)
                .patch(topics::patch_topic)
                .delete(topics::delete_topic),
        )
        .route("/api/topics/{id}/duplicate", post(topics::duplicate_topic))
        .route("/api/topics/{id}/toggle", post(topics::toggle_topic))
        .route(
            "/api/topics/{id}/queries/{index}",
            put(topics::edit_query).delete(topics::remove_query),
        )
        .route("/api/chat", post(playground::open_chat))
        .route(
            "/api/chat/{id}",
            get(playground::get_chat)
                .patch(playground::configure_chat)
                .delete(playground::close_chat),
        )
        .route("/api/chat/{id}/messages", post(playground::send_chat_message))
        .route("/api/chat/{id}/reset", post(playground::reset_chat))
        .route("/api/call", post(playground::open_call))
        .route(
            "/api/call/{id}",
            get(playground::get_call)
                .patch(playground::configure_call)
                .delete(playground::close_call),
        )
        .route("/api/call/{id}/start", post(playground::start_call))
        .route("/api/call/{id}/end", post(playground::end_call))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
