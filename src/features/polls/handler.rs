use axum::extract::{Path, State};
use axum::http::{Method, Uri};
use axum::response::Response;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::polls::dto::{QuestionId, RequestContext};
use crate::server::AppState;

fn request_context(method: &Method, uri: &Uri) -> RequestContext {
    RequestContext::new(method.as_str(), uri.path())
}

pub async fn handle_index(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    debug!(target: "polls", "index");
    state.views.index(&request_context(&method, &uri)).await
}

pub async fn handle_detail(
    State(state): State<AppState>,
    Path(question_id): Path<u64>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    debug!(target: "polls", question_id, "detail");
    state
        .views
        .detail(&request_context(&method, &uri), QuestionId(question_id))
        .await
}

pub async fn handle_results(
    State(state): State<AppState>,
    Path(question_id): Path<u64>,
    method: Method,
    uri: Uri,
) -> Response {
    debug!(target: "polls", question_id, "results");
    state
        .views
        .results(&request_context(&method, &uri), QuestionId(question_id))
}

pub async fn handle_vote(
    State(state): State<AppState>,
    Path(question_id): Path<u64>,
    method: Method,
    uri: Uri,
) -> Response {
    debug!(target: "polls", question_id, "vote");
    state
        .views
        .vote(&request_context(&method, &uri), QuestionId(question_id))
}
