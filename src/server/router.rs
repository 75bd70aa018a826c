use axum::Router;
use axum::routing::get;

use crate::features::health::handle_healthcheck;
use crate::features::polls::{handle_detail, handle_index, handle_results, handle_vote};
use crate::server::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_healthcheck))
        .route("/polls/", get(handle_index))
        .route("/polls/:question_id/", get(handle_detail))
        .route("/polls/:question_id/results/", get(handle_results))
        .route("/polls/:question_id/vote/", get(handle_vote).post(handle_vote))
        .with_state(state)
}
