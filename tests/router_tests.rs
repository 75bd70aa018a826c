use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use tower::ServiceExt;

use polls_web::features::polls::{
    InMemoryQuestionStore, PollViews, Question, QuestionId, QuestionStore, TeraRenderer,
};
use polls_web::server::{AppState, build_router};

fn app() -> Router {
    let store: Arc<dyn QuestionStore> = Arc::new(InMemoryQuestionStore::with_questions([
        Question {
            id: QuestionId(1),
            text: "What's new?".to_string(),
            publication_date: Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
        },
        Question {
            id: QuestionId(2),
            text: "Favourite colour".to_string(),
            publication_date: Utc.with_ymd_and_hms(2026, 2, 11, 18, 30, 0).unwrap(),
        },
    ]));
    let renderer = TeraRenderer::from_templates([
        (
            "polls/index.html",
            include_str!("../templates/polls/index.html"),
        ),
        (
            "polls/detail.html",
            include_str!("../templates/polls/detail.html"),
        ),
    ])
    .expect("bundled templates parse");

    build_router(AppState::new(Arc::new(PollViews::new(
        store,
        Arc::new(renderer),
    ))))
}

async fn send(method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_route_lists_newest_first() {
    let (status, content_type, body) = send(Method::GET, "/polls/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    let newer = body.find("Favourite colour").expect("newer question listed");
    let older = body.find("/polls/1/").expect("older question linked");
    assert!(newer < older);
}

#[tokio::test]
async fn detail_route_renders_question() {
    let (status, _, body) = send(Method::GET, "/polls/2/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Favourite colour</h1>"));
}

#[tokio::test]
async fn detail_route_returns_404_for_unknown_question() {
    let (status, _, body) = send(Method::GET, "/polls/999/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("question 999 does not exist"));
}

#[tokio::test]
async fn results_route_returns_plain_text() {
    let (status, content_type, body) = send(Method::GET, "/polls/42/results/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(body, "You are looking at the results of question 42.");
}

#[tokio::test]
async fn vote_route_accepts_get_and_post() {
    for method in [Method::GET, Method::POST] {
        let (status, _, body) = send(method, "/polls/3/vote/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "You are voting on question 3.");
    }
}

#[tokio::test]
async fn non_numeric_question_id_is_rejected() {
    let (status, _, _) = send(Method::GET, "/polls/abc/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let (status, _, body) = send(Method::GET, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);
}
