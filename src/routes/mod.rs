//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers); tighten for production
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // Assessment
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/assess", post(http::http_post_assess))
        .route("/api/v1/assess/pronunciation", post(http::http_post_assess_pronunciation))
        .route("/api/v1/assess/vocabulary", post(http::http_post_assess_vocabulary))
        .route("/api/v1/assess/grammar", post(http::http_post_assess_grammar))
        // Tutor
        .route("/api/v1/grammar/correct", post(http::http_post_grammar_correct))
        .route("/api/v1/conversation", post(http::http_post_conversation))
        // Practice content
        .route("/api/v1/topics", get(http::http_get_topics))
        .route("/api/v1/phrases", get(http::http_get_phrases))
        .route("/api/v1/sounds", get(http::http_get_sounds))
        // Exercises & vocabulary games
        .route("/api/v1/exercises", get(http::http_get_exercises))
        .route("/api/v1/exercises/:id/answer", post(http::http_post_exercise_answer))
        .route("/api/v1/vocabulary/word-of-day", get(http::http_get_word_of_day))
        .route("/api/v1/vocabulary/quiz", get(http::http_get_quiz))
        // Sessions
        .route("/api/v1/sessions", post(http::http_post_session))
        .route(
            "/api/v1/sessions/:id",
            get(http::http_get_session).delete(http::http_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/vocabulary",
            get(http::http_get_vocabulary).post(http::http_post_vocabulary),
        )
        .route("/api/v1/sessions/:id/vocabulary/mastery", put(http::http_put_mastery))
        .route("/api/v1/sessions/:id/history", get(http::http_get_history))
        .route("/api/v1/sessions/:id/achievements", get(http::http_get_achievements))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(Arc::new(AppState::from_config(AgentConfig::default(), None)))
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body readable");
        serde_json::from_slice(&bytes).expect("JSON body")
    }

    #[tokio::test]
    async fn health_reports_no_generator() {
        let res = app()
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::OK);
        let v = body_json(res).await;
        assert_eq!(v["ok"], true);
        assert!(v["generator"].is_null());
    }

    #[tokio::test]
    async fn assess_returns_all_three_reports() {
        let req = Request::post("/api/v1/assess")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text":""}"#))
            .expect("request");
        let res = app().oneshot(req).await.expect("response");
        assert_eq!(res.status(), StatusCode::OK);

        let v = body_json(res).await;
        assert_eq!(v["pronunciation"]["word_count"], 0);
        assert_eq!(v["pronunciation"]["average_word_length"], 0.0);
        assert_eq!(v["pronunciation"]["placeholder"]["fluency_score"], 78.0);
        assert_eq!(v["vocabulary"]["vocabulary_score"], 0.0);
        assert_eq!(v["grammar"]["grammar_score"], 100.0);
    }

    #[tokio::test]
    async fn exercise_answer_route_checks_case_insensitively() {
        let req = Request::post("/api/v1/exercises/tenses-1/answer")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"answer":"GO"}"#))
            .expect("request");
        let res = app().oneshot(req).await.expect("response");
        assert_eq!(res.status(), StatusCode::OK);
        let v = body_json(res).await;
        assert_eq!(v["correct"], true);
        assert_eq!(v["explanation"], "Present simple for habits");

        let res = app()
            .oneshot(Request::get("/api/v1/vocabulary/quiz?count=2").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(body_json(res).await.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let res = app()
            .oneshot(
                Request::get("/api/v1/sessions/6f1c1f8e-3f1a-4a4b-9d55-0d1b8a2f4c11")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let v = body_json(res).await;
        assert!(v["error"].as_str().unwrap_or_default().starts_with("unknown session"));
    }
}
