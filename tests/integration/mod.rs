//! Integration tests for the Legal AI backend.
//!
//! These drive the public router end to end without binding a socket.
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use legal_ai_backend::config::{Config, HealthClock};
use legal_ai_backend::App;

const PLACEHOLDER: &str = "Document upload and analysis features are coming soon! \
For now, you can chat with our general AI assistant.";

/// Build a router from default configuration.
fn router() -> Router {
    App::from_config(&Config::default())
        .expect("default configuration is valid")
        .router()
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_chat(body: &str) -> (StatusCode, Value) {
    post_chat_as(Some("application/json"), body).await
}

async fn post_chat_as(content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut request = Request::builder().method(Method::POST).uri("/chat");
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }
    let response = router()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn chat_echoes_user_id() {
    let (status, body) = post_chat(r#"{"message": "hello", "user_id": "u1"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "response": PLACEHOLDER,
            "user_id": "u1",
            "feature_status": "coming_soon"
        })
    );
}

#[tokio::test]
async fn chat_echo_is_exact_for_any_identifier() {
    for user_id in ["", "u1", "  spaced  ", "ünïcødé", "a\"quoted\"id"] {
        let request = json!({ "message": "anything", "user_id": user_id }).to_string();
        let (status, body) = post_chat(&request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], user_id);
        assert_eq!(body["response"], PLACEHOLDER);
        assert_eq!(body["feature_status"], "coming_soon");
    }
}

#[tokio::test]
async fn chat_without_user_id_returns_null() {
    for request in [r#"{"message": "hello"}"#, r#"{"message": "hello", "user_id": null}"#] {
        let (status, body) = post_chat(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], Value::Null);
        assert_eq!(body["response"], PLACEHOLDER);
    }
}

#[tokio::test]
async fn chat_without_message_is_a_validation_error() {
    let (status, body) = post_chat(r#"{"user_id": "u1"}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "detail": [{
                "type": "missing",
                "loc": ["body", "message"],
                "msg": "Field required"
            }]
        })
    );
}

#[tokio::test]
async fn chat_with_non_string_message_is_a_validation_error() {
    let (status, body) = post_chat(r#"{"message": 42}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_type");
    assert!(body.get("feature_status").is_none());
}

#[tokio::test]
async fn chat_with_malformed_json_is_a_validation_error() {
    let (status, body) = post_chat(r#"{"message" "hi"}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "detail": [{
                "type": "json_invalid",
                "loc": ["body", 11],
                "msg": "JSON decode error"
            }]
        })
    );
}

#[tokio::test]
async fn chat_with_plain_text_content_type_is_a_validation_error() {
    let (status, body) = post_chat_as(
        Some("text/plain"),
        r#"{"message": "hi", "user_id": "u"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "detail": [{
                "type": "model_attributes_type",
                "loc": ["body"],
                "msg": "Input should be a valid dictionary or object to extract fields from"
            }]
        })
    );
}

#[tokio::test]
async fn chat_without_content_type_is_parsed_as_json() {
    let (status, body) = post_chat_as(None, r#"{"message": "hi", "user_id": "u"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u");
    assert_eq!(body["feature_status"], "coming_soon");
}

#[tokio::test]
async fn chat_accepts_json_content_type_with_charset() {
    let (status, body) = post_chat_as(
        Some("application/json; charset=utf-8"),
        r#"{"message": "hi", "user_id": "u"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u");
}

#[tokio::test]
async fn health_is_identical_across_calls() {
    let (_, first) = get("/health").await;
    for _ in 0..5 {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, first);
    }
    assert_eq!(
        first,
        json!({
            "status": "healthy",
            "message": "All systems operational",
            "timestamp": "2025-01-01T00:00:00Z"
        })
    );
}

#[tokio::test]
async fn status_endpoints_do_not_accumulate_state() {
    let (_, root_before) = get("/").await;
    let (_, features_before) = get("/features").await;

    post_chat(r#"{"message": "hello", "user_id": "u1"}"#).await;
    post_chat(r#"{"user_id": "u1"}"#).await;

    assert_eq!(get("/").await.1, root_before);
    assert_eq!(get("/features").await.1, features_before);
}

#[tokio::test]
async fn features_lists_available_and_planned() {
    let (status, body) = get("/features").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "available_features": ["Basic chat functionality", "Health monitoring"],
            "coming_soon": [
                "Document upload and analysis",
                "Legal document review",
                "Multi-format file support",
                "Advanced AI responses"
            ],
            "message": "Stay tuned for exciting updates!"
        })
    );
}

#[tokio::test]
async fn live_health_clock_reports_current_time() {
    let config = Config {
        health_clock: HealthClock::Live,
        ..Config::default()
    };
    let app = App::from_config(&config).unwrap();

    let response = app
        .router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_ne!(body["timestamp"], "2025-01-01T00:00:00Z");
    assert_eq!(body["status"], "healthy");
}

#[test]
fn invalid_origin_fails_app_construction() {
    let config = Config {
        cors_allowed_origins: vec!["not an origin".to_string()],
        ..Config::default()
    };

    assert!(App::from_config(&config).is_err());
}

#[test]
fn default_app_allows_exactly_two_origins() {
    let app = App::from_config(&Config::default()).unwrap();
    let origins: Vec<_> = app
        .allowed_origins()
        .iter()
        .map(|o| o.to_str().unwrap().to_string())
        .collect();

    assert_eq!(
        origins,
        vec![
            "http://localhost:5173".to_string(),
            "https://your-vercel-domain.vercel.app".to_string()
        ]
    );
}
