//! HTTP API integration tests
//!
//! Drive the full router in-process with `tower::ServiceExt::oneshot` and a
//! recording fake provider.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use push_gateway::config::Settings;
use push_gateway::dispatch::DispatchService;
use push_gateway::provider::PushTarget;
use push_gateway::registry::TokenRegistry;
use push_gateway::server::{create_app, AppState};

use common::RecordingProvider;

fn create_test_app(provider: Arc<RecordingProvider>, settings: Settings) -> Router {
    let dispatcher = Arc::new(DispatchService::new(Arc::new(TokenRegistry::new()), provider));
    create_app(AppState::with_dispatcher(settings, dispatcher))
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_ping() {
    let app = create_test_app(RecordingProvider::succeeding("msg-1"), Settings::default());

    let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "pong"}));
}

#[tokio::test]
async fn test_register_then_send_user() {
    let provider = RecordingProvider::succeeding("msg-1");
    let app = create_test_app(provider.clone(), Settings::default());

    let (status, body) = call(
        &app,
        json_request("/register", json!({"user_id": "user_1", "token": "tok-abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully");

    let (status, body) = call(
        &app,
        json_request(
            "/send-user",
            json!({"target_user_id": "user_1", "title": "Hi", "body": "Body"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sent");
    assert_eq!(body["target_user"], "user_1");
    assert_eq!(body["message_id"], "msg-1");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target, PushTarget::Token("tok-abc".to_string()));
}

#[tokio::test]
async fn test_send_user_not_registered_is_404() {
    let provider = RecordingProvider::succeeding("msg-1");
    let app = create_test_app(provider.clone(), Settings::default());

    let (status, body) = call(
        &app,
        json_request(
            "/send-user",
            json!({"target_user_id": "user_404", "title": "Hi", "body": "Body"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"].as_str().unwrap().contains("user_404"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_send_user_provider_error_is_500() {
    let provider = RecordingProvider::failing("SenderId mismatch");
    let app = create_test_app(provider, Settings::default());

    call(
        &app,
        json_request("/register", json!({"user_id": "user_1", "token": "tok-abc"})),
    )
    .await;
    let (status, body) = call(
        &app,
        json_request(
            "/send-user",
            json!({"target_user_id": "user_1", "title": "Hi", "body": "Body"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("SenderId mismatch"));
}

#[tokio::test]
async fn test_broadcast() {
    let provider = RecordingProvider::succeeding("msg-topic");
    let app = create_test_app(provider.clone(), Settings::default());

    let (status, body) = call(
        &app,
        json_request(
            "/broadcast",
            json!({"topic": "news", "title": "Hi", "body": "Body", "data": {"screen": "news"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "broadcast_sent");
    assert_eq!(body["topic"], "news");

    let calls = provider.calls();
    assert_eq!(calls[0].target, PushTarget::Topic("news".to_string()));
    assert_eq!(calls[0].data.get("screen").map(String::as_str), Some("news"));
}

#[tokio::test]
async fn test_null_data_uses_configured_defaults() {
    let provider = RecordingProvider::succeeding("msg-1");
    let app = create_test_app(provider.clone(), Settings::default());

    call(
        &app,
        json_request("/register", json!({"user_id": "user_1", "token": "tok-abc"})),
    )
    .await;
    let (status, _) = call(
        &app,
        json_request(
            "/send-user",
            json!({"target_user_id": "user_1", "title": "Hi", "body": "Body", "data": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        json_request(
            "/broadcast",
            json!({"topic": "news", "title": "Hi", "body": "Body", "data": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let calls = provider.calls();
    assert_eq!(calls[0].data.get("screen").map(String::as_str), Some("chat"));
    assert_eq!(calls[1].data.get("screen").map(String::as_str), Some("auction"));
}

#[tokio::test]
async fn test_broadcast_provider_error_is_500() {
    let app = create_test_app(RecordingProvider::failing("invalid topic"), Settings::default());

    let (status, _) = call(
        &app,
        json_request("/broadcast", json!({"topic": "news", "title": "Hi", "body": "Body"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_malformed_bodies_are_400() {
    let provider = RecordingProvider::succeeding("msg-1");
    let app = create_test_app(provider.clone(), Settings::default());

    // Missing field
    let (status, body) = call(&app, json_request("/register", json!({"user_id": "user_1"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Wrong type
    let (status, _) = call(
        &app,
        json_request("/broadcast", json!({"topic": 7, "title": "Hi", "body": "Body"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Not JSON at all
    let request = Request::builder()
        .method(Method::POST)
        .uri("/send-user")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing content type
    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .body(Body::from(r#"{"user_id":"u","token":"t"}"#))
        .unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_empty_fields_are_400() {
    let provider = RecordingProvider::succeeding("msg-1");
    let app = create_test_app(provider.clone(), Settings::default());

    let (status, body) = call(
        &app,
        json_request("/register", json!({"user_id": "", "token": "tok-abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "user_id must not be empty");

    let (status, _) = call(
        &app,
        json_request(
            "/send-user",
            json!({"target_user_id": "user_1", "title": "", "body": "Body"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        json_request("/broadcast", json!({"topic": "", "title": "Hi", "body": "Body"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let mut settings = Settings::default();
    settings.api.key = Some("secret".to_string());
    let app = create_test_app(RecordingProvider::succeeding("msg-1"), settings);

    let (status, _) = call(
        &app,
        json_request("/register", json!({"user_id": "user_1", "token": "tok-abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut request = json_request("/register", json!({"user_id": "user_1", "token": "tok-abc"}));
    request
        .headers_mut()
        .insert("X-API-Key", "secret".parse().unwrap());
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    // Ping stays open
    let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_stats() {
    let app = create_test_app(RecordingProvider::succeeding("msg-1"), Settings::default());

    call(
        &app,
        json_request("/register", json!({"user_id": "user_1", "token": "tok-abc"})),
    )
    .await;
    call(
        &app,
        json_request(
            "/send-user",
            json!({"target_user_id": "user_2", "title": "Hi", "body": "Body"}),
        ),
    )
    .await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["provider"], "recording");
    assert_eq!(body["registered_users"], 1);

    let request = Request::builder().uri("/stats").body(Body::empty()).unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dispatch"]["registrations"], 1);
    assert_eq!(body["dispatch"]["user_sends"], 1);
    assert_eq!(body["dispatch"]["user_not_found"], 1);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_test_app(RecordingProvider::succeeding("msg-1"), Settings::default());

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("push_gateway_registered_users"));
}

#[tokio::test]
async fn test_debug_endpoint_not_exposed() {
    let app = create_test_app(RecordingProvider::succeeding("msg-1"), Settings::default());

    let request = Request::builder().uri("/msg-custom").body(Body::empty()).unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
