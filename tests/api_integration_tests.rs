//! Integration Tests for API Endpoints
//!
//! Drives full request/response cycles through the router, including cache
//! events delivered over POST /messages.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cache_bridge::{api::create_router, cache::LocalCache, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(namespace_aware: bool) -> Router {
    create_router(AppState::new(LocalCache::new(300), namespace_aware))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put(app: &Router, key: &str, value: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/cache/{key}"))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "value": value }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn deliver(app: &Router, content_type: &str, body: impl Into<Body>) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/messages")
                .header("content-type", content_type)
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

// == Cache Endpoint Tests ==

#[tokio::test]
async fn test_put_then_get() {
    let app = create_test_app(true);

    assert_eq!(put(&app, "home", "<html/>").await, StatusCode::OK);

    let (status, json) = get(&app, "/cache/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "home");
    assert_eq!(json["value"], "<html/>");
}

#[tokio::test]
async fn test_get_missing_key_returns_error_body() {
    let app = create_test_app(true);

    let (status, json) = get(&app, "/cache/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

// == Delivery Tests ==

#[tokio::test]
async fn test_namespaced_invalidate_removes_local_key() {
    let app = create_test_app(true);
    put(&app, "home", "<html/>").await;

    let status = deliver(
        &app,
        "application/json",
        json!({ "eventType": 1, "key": "context:home" }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, _) = get(&app, "/cache/home").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["source"]["status"], "up");
    assert_eq!(health["source"]["signals"], 1);
}

#[tokio::test]
async fn test_namespaced_key_kept_when_not_aware() {
    let app = create_test_app(false);
    put(&app, "home", "<html/>").await;

    deliver(
        &app,
        "application/json",
        json!({ "type": 1, "key": "context:home" }).to_string(),
    )
    .await;

    // "context:home" was invalidated, not "home"
    let (status, _) = get(&app, "/cache/home").await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["cache"]["invalidations"], 1);
    assert_eq!(stats["bridge"]["invalidated"], 1);
}

#[tokio::test]
async fn test_slash_key_round_trip_and_invalidate() {
    let app = create_test_app(true);

    assert_eq!(put(&app, "page/home", "<html/>").await, StatusCode::OK);

    let (status, json) = get(&app, "/cache/page/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "page/home");

    deliver(
        &app,
        "application/json",
        json!({ "eventType": 1, "key": "context:page/home" }).to_string(),
    )
    .await;

    let (status, _) = get(&app, "/cache/page/home").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["cache"]["invalidations"], 1);
}

#[tokio::test]
async fn test_flush_signals_source_up_only() {
    let app = create_test_app(true);
    put(&app, "home", "<html/>").await;

    deliver(&app, "application/json", r#"{"eventType":2}"#).await;
    deliver(&app, "application/json", r#"{"eventType":2}"#).await;

    let (status, _) = get(&app, "/cache/home").await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["cache"]["invalidations"], 0);
    assert_eq!(stats["bridge"]["flushed"], 2);

    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["source"]["signals"], 2);
}

#[tokio::test]
async fn test_rejected_messages_are_still_accepted() {
    let app = create_test_app(true);

    assert_eq!(
        deliver(&app, "text/plain", "invalidate home").await,
        StatusCode::ACCEPTED
    );
    assert_eq!(
        deliver(&app, "application/octet-stream", vec![0u8, 1, 2]).await,
        StatusCode::ACCEPTED
    );
    assert_eq!(
        deliver(&app, "application/json", "{broken").await,
        StatusCode::ACCEPTED
    );

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["bridge"]["received"], 3);
    assert_eq!(stats["bridge"]["rejected"], 3);

    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["source"]["status"], "unknown");
}

#[tokio::test]
async fn test_unknown_event_kind_is_ignored() {
    let app = create_test_app(true);
    put(&app, "home", "<html/>").await;

    deliver(
        &app,
        "application/json",
        json!({ "type": 99, "key": "context:home" }).to_string(),
    )
    .await;

    let (status, _) = get(&app, "/cache/home").await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["bridge"]["ignored"], 1);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_reports_namespace_awareness() {
    let (status, json) = get(&create_test_app(true), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["namespace_aware"], true);

    let (_, json) = get(&create_test_app(false), "/health").await;
    assert_eq!(json["namespace_aware"], false);
}
