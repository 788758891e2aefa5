//! Shared helpers for API integration tests.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use pacer_api::config::ServerConfig;
use pacer_api::router::build_app_router;
use pacer_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        rate_window_days: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// GET a path with no caller identity.
pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// GET a path as the given user (sets `x-user-id`).
pub async fn get_as(app: &Router, uri: &str, user_id: i64) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// POST a JSON body with no caller identity.
pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// POST a JSON body as the given user (sets `x-user-id`).
pub async fn post_json_as(app: &Router, uri: &str, user_id: i64, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-user-id", user_id.to_string())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// POST with an empty body as the given user.
pub async fn post_as(app: &Router, uri: &str, user_id: i64) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// DELETE a path as the given user.
pub async fn delete_as(app: &Router, uri: &str, user_id: i64) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
