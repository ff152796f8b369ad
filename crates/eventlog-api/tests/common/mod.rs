//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use eventlog_api::build_app;
use eventlog_api::config::ApiConfig;
use eventlog_core::sink::LoggingSink;
use eventlog_test_support::RecordingSink;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Route the integration tests post to.
pub const LOG_URI: &str = "/api/v1/log";

/// Build the full app around `sink`, the same way `main.rs` does.
pub fn build_test_app(sink: &Arc<RecordingSink>, async_dispatch: bool) -> Router {
    let config = ApiConfig {
        async_dispatch,
        ..ApiConfig::default()
    };
    build_test_app_with_config(sink, &config)
}

/// Build the full app around `sink` with an explicit configuration.
pub fn build_test_app_with_config(sink: &Arc<RecordingSink>, config: &ApiConfig) -> Router {
    let sink: Arc<dyn LoggingSink> = sink.clone();
    build_app(config, sink).unwrap()
}

/// Send a POST request with a JSON body. Returns the status and the parsed
/// body, or `Value::Null` when the body is empty.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Wait until `sink` has seen `expected` `log` calls, failing after a second.
pub async fn wait_for_log_count(sink: &RecordingSink, expected: usize) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while sink.log_count() < expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("deferred log calls did not complete");
}
