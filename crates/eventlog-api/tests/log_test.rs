//! Integration tests for the intake route.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use eventlog_api::config::ApiConfig;
use eventlog_core::sink::LoggingSink;
use eventlog_sink::TracingLoggingService;
use eventlog_test_support::RecordingSink;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_single_event_can_be_posted() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, false);

    let (status, json) = common::post_json(
        app,
        common::LOG_URI,
        &json!({ "tags": ["info"], "data": "test message" }),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(json.is_null());
    assert_eq!(sink.log_count(), 1);
}

#[tokio::test]
async fn test_single_invalid_event_returns_400_without_valid_count() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, false);

    let (status, json) =
        common::post_json(app, common::LOG_URI, &json!({ "data": "test message" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "tags is required");
    assert!(json.get("validCount").is_none());
    assert_eq!(sink.log_count(), 0);
}

#[tokio::test]
async fn test_array_of_events_can_be_posted() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, false);

    let (status, _) = common::post_json(
        app,
        common::LOG_URI,
        &json!([
            { "tags": ["info"], "data": "test message 1" },
            { "tags": ["info"], "data": "test message 2" }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(sink.log_count(), 2);
}

#[tokio::test]
async fn test_array_with_invalid_event_reports_events_accepted_before_it() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, false);

    let (status, json) = common::post_json(
        app,
        common::LOG_URI,
        &json!([
            { "tags": ["info"], "data": "test message 1" },
            { "tags": ["info"], "data": "test message 2" },
            { "data": "invalid message" },
            { "tags": ["info"], "data": "test message 3" }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "message": "tags is required", "validCount": 2 }));
    let logged: Vec<_> = sink
        .logged_events()
        .iter()
        .map(|event| event.field("data").cloned())
        .collect();
    assert_eq!(
        logged,
        vec![Some(json!("test message 1")), Some(json!("test message 2"))]
    );
}

#[tokio::test]
async fn test_array_with_invalid_first_event_reports_zero() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, false);

    let (status, json) = common::post_json(
        app,
        common::LOG_URI,
        &json!([{ "data": "invalid" }, { "tags": ["info"] }]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["validCount"], 0);
    assert_eq!(sink.log_count(), 0);
}

#[tokio::test]
async fn test_empty_array_is_accepted() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, false);

    let (status, _) = common::post_json(app, common::LOG_URI, &json!([])).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(sink.validate_count(), 0);
}

#[tokio::test]
async fn test_async_batch_is_accepted_before_it_is_logged() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, true);

    let (status, _) = common::post_json(
        app,
        common::LOG_URI,
        &json!([
            { "tags": ["info"], "data": "test message async 1" },
            { "tags": ["info"], "data": "test message async 2" }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    common::wait_for_log_count(&sink, 2).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(sink.log_count(), 2);

    let mut logged: Vec<_> = sink
        .logged_events()
        .iter()
        .map(|event| event.field("data").cloned())
        .collect();
    logged.sort_by_key(|data| data.as_ref().and_then(|d| d.as_str()).map(str::to_owned));
    assert_eq!(
        logged,
        vec![
            Some(json!("test message async 1")),
            Some(json!("test message async 2"))
        ]
    );
}

#[tokio::test]
async fn test_async_rejection_matches_sync_rejection() {
    let sink = Arc::new(RecordingSink::new());
    let app = common::build_test_app(&sink, true);

    let (status, json) = common::post_json(
        app,
        common::LOG_URI,
        &json!([{ "tags": ["info"] }, { "data": "bad" }, { "tags": ["info"] }]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["validCount"], 1);
    common::wait_for_log_count(&sink, 1).await;
}

#[tokio::test]
async fn test_custom_route_path_is_honoured() {
    let sink = Arc::new(RecordingSink::new());
    let config = ApiConfig {
        log_route_path: "/log".to_owned(),
        async_dispatch: false,
        ..ApiConfig::default()
    };

    let app = common::build_test_app_with_config(&sink, &config);
    let (status, _) = common::post_json(app, "/log", &json!({ "tags": ["info"] })).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let app = common::build_test_app_with_config(&sink, &config);
    let (status, _) = common::post_json(app, common::LOG_URI, &json!({ "tags": ["info"] })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_on_log_route_is_method_not_allowed() {
    let app = common::build_test_app(&Arc::new(RecordingSink::new()), false);

    let (status, _) = common::get_json(app, common::LOG_URI).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_oversized_body_returns_413() {
    let sink = Arc::new(RecordingSink::new());
    let config = ApiConfig {
        max_body_bytes: 64,
        async_dispatch: false,
        ..ApiConfig::default()
    };
    let app = common::build_test_app_with_config(&sink, &config);

    let request = Request::builder()
        .method("POST")
        .uri(common::LOG_URI)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "tags": ["info"], "data": "x".repeat(256) })).unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(sink.validate_count(), 0);
}

#[tokio::test]
async fn test_default_sink_accepts_event_with_timestamp() {
    let service = Arc::new(TracingLoggingService::new());
    let sink: Arc<dyn LoggingSink> = service.clone();
    let config = ApiConfig {
        async_dispatch: false,
        ..ApiConfig::default()
    };
    let app = eventlog_api::build_app(&config, sink).unwrap();

    let (status, _) = common::post_json(
        app,
        common::LOG_URI,
        &json!({ "tags": ["info"], "data": "test message", "ts": "2026-01-15T10:00:00.000Z" }),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(service.event_count(), 1);
    assert_eq!(service.invalid_event_count(), 0);
}

#[tokio::test]
async fn test_default_sink_rejects_bad_tags() {
    let service = Arc::new(TracingLoggingService::new());
    let sink: Arc<dyn LoggingSink> = service.clone();
    let config = ApiConfig {
        async_dispatch: false,
        ..ApiConfig::default()
    };
    let app = eventlog_api::build_app(&config, sink).unwrap();

    let (status, json) = common::post_json(
        app,
        common::LOG_URI,
        &json!([{ "tags": ["info"] }, { "tags": "info" }]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({ "message": "tags must be a non-empty array of strings", "validCount": 1 })
    );
    assert_eq!(service.event_count(), 1);
}
