//! End-to-end tests of the request logging middleware.

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router};
use serde_json::json;
use tower::ServiceExt;

use unilog::middleware::{log_requests, LogContext};
use unilog::{InMemoryLogger, Level, Logger, FIELD_ERROR_KEY};

#[derive(Debug)]
struct Eww;

impl fmt::Display for Eww {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("eww")
    }
}

impl std::error::Error for Eww {}

fn app(logger: &InMemoryLogger) -> Router {
    let shared: Arc<dyn Logger> = Arc::new(logger.clone());

    async fn ok_handler(Extension(ctx): Extension<LogContext>) -> &'static str {
        ctx.add_field("key", json!("value"));
        "wrote"
    }

    async fn teapot_handler() -> StatusCode {
        StatusCode::IM_A_TEAPOT
    }

    async fn fail_handler(Extension(ctx): Extension<LogContext>) -> StatusCode {
        ctx.add_error(&Eww);
        StatusCode::INTERNAL_SERVER_ERROR
    }

    Router::new()
        .route("/ok", get(ok_handler))
        .route("/teapot", get(teapot_handler))
        .route("/fail", get(fail_handler))
        .layer(axum::middleware::from_fn_with_state(shared, log_requests))
}

#[tokio::test]
async fn test_one_entry_per_request_with_context_fields() {
    let logger = InMemoryLogger::new(Level::Debug);
    let response = app(&logger)
        .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let entries = logger.entries();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.level, Level::Info);
    assert_eq!(entry.args, vec![json!("http request")]);
    assert_eq!(entry.fields.get("method"), Some(&json!("GET")));
    assert_eq!(entry.fields.get("path"), Some(&json!("/ok")));
    assert_eq!(entry.fields.get("status"), Some(&json!(200)));
    assert_eq!(entry.fields.get("key"), Some(&json!("value")));
    assert!(entry.fields.contains_key("duration_ms"));
    assert!(entry.fields.contains_key("request_id"));
    assert!(!entry.fields.contains_key(FIELD_ERROR_KEY));
}

#[tokio::test]
async fn test_client_error_logs_at_warn() {
    let logger = InMemoryLogger::new(Level::Debug);
    let response = app(&logger)
        .oneshot(
            Request::builder()
                .uri("/teapot")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);

    let entries = logger.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, Level::Warn);
    assert_eq!(entries[0].fields.get("status"), Some(&json!(418)));
}

#[tokio::test]
async fn test_server_error_logs_at_error_with_error_field() {
    let logger = InMemoryLogger::new(Level::Debug);
    let response = app(&logger)
        .oneshot(Request::builder().uri("/fail").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let entries = logger.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, Level::Error);
    assert_eq!(entries[0].fields.get(FIELD_ERROR_KEY), Some(&json!("eww")));
}

#[tokio::test]
async fn test_quiet_logger_records_nothing() {
    let logger = InMemoryLogger::new(Level::Quiet);
    let response = app(&logger)
        .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(logger.entries().is_empty());
}
