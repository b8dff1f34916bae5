//! HTTP request logging middleware.
//!
//! # Responsibilities
//! - Log exactly one structured entry per request
//! - Derive the entry level from the response status
//! - Expose a per-request [`LogContext`] for handler-supplied fields
//!
//! # Design Decisions
//! - status >= 500 logs at error, 400..=499 at warn, everything else at
//!   info
//! - The merge goes through with_fields/with_error so every backend sees
//!   the same field view the reference backend records

mod context;

pub use context::LogContext;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::dispatch::log_fn;
use crate::level::Level;
use crate::logger::{Logger, Value};

/// Message of every request entry.
const REQUEST_MESSAGE: &str = "http request";

#[derive(Debug)]
struct AccumulatedError(String);

impl fmt::Display for AccumulatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for AccumulatedError {}

/// Entry level derived from the response status.
pub fn level_for_status(status: u16) -> Level {
    match status {
        500.. => Level::Error,
        400..=499 => Level::Warn,
        _ => Level::Info,
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`: inserts a
/// [`LogContext`] into the request extensions, runs the rest of the
/// stack, then emits one entry carrying the accumulated fields plus
/// `method`, `path`, `status`, `duration_ms`, and a generated
/// `request_id`.
pub async fn log_requests(
    State(logger): State<Arc<dyn Logger>>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = LogContext::default();
    req.extensions_mut().insert(ctx.clone());

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let (mut fields, error) = ctx.take();
    fields.insert("method".to_string(), Value::String(method));
    fields.insert("path".to_string(), Value::String(path));
    fields.insert("status".to_string(), Value::from(status));
    fields.insert(
        "duration_ms".to_string(),
        Value::from(start.elapsed().as_millis() as u64),
    );
    fields.insert("request_id".to_string(), Value::String(request_id));

    let mut entry_logger = logger.with_fields(fields);
    if let Some(message) = error {
        entry_logger = entry_logger.with_error(&AccumulatedError(message));
    }

    log_fn(level_for_status(status))(
        entry_logger.as_ref(),
        &[Value::String(REQUEST_MESSAGE.to_string())],
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_status() {
        assert_eq!(level_for_status(200), Level::Info);
        assert_eq!(level_for_status(204), Level::Info);
        assert_eq!(level_for_status(301), Level::Info);
        assert_eq!(level_for_status(400), Level::Warn);
        assert_eq!(level_for_status(404), Level::Warn);
        assert_eq!(level_for_status(499), Level::Warn);
        assert_eq!(level_for_status(500), Level::Error);
        assert_eq!(level_for_status(503), Level::Error);
    }
}
