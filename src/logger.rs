//! The logging contract shared by every backend.
//!
//! # Responsibilities
//! - Define the `Logger` trait that backends implement and consumers use
//! - Fix the field value and field map representation used across the crate
//! - Define the crate-wide error type
//!
//! # Design Decisions
//! - Field values are `serde_json::Value`: printable, comparable, and
//!   serializable without a bespoke sum type
//! - Field maps are `BTreeMap` so merged views iterate deterministically
//! - Logging calls return nothing: diagnostics must never fail the
//!   caller's primary operation

use std::collections::BTreeMap;
use std::error::Error as StdError;

use thiserror::Error;

use crate::level::Level;

/// Field and argument values.
pub type Value = serde_json::Value;

/// Structured context attached to a logger or a single entry.
pub type FieldMap = BTreeMap<String, Value>;

/// Reserved field key populated by [`Logger::with_error`].
pub const FIELD_ERROR_KEY: &str = "error";

/// Errors surfaced at construction or configuration time. Per-call
/// logging errors do not exist by design.
#[derive(Debug, Error)]
pub enum LogError {
    /// The verbosity string does not name a level.
    #[error("unknown level {0:?}")]
    UnknownLevel(String),

    /// The formatter string does not name a known encoder.
    #[error("unknown formatter {0:?}, expected \"json\" or \"console\"")]
    UnknownFormatter(String),

    /// The level has no equivalent in the target backend's level set.
    #[error("level {0} cannot be represented in the target backend")]
    LevelNotRepresentable(Level),

    /// Another global `log` crate logger is already installed.
    #[error("a global standard logger is already installed")]
    StdLoggerAlreadySet,

    /// Another global tracing subscriber is already installed.
    #[error("a global tracing subscriber is already installed")]
    SubscriberAlreadySet,

    /// The configured log output path could not be opened.
    #[error("unable to open log output {path:?}")]
    OutputPath {
        /// The path as configured.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// The capability set every backend satisfies.
///
/// Leveled calls append or drop one entry depending on the backend's
/// current threshold. The `with_*` methods never mutate the receiver:
/// they return a new handle carrying the extra context.
pub trait Logger: Send + Sync {
    /// Update the current threshold. In-process backends never fail;
    /// adapters bridging to engines with incompatible level sets may
    /// return [`LogError::LevelNotRepresentable`].
    fn set_level(&self, level: Level) -> Result<(), LogError>;

    /// Log a message at the 'debug' level.
    fn debug(&self, args: &[Value]);
    /// Log a formatted message at the 'debug' level.
    fn debugf(&self, format: &str, args: &[Value]);

    /// Log a message at the 'info' level.
    fn info(&self, args: &[Value]);
    /// Log a formatted message at the 'info' level.
    fn infof(&self, format: &str, args: &[Value]);

    /// Log a message at the 'warn' level.
    fn warn(&self, args: &[Value]);
    /// Log a formatted message at the 'warn' level.
    fn warnf(&self, format: &str, args: &[Value]);

    /// Log a message at the 'error' level.
    fn error(&self, args: &[Value]);
    /// Log a formatted message at the 'error' level.
    fn errorf(&self, format: &str, args: &[Value]);

    /// Returns a handle carrying one additional field.
    fn with_field(&self, key: &str, value: Value) -> Box<dyn Logger>;

    /// Returns a handle carrying multiple additional fields.
    fn with_fields(&self, fields: FieldMap) -> Box<dyn Logger>;

    /// Returns a handle with the error's display string attached under
    /// [`FIELD_ERROR_KEY`].
    fn with_error(&self, err: &dyn StdError) -> Box<dyn Logger> {
        self.with_field(FIELD_ERROR_KEY, Value::String(err.to_string()))
    }
}

/// Render a value the way it appears in a message: strings verbatim,
/// everything else as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render unformatted arguments, space-separated.
pub(crate) fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a format template, substituting each `{}` with the next
/// argument. Surplus arguments are appended; missing ones leave the
/// placeholder in place so the mismatch stays visible.
pub(crate) fn render_format(format: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;
    let mut args_iter = args.iter();

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args_iter.next() {
            Some(value) => out.push_str(&display_value(value)),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);

    for value in args_iter {
        out.push(' ');
        out.push_str(&display_value(value));
    }
    out
}

/// Render a field map as a `key=value` suffix, deterministically ordered.
pub(crate) fn render_fields(fields: &FieldMap) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, display_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
}
