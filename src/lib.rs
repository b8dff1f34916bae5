//! Leveled structured-logging facade with pluggable backends.

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod level;
pub mod logger;
pub mod middleware;
pub mod stdlog;
pub mod writer;

pub use backend::memory::{Entry, InMemoryLogger};
pub use backend::noop::NoopLogger;
pub use config::LogConfig;
pub use level::Level;
pub use logger::{FieldMap, LogError, Logger, Value, FIELD_ERROR_KEY};
pub use writer::LevelWriter;
