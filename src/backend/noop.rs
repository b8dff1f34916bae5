//! No-op backend discarding every call.
//!
//! Useful to satisfy a `Logger` dependency in tests or benchmarks where
//! log output would be noise.

use std::error::Error as StdError;

use crate::level::Level;
use crate::logger::{FieldMap, LogError, Logger, Value};

/// Logger that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn set_level(&self, _level: Level) -> Result<(), LogError> {
        Ok(())
    }

    fn debug(&self, _args: &[Value]) {}
    fn debugf(&self, _format: &str, _args: &[Value]) {}

    fn info(&self, _args: &[Value]) {}
    fn infof(&self, _format: &str, _args: &[Value]) {}

    fn warn(&self, _args: &[Value]) {}
    fn warnf(&self, _format: &str, _args: &[Value]) {}

    fn error(&self, _args: &[Value]) {}
    fn errorf(&self, _format: &str, _args: &[Value]) {}

    fn with_field(&self, _key: &str, _value: Value) -> Box<dyn Logger> {
        Box::new(NoopLogger)
    }

    fn with_fields(&self, _fields: FieldMap) -> Box<dyn Logger> {
        Box::new(NoopLogger)
    }

    fn with_error(&self, _err: &dyn StdError) -> Box<dyn Logger> {
        Box::new(NoopLogger)
    }
}
