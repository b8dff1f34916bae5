//! Backend adapter over the `log` crate macros.
//!
//! Entries are forwarded to whatever global `log` logger the host
//! application installed. Do not combine with an active
//! [`redirect_std_log`](crate::stdlog::redirect_std_log): captured
//! records would be fed straight back into this adapter's output path.
//!
//! # Design Decisions
//! - `set_level` maps onto `log::set_max_level`, the crate's own global
//!   gate, so threshold state lives where the engine expects it
//! - Fields are rendered as a `key=value` suffix: the plain `log` record
//!   format has no structured field transport

use log::LevelFilter;

use crate::level::Level;
use crate::logger::{
    render_args, render_fields, render_format, FieldMap, LogError, Logger, Value,
};

/// Convert a facade level to a `log` record level. `Quiet` marks
/// suppression, not severity, and has no record equivalent.
pub fn convert_level(level: Level) -> Result<log::Level, LogError> {
    match level {
        Level::Debug => Ok(log::Level::Debug),
        Level::Info => Ok(log::Level::Info),
        Level::Warn => Ok(log::Level::Warn),
        Level::Error => Ok(log::Level::Error),
        Level::Quiet => Err(LogError::LevelNotRepresentable(level)),
    }
}

/// Maximum-level filter matching a facade threshold. Unlike event
/// levels, every threshold is representable: `Quiet` is `Off`.
pub fn convert_filter(level: Level) -> LevelFilter {
    match level {
        Level::Debug => LevelFilter::Debug,
        Level::Info => LevelFilter::Info,
        Level::Warn => LevelFilter::Warn,
        Level::Error => LevelFilter::Error,
        Level::Quiet => LevelFilter::Off,
    }
}

/// Logger forwarding through the global `log` crate logger.
#[derive(Debug, Clone, Default)]
pub struct LogCrateLogger {
    fields: FieldMap,
}

impl LogCrateLogger {
    /// Adapter with no attached fields. Threshold gating belongs to the
    /// `log` crate's max-level filter.
    pub fn new() -> Self {
        Self::default()
    }

    fn child(&self, extra: FieldMap) -> LogCrateLogger {
        let mut fields = self.fields.clone();
        fields.extend(extra);
        LogCrateLogger { fields }
    }

    fn decorate(&self, message: String) -> String {
        if self.fields.is_empty() {
            message
        } else {
            format!("{} {}", message, render_fields(&self.fields))
        }
    }

    fn emit(&self, level: Level, message: String) {
        let Ok(record_level) = convert_level(level) else {
            return;
        };
        log::log!(record_level, "{}", self.decorate(message));
    }
}

impl Logger for LogCrateLogger {
    fn set_level(&self, level: Level) -> Result<(), LogError> {
        log::set_max_level(convert_filter(level));
        Ok(())
    }

    fn debug(&self, args: &[Value]) {
        self.emit(Level::Debug, render_args(args));
    }

    fn debugf(&self, format: &str, args: &[Value]) {
        self.emit(Level::Debug, render_format(format, args));
    }

    fn info(&self, args: &[Value]) {
        self.emit(Level::Info, render_args(args));
    }

    fn infof(&self, format: &str, args: &[Value]) {
        self.emit(Level::Info, render_format(format, args));
    }

    fn warn(&self, args: &[Value]) {
        self.emit(Level::Warn, render_args(args));
    }

    fn warnf(&self, format: &str, args: &[Value]) {
        self.emit(Level::Warn, render_format(format, args));
    }

    fn error(&self, args: &[Value]) {
        self.emit(Level::Error, render_args(args));
    }

    fn errorf(&self, format: &str, args: &[Value]) {
        self.emit(Level::Error, render_format(format, args));
    }

    fn with_field(&self, key: &str, value: Value) -> Box<dyn Logger> {
        let mut extra = FieldMap::new();
        extra.insert(key.to_string(), value);
        Box::new(self.child(extra))
    }

    fn with_fields(&self, fields: FieldMap) -> Box<dyn Logger> {
        Box::new(self.child(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_level() {
        assert_eq!(convert_level(Level::Debug).unwrap(), log::Level::Debug);
        assert_eq!(convert_level(Level::Info).unwrap(), log::Level::Info);
        assert_eq!(convert_level(Level::Warn).unwrap(), log::Level::Warn);
        assert_eq!(convert_level(Level::Error).unwrap(), log::Level::Error);
        assert!(matches!(
            convert_level(Level::Quiet),
            Err(LogError::LevelNotRepresentable(Level::Quiet))
        ));
    }

    #[test]
    fn test_convert_filter_maps_quiet_to_off() {
        assert_eq!(convert_filter(Level::Debug), LevelFilter::Debug);
        assert_eq!(convert_filter(Level::Error), LevelFilter::Error);
        assert_eq!(convert_filter(Level::Quiet), LevelFilter::Off);
    }

    #[test]
    fn test_decorate_appends_field_suffix() {
        let log = LogCrateLogger::new();
        assert_eq!(log.decorate("bare".to_string()), "bare");

        let chained = log.child({
            let mut fields = FieldMap::new();
            fields.insert("req".to_string(), json!("42"));
            fields
        });
        assert_eq!(chained.decorate("done".to_string()), "done req=42");
    }

    #[test]
    fn test_with_field_does_not_mutate_receiver() {
        let log = LogCrateLogger::new();
        let _child = Logger::with_field(&log, "k", json!(1));
        assert!(log.fields.is_empty());
    }
}
