//! Level-to-method dispatch.
//!
//! Maps a [`Level`] value to the matching logging function on any
//! [`Logger`], so callers can pick a severity as runtime data (e.g.
//! derived from an HTTP status code) without a conditional per call site.

use crate::level::Level;
use crate::logger::{Logger, Value};

/// Unformatted logging function bound to a fixed level.
pub type LogFn = fn(&dyn Logger, &[Value]);

/// Formatted logging function bound to a fixed level.
pub type LogfFn = fn(&dyn Logger, &str, &[Value]);

/// Returns the logging function matching `level`. `Quiet` maps to a
/// function that performs no action.
pub fn log_fn(level: Level) -> LogFn {
    match level {
        Level::Debug => |log, args| log.debug(args),
        Level::Info => |log, args| log.info(args),
        Level::Warn => |log, args| log.warn(args),
        Level::Error => |log, args| log.error(args),
        Level::Quiet => |_, _| {},
    }
}

/// Same as [`log_fn`] for the formatted variants.
pub fn logf_fn(level: Level) -> LogfFn {
    match level {
        Level::Debug => |log, format, args| log.debugf(format, args),
        Level::Info => |log, format, args| log.infof(format, args),
        Level::Warn => |log, format, args| log.warnf(format, args),
        Level::Error => |log, format, args| log.errorf(format, args),
        Level::Quiet => |_, _, _| {},
    }
}
