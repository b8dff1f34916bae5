//! Backend adapter over the `tracing` ecosystem.
//!
//! # Responsibilities
//! - Satisfy the Logger contract on top of `tracing` events
//! - Build a `tracing-subscriber` formatter from [`LogConfig`]
//!
//! # Design Decisions
//! - The adapter keeps its own atomic threshold, shared by all handles
//!   derived from the same root: a global subscriber cannot be
//!   reconfigured per handle, so gating happens before emission
//! - Fields accumulate by value in each handle and are rendered into the
//!   event message; tracing spans are scoped to a stack frame and do not
//!   fit the chaining contract, whose handles are ordinary values

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, FORMATTER_JSON};
use crate::level::Level;
use crate::logger::{
    render_args, render_fields, render_format, FieldMap, LogError, Logger, Value,
};

/// Convert a facade level to a tracing event level. `Quiet` marks
/// suppression, not severity, and has no event equivalent.
pub fn convert_level(level: Level) -> Result<tracing::Level, LogError> {
    match level {
        Level::Debug => Ok(tracing::Level::DEBUG),
        Level::Info => Ok(tracing::Level::INFO),
        Level::Warn => Ok(tracing::Level::WARN),
        Level::Error => Ok(tracing::Level::ERROR),
        Level::Quiet => Err(LogError::LevelNotRepresentable(level)),
    }
}

fn level_from_rank(rank: u8) -> Level {
    match rank {
        0 => Level::Debug,
        1 => Level::Info,
        2 => Level::Warn,
        3 => Level::Error,
        _ => Level::Quiet,
    }
}

/// Filter directive matching a facade level.
fn filter_directive(level: Level) -> &'static str {
    match level {
        Level::Quiet => "off",
        other => other.as_str(),
    }
}

/// Logger emitting `tracing` events.
///
/// Handles derived through `with_field`/`with_fields` share the root's
/// threshold, so `set_level` on any handle applies to the whole family.
pub struct TracingLogger {
    level: Arc<AtomicU8>,
    fields: FieldMap,
}

impl TracingLogger {
    /// Adapter with the given initial threshold. Assumes a subscriber is
    /// already installed.
    pub fn new(level: Level) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(level as u8)),
            fields: FieldMap::new(),
        }
    }

    /// Validate `config`, install a global fmt subscriber accordingly,
    /// and return an adapter thresholded at the configured verbosity.
    pub fn from_config(config: &LogConfig) -> Result<Self, LogError> {
        config.validate()?;
        let level = config.level()?;
        init_subscriber(config, level)?;
        Ok(Self::new(level))
    }

    fn threshold(&self) -> Level {
        level_from_rank(self.level.load(Ordering::Relaxed))
    }

    fn child(&self, extra: FieldMap) -> TracingLogger {
        let mut fields = self.fields.clone();
        fields.extend(extra);
        TracingLogger {
            level: self.level.clone(),
            fields,
        }
    }

    fn emit(&self, level: Level, message: String) {
        if level < self.threshold() {
            return;
        }

        let message = if self.fields.is_empty() {
            message
        } else {
            format!("{} {}", message, render_fields(&self.fields))
        };

        // Event macros require a const level, hence the dispatch.
        match level {
            Level::Debug => tracing::debug!("{}", message),
            Level::Info => tracing::info!("{}", message),
            Level::Warn => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
            Level::Quiet => {}
        }
    }
}

fn init_subscriber(config: &LogConfig, level: Level) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let writer = match config.output.as_str() {
        "" | "stdout" => BoxMakeWriter::new(std::io::stdout),
        "stderr" => BoxMakeWriter::new(std::io::stderr),
        path => {
            let file = std::fs::File::create(path).map_err(|source| LogError::OutputPath {
                path: path.to_string(),
                source,
            })?;
            BoxMakeWriter::new(Arc::new(file))
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.with_color);

    let installed = if config.formatter == FORMATTER_JSON {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|_| LogError::SubscriberAlreadySet)
}

impl Logger for TracingLogger {
    fn set_level(&self, level: Level) -> Result<(), LogError> {
        self.level.store(level as u8, Ordering::Relaxed);
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
