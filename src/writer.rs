//! Byte-stream adapter onto a logger.
//!
//! # Design Decisions
//! - Writes never fail and always report the full buffer as consumed:
//!   this is best-effort diagnostic capture, not reliable delivery
//! - Content is trimmed at both ends so line-oriented writers do not
//!   produce entries carrying their trailing newline

use std::io;

use crate::dispatch::{log_fn, LogFn};
use crate::level::Level;
use crate::logger::{Logger, Value};

/// Adapts a [`Logger`] at a fixed level into an [`io::Write`] sink.
///
/// Each write becomes one logging call whose single argument is the
/// trimmed buffer content.
pub struct LevelWriter {
    logger: Box<dyn Logger>,
    log: LogFn,
    on_close: Option<Box<dyn FnMut() -> io::Result<()> + Send>>,
}

impl LevelWriter {
    /// Writer logging everything at `at` on `logger`.
    pub fn new(logger: Box<dyn Logger>, at: Level) -> Self {
        Self {
            logger,
            log: log_fn(at),
            on_close: None,
        }
    }

    /// Same as [`new`](Self::new), with a callback invoked by
    /// [`close`](Self::close).
    pub fn with_close(
        logger: Box<dyn Logger>,
        at: Level,
        on_close: impl FnMut() -> io::Result<()> + Send + 'static,
    ) -> Self {
        Self {
            logger,
            log: log_fn(at),
            on_close: Some(Box::new(on_close)),
        }
    }

    /// Invoke the close callback, if any.
    pub fn close(mut self) -> io::Result<()> {
        match self.on_close.take() {
            Some(mut on_close) => on_close(),
            None => Ok(()),
        }
    }
}

impl io::Write for LevelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let trimmed = text.trim();
        (self.log)(self.logger.as_ref(), &[Value::String(trimmed.to_string())]);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
