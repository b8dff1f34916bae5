//! Capture of the process-wide `log` crate logger.
//!
//! # Responsibilities
//! - Install, once per process, a bridge receiving global `log` records
//! - Route captured records through a [`LevelWriter`] into a [`Logger`]
//! - Restore stderr passthrough via the returned closure
//!
//! # Design Decisions
//! - The bridge target is process-global mutable state: only one
//!   redirection can be active and undone correctly at a time, and
//!   redirect/restore pairs must not race each other
//! - While no redirection is active, captured records fall through to
//!   stderr, matching the standard logger's usual destination

use std::io::Write;
use std::sync::{Mutex, OnceLock, PoisonError};

use log::LevelFilter;

use crate::level::Level;
use crate::logger::{LogError, Logger, Value};
use crate::writer::LevelWriter;

/// Field attached to every captured record.
const STDLOG_FIELD_KEY: &str = "stdlog";
const STDLOG_FIELD_VALUE: &str = "unhandled call to standard log package";

static TARGET: Mutex<Option<LevelWriter>> = Mutex::new(None);
static BRIDGE: OnceLock<bool> = OnceLock::new();

struct StdLogBridge;

impl log::Log for StdLogBridge {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        // The redirected logger applies its own threshold.
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let mut target = TARGET.lock().unwrap_or_else(PoisonError::into_inner);
        match target.as_mut() {
            Some(writer) => {
                // Render first: write_fmt would issue one write per
                // format fragment, splitting a single record into
                // several entries. One record is one logging call.
                let message = record.args().to_string();
                // The writer never fails; ignore the Ok(length).
                let _ = writer.write(message.as_bytes());
            }
            None => eprintln!("{}", record.args()),
        }
    }

    fn flush(&self) {}
}

fn install_bridge() -> Result<(), LogError> {
    let installed =
        BRIDGE.get_or_init(|| log::set_boxed_logger(Box::new(StdLogBridge)).is_ok());
    if !*installed {
        return Err(LogError::StdLoggerAlreadySet);
    }
    Ok(())
}

/// Redirects global `log` crate records to `logger` at level `at`, each
/// tagged with a `stdlog` field. Returns the restoration closure, the
/// only sanctioned teardown path: calling it reverts the bridge to
/// stderr passthrough and reinstates the max-level filter in place
/// before the redirection.
///
/// Fails if another global `log` logger was installed before the first
/// redirection. Not safe for concurrent use: at most one redirection may
/// be in flight at a time.
pub fn redirect_std_log(
    logger: &dyn Logger,
    at: Level,
) -> Result<impl FnOnce(), LogError> {
    let previous_filter = log::max_level();
    install_bridge()?;
    // Let everything through; gating happens in the redirected logger.
    log::set_max_level(LevelFilter::Trace);

    let derived = logger.with_field(
        STDLOG_FIELD_KEY,
        Value::String(STDLOG_FIELD_VALUE.to_string()),
    );
    *TARGET.lock().unwrap_or_else(PoisonError::into_inner) =
        Some(LevelWriter::new(derived, at));

    Ok(move || {
        *TARGET.lock().unwrap_or_else(PoisonError::into_inner) = None;
        log::set_max_level(previous_filter);
    })
}
