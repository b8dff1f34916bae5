//! Per-request field accumulation.
//!
//! Handlers pull [`LogContext`] out of the request extensions and attach
//! fields or errors; the middleware folds the accumulated state into the
//! single entry it emits when the request completes.

use std::error::Error as StdError;
use std::sync::{Arc, Mutex, PoisonError};

use crate::logger::{FieldMap, Value};

#[derive(Default)]
struct ContextInner {
    fields: FieldMap,
    error: Option<String>,
}

/// Shared accumulator living in the request extensions. Clones share
/// state.
#[derive(Clone, Default)]
pub struct LogContext {
    inner: Arc<Mutex<ContextInner>>,
}

impl LogContext {
    /// Attach one field to the request's log entry. Last write wins on
    /// key collision.
    pub fn add_field(&self, key: &str, value: Value) {
        self.lock().fields.insert(key.to_string(), value);
    }

    /// Attach an error to the request's log entry. A second error chains
    /// onto the first as `"new: old"`.
    pub fn add_error(&self, err: &dyn StdError) {
        let mut inner = self.lock();
        inner.error = Some(match inner.error.take() {
            Some(previous) => format!("{}: {}", err, previous),
            None => err.to_string(),
        });
    }

    /// Drain the accumulated fields and error.
    pub(crate) fn take(&self) -> (FieldMap, Option<String>) {
        let mut inner = self.lock();
        (std::mem::take(&mut inner.fields), inner.error.take())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ContextInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
