//! In-memory reference backend.
//!
//! # Responsibilities
//! - Implement the Logger contract with fully inspectable state
//! - Record entries append-only, gated by the current threshold
//! - Propagate child entries up the creator chain, re-merging fields and
//!   re-applying each ancestor's own threshold
//!
//! # Design Decisions
//! - Children hold a Weak back-reference: a parent is never kept alive
//!   solely because a derived handle still exists
//! - Fields are inherited representationally (read through the
//!   back-reference at log time), not copied at derivation time
//! - On key collision a handle's own fields override descendant-supplied
//!   values: the handle closer to the sink reapplies its view last

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::level::Level;
use crate::logger::{FieldMap, LogError, Logger, Value};

/// One recorded log call.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Level the call was made at.
    pub level: Level,
    /// Format template; empty for the unformatted variants.
    pub format: String,
    /// Positional arguments as supplied.
    pub args: Vec<Value>,
    /// Merged field view at log time.
    pub fields: FieldMap,
}

struct State {
    level: Mutex<Level>,
    fields: Mutex<FieldMap>,
    entries: Mutex<Vec<Entry>>,
    parent: Option<Weak<State>>,
}

/// Backend that records entries in memory.
///
/// Doubles as the test logger for verifying contract compliance of
/// consumers. Clones share state, so a test can keep one handle for
/// inspection while handing another to the code under test.
///
/// Individual operations are internally locked, but calls from threads
/// sharing a handle still interleave freely; callers that need a
/// deterministic entry order must serialize themselves.
#[derive(Clone)]
pub struct InMemoryLogger {
    state: Arc<State>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryLogger {
    /// Root handle with the given initial threshold, no fields, no entries.
    pub fn new(level: Level) -> Self {
        Self {
            state: Arc::new(State {
                level: Mutex::new(level),
                fields: Mutex::new(FieldMap::new()),
                entries: Mutex::new(Vec::new()),
                parent: None,
            }),
        }
    }

    /// Snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<Entry> {
        lock(&self.state.entries).clone()
    }

    /// Snapshot of this handle's own (direct) fields.
    pub fn fields(&self) -> FieldMap {
        lock(&self.state.fields).clone()
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        *lock(&self.state.level)
    }

    /// Clear fields and entries. Supplying a level also replaces the
    /// threshold; `None` keeps the existing one.
    pub fn reset(&self, level: Option<Level>) {
        lock(&self.state.fields).clear();
        lock(&self.state.entries).clear();
        if let Some(level) = level {
            *lock(&self.state.level) = level;
        }
    }

    /// Child handle carrying one additional field. The receiver is
    /// unchanged.
    pub fn with_field(&self, key: &str, value: Value) -> InMemoryLogger {
        let mut fields = FieldMap::new();
        fields.insert(key.to_string(), value);
        self.child(fields)
    }

    /// Child handle carrying multiple additional fields. The receiver is
    /// unchanged.
    pub fn with_fields(&self, fields: FieldMap) -> InMemoryLogger {
        self.child(fields)
    }

    fn child(&self, fields: FieldMap) -> InMemoryLogger {
        InMemoryLogger {
            state: Arc::new(State {
                level: Mutex::new(self.level()),
                fields: Mutex::new(fields),
                entries: Mutex::new(Vec::new()),
                parent: Some(Arc::downgrade(&self.state)),
            }),
        }
    }
}

impl State {
    /// Merge inherited fields under this handle's own, record the entry
    /// if the threshold allows it, then walk up to the creator so every
    /// ancestor re-evaluates the call against its own state.
    fn log(&self, inherited: &FieldMap, level: Level, format: &str, args: &[Value]) {
        let mut merged = inherited.clone();
        {
            let own = lock(&self.fields);
            for (key, value) in own.iter() {
                merged.insert(key.clone(), value.clone());
            }
        }

        if level >= *lock(&self.level) {
            lock(&self.entries).push(Entry {
                level,
                format: format.to_string(),
                args: args.to_vec(),
                fields: merged.clone(),
            });
        }

        if let Some(parent) = self.parent.as_ref().and_then(Weak::upgrade) {
            parent.log(&merged, level, format, args);
        }
    }
}

impl Logger for InMemoryLogger {
    fn set_level(&self, level: Level) -> Result<(), LogError> {
        *lock(&self.state.level) = level;
        Ok(())
    }

    fn debug(&self, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Debug, "", args);
    }

    fn debugf(&self, format: &str, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Debug, format, args);
    }

    fn info(&self, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Info, "", args);
    }

    fn infof(&self, format: &str, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Info, format, args);
    }

    fn warn(&self, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Warn, "", args);
    }

    fn warnf(&self, format: &str, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Warn, format, args);
    }

    fn error(&self, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Error, "", args);
    }

    fn errorf(&self, format: &str, args: &[Value]) {
        self.state.log(&FieldMap::new(), Level::Error, format, args);
    }

    fn with_field(&self, key: &str, value: Value) -> Box<dyn Logger> {
        Box::new(InMemoryLogger::with_field(self, key, value))
    }

    fn with_fields(&self, fields: FieldMap) -> Box<dyn Logger> {
        Box::new(InMemoryLogger::with_fields(self, fields))
    }
}
