//! Contract compliance across backends.
//!
//! Every backend must be usable through `Box<dyn Logger>`: leveled and
//! formatted calls, field chaining, and error attachment must all accept
//! the same inputs without panicking.

use serde_json::json;

use unilog::backend::logcrate::LogCrateLogger;
use unilog::backend::tracing::TracingLogger;
use unilog::{FieldMap, InMemoryLogger, Level, Logger, NoopLogger};

fn exercise(log: Box<dyn Logger>) {
    log.set_level(Level::Debug).unwrap();

    log.debug(&[json!("d")]);
    log.debugf("d {}", &[json!(1)]);
    log.info(&[json!("i")]);
    log.infof("i {}", &[json!(2)]);
    log.warn(&[json!("w")]);
    log.warnf("w {}", &[json!(3)]);
    log.error(&[json!("e")]);
    log.errorf("e {}", &[json!(4)]);

    let mut fields = FieldMap::new();
    fields.insert("b".to_string(), json!(2));

    let chained = log
        .with_field("a", json!(1))
        .with_fields(fields)
        .with_error(&std::io::Error::other("eww"));
    chained.info(&[json!("chained")]);
}

#[test]
fn test_all_backends_satisfy_the_contract() {
    exercise(Box::new(InMemoryLogger::new(Level::Debug)));
    exercise(Box::new(NoopLogger));
    exercise(Box::new(TracingLogger::new(Level::Debug)));
    exercise(Box::new(LogCrateLogger::new()));
}

#[test]
fn test_in_memory_records_the_exercised_calls() {
    let log = InMemoryLogger::new(Level::Debug);
    exercise(Box::new(log.clone()));

    // Eight direct entries, plus the chained leaf entry propagated back
    // to this root handle.
    let entries = log.entries();
    assert_eq!(entries.len(), 9);

    let last = entries.last().unwrap();
    assert_eq!(last.args, vec![json!("chained")]);
    assert_eq!(last.fields.get("a"), Some(&json!(1)));
    assert_eq!(last.fields.get("b"), Some(&json!(2)));
    assert_eq!(last.fields.get("error"), Some(&json!("eww")));
}
