//! End-to-end reconciliation scenarios against the in-memory backend.

use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use loglevel_sync::backend::InMemoryLoggingSystem;
use loglevel_sync::source::InMemoryConfigSource;
use loglevel_sync::{Level, LogLevelReconciler, LoggerName, LoggingSystem, Snapshot};

mod common;
use common::{level_of, seeded_logging, snapshot};

const CONFIG_ID: &str = "orders-service";

fn subscribed() -> (Arc<LogLevelReconciler<Arc<InMemoryLoggingSystem>>>, Arc<InMemoryLoggingSystem>, InMemoryConfigSource) {
    let logging = Arc::new(seeded_logging());
    let reconciler = Arc::new(LogLevelReconciler::new(logging.clone()));
    let source = InMemoryConfigSource::new();
    reconciler.subscribe(&source, CONFIG_ID).unwrap();
    (reconciler, logging, source)
}

#[test]
fn test_override_then_revert_to_parent() {
    let (reconciler, logging, source) = subscribed();

    source.publish(CONFIG_ID, snapshot(&[("logging.level.a", "ERROR"), ("logging.level.a.b", "DEBUG")]));
    assert_eq!(level_of(&logging, "a.b"), Some(Level::Debug));

    source.publish(CONFIG_ID, snapshot(&[("logging.level.a", "ERROR")]));
    assert_eq!(level_of(&logging, "a.b"), Some(Level::Error));

    source.publish(CONFIG_ID, Snapshot::new());
    assert_eq!(level_of(&logging, "a"), Some(Level::Info));
    assert!(reconciler.overrides().is_empty());
}

#[test]
fn test_root_fan_out_then_specific() {
    let (_reconciler, logging, source) = subscribed();

    source.publish(CONFIG_ID, snapshot(&[("logging.level.", "WARN"), ("logging.level.a.b", "INFO")]));

    for name in ["ROOT", "a", "a.b.c", "db", "db.pool"] {
        assert_eq!(level_of(&logging, name), Some(Level::Warn), "{name}");
    }
    assert_eq!(level_of(&logging, "a.b"), Some(Level::Info));
}

#[test]
fn test_restore_reads_parent_at_removal_time() {
    let (_reconciler, logging, source) = subscribed();

    source.publish(CONFIG_ID, snapshot(&[("logging.level.db", "DEBUG"), ("logging.level.db.pool", "TRACE")]));
    source.publish(CONFIG_ID, snapshot(&[("logging.level.db", "WARN"), ("logging.level.db.pool", "TRACE")]));
    source.publish(CONFIG_ID, snapshot(&[("logging.level.db", "WARN")]));

    assert_eq!(level_of(&logging, "db.pool"), Some(Level::Warn));
    assert_eq!(logging.effective_level(&LoggerName::new("db.pool.conn")), Some(Level::Warn));
}

#[test]
fn test_bad_entry_is_isolated() {
    let (reconciler, logging, source) = subscribed();

    source.publish(
        CONFIG_ID,
        snapshot(&[("logging.level.x", "BOGUS"), ("logging.level.db", "debug"), ("other.key", "1")]),
    );

    assert_eq!(level_of(&logging, "db"), Some(Level::Debug));
    assert_eq!(level_of(&logging, "x"), None);
    let overrides: Vec<LoggerName> = reconciler.overrides().into_keys().collect();
    assert_eq!(overrides, vec![LoggerName::new("db")]);
}

#[test]
fn test_repush_is_idempotent() {
    let (reconciler, logging, source) = subscribed();
    let snap = snapshot(&[("logging.level.", "ERROR"), ("logging.level.a", "TRACE")]);

    source.publish(CONFIG_ID, snap.clone());
    let first = reconciler.overrides();
    source.publish(CONFIG_ID, snap);

    assert_eq!(reconciler.overrides(), first);
    assert_eq!(level_of(&logging, "a"), Some(Level::Trace));
    assert_eq!(level_of(&logging, "db"), Some(Level::Error));
}

#[test]
fn test_concurrent_pushes_leave_consistent_state() {
    let (reconciler, logging, _source) = subscribed();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let reconciler = reconciler.clone();
            thread::spawn(move || {
                let level = if i % 2 == 0 { "DEBUG" } else { "ERROR" };
                for _ in 0..50 {
                    reconciler.on_push(&snapshot(&[("logging.level.a.b", level)]));
                    reconciler.on_push(&Snapshot::new());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Every thread ends with an empty push, so the override must be gone.
    assert!(reconciler.overrides().is_empty());
    assert_eq!(level_of(&logging, "a.b"), Some(Level::Info));
}

/// Blocks the first `set_level` on `gate` until released, so a push can be
/// held half-applied while another push arrives.
struct GatedLoggingSystem {
    inner: InMemoryLoggingSystem,
    gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
}

impl LoggingSystem for GatedLoggingSystem {
    fn set_level(&self, name: &LoggerName, level: Level) {
        self.inner.set_level(name, level);
        if name.as_str() == "gate" {
            let gate = self.gate.lock().unwrap().take();
            if let Some((entered, release)) = gate {
                entered.send(()).unwrap();
                release.recv().unwrap();
            }
        }
    }

    fn known_logger_names(&self) -> BTreeSet<LoggerName> {
        self.inner.known_logger_names()
    }

    fn configured_level(&self, name: &LoggerName) -> Option<Level> {
        self.inner.configured_level(name)
    }
}

#[test]
fn test_push_waits_for_half_applied_push() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let logging = GatedLoggingSystem {
        inner: seeded_logging(),
        gate: Mutex::new(Some((entered_tx, release_rx))),
    };
    let reconciler = Arc::new(LogLevelReconciler::new(logging));

    let first = {
        let reconciler = reconciler.clone();
        thread::spawn(move || {
            reconciler.on_push(&snapshot(&[
                ("logging.level.a", "DEBUG"),
                ("logging.level.gate", "WARN"),
            ]));
        })
    };
    entered_rx.recv().unwrap();

    // `a` is already DEBUG but the first push has not committed its overrides.
    let second = {
        let reconciler = reconciler.clone();
        thread::spawn(move || reconciler.on_push(&Snapshot::new()))
    };
    thread::sleep(Duration::from_millis(100));
    release_tx.send(()).unwrap();

    first.join().unwrap();
    second.join().unwrap();

    // The empty push must see the first push's overrides and remove them.
    assert!(reconciler.overrides().is_empty());
    assert_eq!(level_of(&reconciler.logging().inner, "a"), Some(Level::Info));
    assert_eq!(level_of(&reconciler.logging().inner, "gate"), Some(Level::Info));
}
