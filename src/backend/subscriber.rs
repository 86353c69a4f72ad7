//! `tracing` backend.
//!
//! Logger names map onto event targets: `a.b` is the target `a::b`. An event
//! is enabled by the level configured on its own logger or, failing that, on
//! the nearest configured ancestor, walking whole dot segments only. `app.db`
//! therefore governs `app::db::pool` but never `app::dbx`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard};

use tracing::subscriber::Interest;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer};

use crate::backend::LoggingSystem;
use crate::level::{Level, LoggerName};

/// Filtering layer that resolves each callsite target through the logger
/// hierarchy. It also records every target it sees so root fan-out can reach
/// loggers nobody configured.
#[derive(Clone)]
pub struct LoggerHierarchy {
    levels: Arc<RwLock<BTreeMap<LoggerName, Level>>>,
    targets: Arc<Mutex<BTreeSet<String>>>,
}

impl LoggerHierarchy {
    fn new(root_level: Level) -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(LoggerName::root(), root_level);
        Self {
            levels: Arc::new(RwLock::new(levels)),
            targets: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    /// Level in force for a dotted logger name.
    pub fn effective_level(&self, name: &str) -> Level {
        resolve(&self.read(), name)
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<LoggerName, Level>> {
        self.levels.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, target: &str) {
        let mut targets = self.targets.lock().unwrap_or_else(PoisonError::into_inner);
        if !targets.contains(target) {
            targets.insert(target.to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for LoggerHierarchy {
    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        self.record(metadata.target());
        // Levels change at runtime, so every callsite is checked per event.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        let level = self.effective_level(&target_to_logger(metadata.target()));
        *metadata.level() <= level_filter(level)
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        self.read().values().map(|level| level_filter(*level)).max()
    }
}

/// Logging system that drives a [`LoggerHierarchy`] layer.
pub struct TracingLoggingSystem {
    hierarchy: LoggerHierarchy,
}

impl TracingLoggingSystem {
    /// `root_level` seeds the root logger so inheritance always resolves.
    pub fn new(root_level: Level) -> Self {
        Self {
            hierarchy: LoggerHierarchy::new(root_level),
        }
    }

    /// The filtering layer to install on the subscriber.
    pub fn layer(&self) -> LoggerHierarchy {
        self.hierarchy.clone()
    }
}

impl LoggingSystem for TracingLoggingSystem {
    fn set_level(&self, name: &LoggerName, level: Level) {
        self.hierarchy
            .levels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), level);
        // Recomputes the global max level from `max_level_hint`. Must run
        // without the write lock held.
        tracing::callsite::rebuild_interest_cache();
    }

    fn known_logger_names(&self) -> BTreeSet<LoggerName> {
        let mut names: BTreeSet<LoggerName> = self
            .hierarchy
            .targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|target| LoggerName::new(target_to_logger(target)))
            .collect();
        names.extend(self.hierarchy.read().keys().cloned());
        names
    }

    fn configured_level(&self, name: &LoggerName) -> Option<Level> {
        self.hierarchy.read().get(name).copied()
    }
}

/// `tracing` has no level above ERROR, so FATAL collapses onto it.
pub fn level_filter(level: Level) -> LevelFilter {
    match level {
        Level::Trace => LevelFilter::TRACE,
        Level::Debug => LevelFilter::DEBUG,
        Level::Info => LevelFilter::INFO,
        Level::Warn => LevelFilter::WARN,
        Level::Error | Level::Fatal => LevelFilter::ERROR,
        Level::Off => LevelFilter::OFF,
    }
}

fn target_to_logger(target: &str) -> String {
    target.replace("::", ".")
}

/// Walk `name`, then each shorter dot-segment prefix, then the root.
fn resolve(levels: &BTreeMap<LoggerName, Level>, name: &str) -> Level {
    let mut candidate = name;
    loop {
        if let Some(level) = levels.get(candidate) {
            return *level;
        }
        match candidate.rfind('.') {
            Some(idx) => candidate = &candidate[..idx],
            None => break,
        }
    }
    levels.get(LoggerName::ROOT).copied().unwrap_or(Level::Info)
}
