//! Applies configuration pushes to a logging system.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::LoggingSystem;
use crate::error::{ReconcileError, ReconcileResult};
use crate::level::{Level, LoggerName};
use crate::observability::metrics;
use crate::reconcile::computer::compute;
use crate::source::{ConfigListener, RemoteConfigSource, Snapshot};

/// Owns the set of overridden loggers and keeps the logging system in step
/// with the latest snapshot.
pub struct LogLevelReconciler<L> {
    logging: L,
    overrides: Mutex<BTreeSet<LoggerName>>,
}

impl<L: LoggingSystem> LogLevelReconciler<L> {
    pub fn new(logging: L) -> Self {
        Self {
            logging,
            overrides: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn logging(&self) -> &L {
        &self.logging
    }

    /// Subscribe to `config_id` on `source`; each push runs [`Self::on_push`].
    ///
    /// A failure leaves dynamic levels inactive; it is logged and handed back
    /// so the caller can carry on without it.
    pub fn subscribe(
        self: &Arc<Self>,
        source: &dyn RemoteConfigSource,
        config_id: &str,
    ) -> ReconcileResult<()>
    where
        L: 'static,
    {
        if config_id.trim().is_empty() {
            let err = ReconcileError::ListenerRegistration {
                id: config_id.to_string(),
                reason: "config id is empty".to_string(),
            };
            tracing::warn!(error = %err, "Dynamic log levels disabled");
            return Err(err);
        }

        let reconciler = Arc::clone(self);
        let listener: ConfigListener = Arc::new(move |snapshot: &Snapshot| {
            reconciler.on_push(snapshot);
        });

        match source.register_listener(config_id, listener) {
            Ok(()) => {
                tracing::info!(config_id, "Subscribed to log level configuration");
                Ok(())
            }
            Err(err) => {
                tracing::error!(config_id, error = %err, "Dynamic log levels disabled");
                metrics::record_rejected(err.kind());
                Err(err)
            }
        }
    }

    /// Apply a full snapshot.
    ///
    /// Holds the override lock for the whole push so concurrent deliveries
    /// cannot compute removals against a superseded baseline.
    pub fn on_push(&self, snapshot: &Snapshot) {
        let mut overrides = self.lock_overrides();
        let update = compute(&overrides, snapshot);

        for err in &update.rejected {
            tracing::warn!(error = %err, "Skipping log level entry");
            metrics::record_rejected(err.kind());
        }

        for (name, level) in &update.assignments {
            if name.is_root() {
                self.fan_out(*level);
            } else {
                self.logging.set_level(name, *level);
            }
            tracing::info!(logger = %name, level = %level, "changed log level");
            metrics::record_level_change("assigned");
        }

        for name in &update.removed {
            match self.inherited_level(name) {
                Ok(level) => {
                    self.logging.set_level(name, level);
                    tracing::info!(logger = %name, level = %level, "restored inherited log level");
                    metrics::record_level_change("restored");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Leaving logger level unchanged");
                    metrics::record_rejected(err.kind());
                }
            }
        }

        tracing::debug!(
            assigned = update.assignments.len(),
            removed = update.removed.len(),
            rejected = update.rejected.len(),
            "Applied log level snapshot"
        );
        metrics::record_push(update.new_overrides.len());
        *overrides = update.new_overrides;
    }

    /// Current overrides with the level each one is configured at.
    pub fn overrides(&self) -> BTreeMap<LoggerName, Option<Level>> {
        let overrides = self.lock_overrides();
        overrides
            .iter()
            .map(|name| (name.clone(), self.logging.configured_level(name)))
            .collect()
    }

    fn fan_out(&self, level: Level) {
        let root = LoggerName::root();
        self.logging.set_level(&root, level);
        for name in self.logging.known_logger_names() {
            if name != root {
                self.logging.set_level(&name, level);
            }
        }
    }

    /// Level of the nearest ancestor that has one configured.
    ///
    /// Read at restoration time, so it reflects the ancestor's current state.
    fn inherited_level(&self, name: &LoggerName) -> ReconcileResult<Level> {
        // The root has nothing above it and keeps its own level.
        if name.is_root() {
            return self
                .logging
                .configured_level(name)
                .ok_or_else(|| ReconcileError::UnresolvedInheritance(name.clone()));
        }
        name.ancestors()
            .find_map(|ancestor| self.logging.configured_level(&ancestor))
            .ok_or_else(|| ReconcileError::UnresolvedInheritance(name.clone()))
    }

    fn lock_overrides(&self) -> MutexGuard<'_, BTreeSet<LoggerName>> {
        // The set is replaced wholesale, so a poisoned value is still consistent.
        self.overrides.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
