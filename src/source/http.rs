//! Configuration source fed by HTTP pushes to the admin API.

use dashmap::DashMap;

use crate::error::ReconcileResult;
use crate::source::{ConfigListener, RemoteConfigSource, Snapshot};

/// Listener registry that the admin API pushes snapshots into.
#[derive(Default)]
pub struct HttpConfigSource {
    listeners: DashMap<String, Vec<ConfigListener>>,
}

impl HttpConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand `snapshot` to the listeners of `id`. Returns how many ran.
    pub fn push(&self, id: &str, snapshot: &Snapshot) -> usize {
        let listeners = self
            .listeners
            .get(id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        for listener in &listeners {
            listener(snapshot);
        }
        tracing::debug!(config_id = id, listeners = listeners.len(), "Dispatched pushed snapshot");
        listeners.len()
    }

    /// Config ids with at least one listener, sorted.
    pub fn config_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.listeners.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl RemoteConfigSource for HttpConfigSource {
    fn register_listener(&self, id: &str, listener: ConfigListener) -> ReconcileResult<()> {
        self.listeners.entry(id.to_string()).or_default().push(listener);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_push_dispatch() {
        let source = HttpConfigSource::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..2 {
            let h = hits.clone();
            source
                .register_listener("svc", Arc::new(move |_: &Snapshot| {
                    h.fetch_add(1, Ordering::SeqCst);
                }))
                .unwrap();
        }

        assert_eq!(source.push("svc", &Snapshot::new()), 2);
        assert_eq!(source.push("unknown", &Snapshot::new()), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(source.config_ids(), vec!["svc".to_string()]);
    }
}
