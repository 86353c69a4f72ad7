//! In-process configuration source.

use dashmap::DashMap;

use crate::error::ReconcileResult;
use crate::source::{ConfigListener, RemoteConfigSource, Snapshot};

/// Publish/subscribe source that lives entirely in memory.
///
/// The latest snapshot per id is retained so late subscribers start from it.
#[derive(Default)]
pub struct InMemoryConfigSource {
    listeners: DashMap<String, Vec<ConfigListener>>,
    latest: DashMap<String, Snapshot>,
}

impl InMemoryConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `snapshot` to every listener of `id`. Returns how many ran.
    pub fn publish(&self, id: &str, snapshot: Snapshot) -> usize {
        self.latest.insert(id.to_string(), snapshot.clone());
        // Clone out of the map so listeners run without holding a shard lock.
        let listeners = self
            .listeners
            .get(id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        for listener in &listeners {
            listener(&snapshot);
        }
        listeners.len()
    }

    pub fn listener_count(&self, id: &str) -> usize {
        self.listeners.get(id).map(|entry| entry.len()).unwrap_or(0)
    }
}

impl RemoteConfigSource for InMemoryConfigSource {
    fn register_listener(&self, id: &str, listener: ConfigListener) -> ReconcileResult<()> {
        self.listeners
            .entry(id.to_string())
            .or_default()
            .push(listener.clone());

        let current = self.latest.get(id).map(|entry| entry.value().clone());
        if let Some(snapshot) = current {
            listener(&snapshot);
        }
        Ok(())
    }
}
