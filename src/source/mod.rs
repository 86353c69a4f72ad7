//! Remote configuration sources.
//!
//! A source delivers complete key/value snapshots to listeners registered
//! under an opaque config id. Implementations:
//! - memory.rs: in-process publish/subscribe, used for embedding and tests
//! - file.rs: one properties file per config id, watched for changes
//! - http.rs: snapshots pushed through the admin API

pub mod file;
pub mod http;
pub mod memory;
pub mod properties;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ReconcileResult;

/// Complete configuration delivered by a single push.
pub type Snapshot = HashMap<String, String>;

/// Callback invoked with every snapshot for a config id.
pub type ConfigListener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// A configuration store that can notify listeners of new snapshots.
pub trait RemoteConfigSource: Send + Sync {
    /// Register `listener` for pushes of `id`.
    fn register_listener(&self, id: &str, listener: ConfigListener) -> ReconcileResult<()>;
}

pub use file::FileConfigSource;
pub use http::HttpConfigSource;
pub use memory::InMemoryConfigSource;
pub use properties::parse_properties;
