//! File-backed configuration source with hot reload.
//!
//! Config id `X` is read from `<directory>/X` as properties text. The
//! directory is watched rather than the file, so editors and deploy tools
//! that replace the file by renaming a new one over it keep triggering
//! reloads, and the file may appear after registration.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::error::{ReconcileError, ReconcileResult};
use crate::source::properties::{parse_properties, PropertiesError};
use crate::source::{ConfigListener, RemoteConfigSource, Snapshot};

#[derive(Debug, Error)]
enum ReadError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse failed: {0}")]
    Parse(#[from] PropertiesError),
}

/// Watches one properties file per registered config id.
pub struct FileConfigSource {
    directory: PathBuf,
    watchers: Mutex<Vec<RecommendedWatcher>>,
}

impl FileConfigSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            watchers: Mutex::new(Vec::new()),
        }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.directory.join(id)
    }

    fn read_snapshot(path: &Path) -> Result<Snapshot, ReadError> {
        let text = fs::read_to_string(path)?;
        Ok(parse_properties(&text)?)
    }

    /// Read `path` and hand it to `listener`. Failures keep current levels.
    fn deliver(path: &Path, listener: &ConfigListener) {
        match Self::read_snapshot(path) {
            Ok(snapshot) => listener(&snapshot),
            Err(ReadError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?path, "Log level config not present yet");
            }
            Err(e) => {
                tracing::error!(
                    path = ?path,
                    error = %e,
                    "Failed to load log level config, keeping current levels"
                );
            }
        }
    }
}

impl RemoteConfigSource for FileConfigSource {
    fn register_listener(&self, id: &str, listener: ConfigListener) -> ReconcileResult<()> {
        let registration_error = |reason: String| ReconcileError::ListenerRegistration {
            id: id.to_string(),
            reason,
        };

        let path = self.path_for(id);
        let (watch_dir, file_name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_os_string()),
            _ => return Err(registration_error(format!("{} names no file", path.display()))),
        };
        if !watch_dir.is_dir() {
            return Err(registration_error(format!(
                "{} is not a directory",
                watch_dir.display()
            )));
        }

        let watch_path = path.clone();
        let on_change = listener.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if (event.kind.is_modify() || event.kind.is_create())
                        && touches(&event, &file_name)
                    {
                        tracing::info!(path = ?watch_path, "Log level config changed, reloading");
                        Self::deliver(&watch_path, &on_change);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )
        .map_err(|e| registration_error(e.to_string()))?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| registration_error(e.to_string()))?;

        self.watchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(watcher);
        tracing::info!(path = ?path, "Log level config watcher started");

        // The watch is live before the first read so no write is missed.
        Self::deliver(&path, &listener);
        Ok(())
    }
}

fn touches(event: &Event, file_name: &OsString) -> bool {
    event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(file_name.as_os_str()))
}
