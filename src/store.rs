//! Persistence port for the workspace snapshot.
//!
//! DESIGN
//! ======
//! The workspace never touches storage directly. It is handed a [`Store`] and
//! exchanges whole [`Snapshot`]s with it: load once at startup, save after
//! every mutation. Last write wins.
//!
//! BACKENDS
//! ========
//! - [`MemoryStore`]: process-local, used by tests and ephemeral servers.
//! - [`JsonFileStore`]: one pretty-printed JSON document on disk. Writes go to
//!   a sibling temp file that is renamed over the target, so a crash mid-write
//!   leaves the previous snapshot intact.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::ActivityLog;
use crate::project::Project;
use crate::user::{Account, User};

/// Everything the workspace persists, in one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub current_user: Option<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub activities: ActivityLog,
    #[serde(default)]
    pub users: Vec<Account>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

pub trait Store: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read or decoded.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be encoded or written.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { slot: Mutex::new(Some(snapshot)) }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}

// =============================================================================
// JSON FILE
// =============================================================================

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), "snapshot loaded");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), projects = snapshot.projects.len(), "snapshot saved");
        Ok(())
    }
}
