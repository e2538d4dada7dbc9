//! Whole-state persistence as a single JSON document.
//!
//! One file, loaded on open, rewritten on every transition. Saves go
//! through a temp file plus rename so a crash cannot leave a half-written
//! state behind.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::AppState;

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read state from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },
}

/// The seam between the store and its storage: load on open, save on
/// every transition.
pub trait PersistenceAdapter {
    /// Load the persisted state; `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<AppState>, StorageError>;

    /// Persist the state.
    fn save(&self, state: &AppState) -> Result<(), StorageError>;
}

/// File-backed adapter writing `state.json` under a data directory.
pub struct JsonStateFile {
    path: PathBuf,
}

impl JsonStateFile {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("state.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for JsonStateFile {
    fn load(&self) -> Result<Option<AppState>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StorageError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        let state = serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(state))
    }

    fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(state).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw).map_err(|source| StorageError::WriteFailed {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}
