//! Core error types for wichtel-core.

use thiserror::Error;

use crate::share::ShareError;
use crate::storage::{ConfigError, StorageError};
use crate::store::StoreError;

/// Core error type for wichtel-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected store transition (validation or eligibility)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// State persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Share-token errors
    #[error("Share error: {0}")]
    Share(#[from] ShareError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
