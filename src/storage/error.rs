//! Storage error types
//!
//! Defines the errors the key-value layer can report to the stores.

use thiserror::Error;

/// Errors that can occur while reading or writing persisted snapshots
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store could not be read or written
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A persisted snapshot exists but does not parse
    #[error("Malformed persisted state under '{key}': {reason}")]
    Malformed { key: String, reason: String },

    /// A snapshot could not be serialized for writing
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

impl StorageError {
    /// Build a `Malformed` error for the given key
    pub fn malformed(key: &str, reason: impl std::fmt::Display) -> Self {
        StorageError::Malformed {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True when the failure came from parsing persisted data
    pub fn is_malformed(&self) -> bool {
        matches!(self, StorageError::Malformed { .. })
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
