//! Hackathon registry errors

use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// No hackathon with the given id
    #[error("Hackathon not found: {0}")]
    NotFound(String),

    /// Create-form rules were not met
    #[error("Validation error: {0}")]
    Validation(String),

    /// A snapshot could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
