//! Session store errors

use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Email, password and role did not match a demo account
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The session snapshot could not be written or removed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type AuthResult<T> = Result<T, AuthError>;
