//! Storage error types.

use thiserror::Error;

/// Errors raised by storage collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Record with the same key already stored
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Backend could not serve the request
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
