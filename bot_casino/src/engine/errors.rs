//! Engine error types.

use crate::db::StoreError;
use crate::table::{ParticipantId, TableError, TableId};
use thiserror::Error;

/// Errors returned by the engine's caller-facing operations
#[derive(Debug, Error)]
pub enum CasinoError {
    /// Table rule violation, passed through unchanged
    #[error(transparent)]
    Table(#[from] TableError),

    /// Request addressed a table this engine does not run
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// Participant has no account
    #[error("Account not found for participant {0}")]
    AccountNotFound(ParticipantId),

    /// Storage collaborator failed
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl CasinoError {
    /// Get a client-safe error message that doesn't leak storage details
    pub fn client_message(&self) -> String {
        match self {
            CasinoError::Store(_) => "Internal server error".to_string(),
            CasinoError::AccountNotFound(_) => "Account not found".to_string(),
            _ => self.to_string(),
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            CasinoError::Table(e) => e.code(),
            CasinoError::TableNotFound(_) => "TABLE_NOT_FOUND",
            CasinoError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            CasinoError::Store(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for engine operations
pub type CasinoResult<T> = Result<T, CasinoError>;

/// Failure to complete a round's result step
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The round result could not be persisted
    #[error("Failed to persist result of round {round_number}: {source}")]
    Persist {
        round_number: u64,
        #[source]
        source: StoreError,
    },
}
