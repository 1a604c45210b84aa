//! Wallet error types.

use crate::db::StoreError;
use crate::table::ParticipantId;
use thiserror::Error;

/// Wallet errors
#[derive(Debug, Error)]
pub enum WalletError {
    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Account not found
    #[error("Account not found for participant {0}")]
    AccountNotFound(ParticipantId),

    /// Display name empty or too long
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Refill only allowed on an empty balance
    #[error("Refill only available when balance is 0 (balance {balance})")]
    RefillNotAvailable { balance: i64 },

    /// Refill cooldown has not elapsed
    #[error("Refill is on cooldown until {0}")]
    RefillCooldown(chrono::DateTime<chrono::Utc>),
}

impl WalletError {
    /// Get a client-safe error message that doesn't leak storage details
    pub fn client_message(&self) -> String {
        match self {
            WalletError::Store(_) => "Internal server error".to_string(),
            WalletError::AccountNotFound(_) => "Account not found".to_string(),
            _ => self.to_string(),
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::Store(_) => "INTERNAL_ERROR",
            WalletError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            WalletError::InvalidName(_) => "INVALID_NAME",
            WalletError::RefillNotAvailable { .. } | WalletError::RefillCooldown(_) => {
                "REFILL_COOLDOWN"
            }
        }
    }
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
