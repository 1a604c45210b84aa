//! Bot error types.

use crate::engine::CasinoError;
use crate::wallet::WalletError;
use thiserror::Error;

/// Errors raised while seating bots
#[derive(Debug, Error)]
pub enum BotError {
    /// Account registration failed
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Table refused the bot
    #[error("Table error: {0}")]
    Casino(#[from] CasinoError),
}

/// Result type for bot operations
pub type BotResult<T> = Result<T, BotError>;
