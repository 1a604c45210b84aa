//! Table error types.

use super::models::{ParticipantId, TableId};
use thiserror::Error;

/// Caller-correctable failures raised by table operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// All seats are taken
    #[error("Table {table_id} is full ({max_seats} seats max)")]
    TableFull { table_id: TableId, max_seats: usize },

    /// Participant must join before betting
    #[error("Participant {0} is not seated")]
    NotSeated(ParticipantId),

    /// Bets are only accepted during the betting phase
    #[error("Betting is closed for this round")]
    BettingClosed,

    /// Bets from the same participant arrived too quickly
    #[error("Rate limit exceeded, retry in {retry_after_ms} ms")]
    RateLimited { retry_after_ms: u64 },

    /// Amount below the minimum or bet value out of range
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Live bets plus this one exceed the balance
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: i64, need: i64 },
}

impl TableError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            TableError::TableFull { .. } => "TABLE_FULL",
            TableError::NotSeated(_) => "NOT_SEATED",
            TableError::BettingClosed => "BETTING_CLOSED",
            TableError::RateLimited { .. } => "RATE_LIMITED",
            TableError::InvalidAmount(_) => "INVALID_AMOUNT",
            TableError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
        }
    }
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
