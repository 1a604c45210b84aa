//! Table module holding the per-round state of a roulette table.
//!
//! This module implements:
//! - Table: seats, live bets, rate-limit records and daily aggregates
//! - Validated mutations (join, leave, place bet) with typed errors
//! - A read-only status projection
//!
//! The table owns no timers. The [`Engine`](crate::engine::Engine) wraps it in
//! a lock and advances its phase.
//!
//! ## Example
//!
//! ```
//! use bot_casino::game::BetKind;
//! use bot_casino::table::{Table, TableConfig, TableError};
//! use uuid::Uuid;
//!
//! let mut table = Table::new(TableConfig::default());
//! let bot = Uuid::new_v4();
//! table.join(bot, "Lucky", "seed", "bottts").unwrap();
//!
//! // Bets are rejected until the engine opens a round
//! let err = table.place_bet(bot, BetKind::Red, None, 10, 1000).unwrap_err();
//! assert_eq!(err, TableError::BettingClosed);
//!
//! table.open_round();
//! let bet = table.place_bet(bot, BetKind::Red, None, 10, 1000).unwrap();
//! assert_eq!(bet.payout, 0);
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod state;

pub use config::TableConfig;
pub use errors::{TableError, TableResult};
pub use models::{Bet, DailyStats, ParticipantId, Phase, Seat, TableId, TableStatus};
pub use state::Table;
