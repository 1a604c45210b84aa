//! # Bot Casino
//!
//! A shared-table European roulette engine for bot players.
//!
//! One table runs a continuous round cycle driven by the [`Engine`]:
//!
//! - **Idle**: Waiting for a participant to sit down
//! - **Betting**: Round number bumped, bets accepted for a fixed window
//! - **Spinning**: Outcome drawn from a secure random source
//! - **Settlement**: Bets resolved, balances updated, result stored
//! - **Pause**: Short break before the next round
//!
//! Balances and round history live behind storage traits, so the engine can
//! run against any backend. Observers receive phase changes, new bets and
//! round results through a [`Broadcaster`](engine::Broadcaster).
//!
//! ## Core Modules
//!
//! - [`game`]: Wheel, bet kinds, payouts and settlement
//! - [`table`]: Seats, live bets, validation and status
//! - [`engine`]: Phase loop, caller-facing operations and notifications
//! - [`wallet`]: Accounts, registration and refills
//! - [`db`]: Storage traits and in-memory backends
//! - [`bot`]: Simulated participants with betting strategies
//!
//! ## Example
//!
//! ```
//! use bot_casino::game::{BetKind, Spin, settle_bets};
//! use bot_casino::table::{Table, TableConfig};
//! use uuid::Uuid;
//!
//! let mut table = Table::new(TableConfig::default());
//! let bot = Uuid::new_v4();
//! table.join(bot, "Lucky", "seed", "bottts").unwrap();
//! table.open_round();
//! table.place_bet(bot, BetKind::Straight, Some(17), 10, 1000).unwrap();
//!
//! let settled = settle_bets(table.bets(), Spin::new(17).unwrap());
//! assert_eq!(settled.total_payout, 360);
//! ```

pub mod bot;
pub mod db;
pub mod engine;
pub mod game;
pub mod table;
pub mod wallet;

pub use engine::{CasinoError, CasinoResult, Engine};
pub use game::{BetKind, Color, RoundResult, Spin};
pub use table::{Bet, Phase, TableConfig, TableError, TableStatus};
