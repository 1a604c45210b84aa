//! Bot module providing simulated participants for a table.
//!
//! This module implements:
//! - Betting strategies (flat bets, rotating dozens, lucky number,
//!   martingale, reverse colour and a random mix)
//! - BotPlayer: strategy plus per-bot statistics
//! - BotManager: registers bots, seats them and runs one task per bot that
//!   bets whenever betting opens and refills when broke
//!
//! ## Example
//!
//! ```no_run
//! use bot_casino::bot::{BotConfig, BotManager};
//! use bot_casino::db::{InMemoryAccountStore, InMemoryRoundStore};
//! use bot_casino::engine::{Engine, SubscriberHub};
//! use bot_casino::table::TableConfig;
//! use bot_casino::wallet::{WalletConfig, WalletManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let accounts = Arc::new(InMemoryAccountStore::new());
//!     let hub = Arc::new(SubscriberHub::default());
//!     let engine = Arc::new(Engine::new(
//!         TableConfig::default(),
//!         accounts.clone(),
//!         Arc::new(InMemoryRoundStore::new()),
//!         hub.clone(),
//!     ));
//!     let wallet = WalletManager::new(accounts, WalletConfig::default());
//!
//!     let mut bots = BotManager::new(engine.clone(), wallet, hub);
//!     bots.spawn_bots(BotConfig::roster(5, 10)).await.unwrap();
//!     println!("Active bots: {}", bots.bot_count());
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod strategy;

pub use errors::{BotError, BotResult};
pub use manager::BotManager;
pub use models::{BOT_AVATAR_STYLE, BotConfig, BotPlayer, BotStats};
pub use strategy::{BetIntent, ParseStrategyError, Strategy, StrategyKind};
