//! Engine module running a roulette table in real time.
//!
//! This module implements:
//! - The [`Engine`]: a table behind one `RwLock`, its storage collaborators
//!   and the caller-facing operations (join, leave, bet, status, leaderboard)
//! - The phase loop with cancellable suspension points
//! - Settlement of each round against account storage
//! - Table notifications and the [`SubscriberHub`] that fans them out
//!
//! ## Example
//!
//! ```no_run
//! use bot_casino::db::{InMemoryAccountStore, InMemoryRoundStore};
//! use bot_casino::engine::{Engine, SubscriberHub};
//! use bot_casino::table::TableConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let hub = Arc::new(SubscriberHub::default());
//!     let engine = Arc::new(Engine::new(
//!         TableConfig::default(),
//!         Arc::new(InMemoryAccountStore::new()),
//!         Arc::new(InMemoryRoundStore::new()),
//!         hub.clone(),
//!     ));
//!
//!     let runner = engine.clone();
//!     let handle = tokio::spawn(async move { runner.run().await });
//!
//!     tokio::signal::ctrl_c().await.ok();
//!     engine.stop();
//!     handle.await.ok();
//! }
//! ```

pub mod errors;
pub mod events;
pub mod leaderboard;
pub mod models;
mod phase_loop;
mod settlement;
pub mod table_engine;

pub use errors::{CasinoError, CasinoResult, SettlementError};
pub use events::{
    Broadcaster, NullBroadcaster, ObserverId, PhaseChange, SubscriberHub, Subscription,
    TableEvent,
};
pub use leaderboard::{LeaderboardEntry, Trend, rank};
pub use models::{GAME_TYPE, GameInfo, TableSnapshot};
pub use table_engine::Engine;
