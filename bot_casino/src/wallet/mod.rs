//! Wallet module providing participant accounts and balance policy.
//!
//! This module implements:
//! - Account records with balance and lifetime statistics
//! - Field deltas applied by settlement, one bet at a time
//! - Registration with a starting balance
//! - Refills of an empty balance, limited by a cooldown
//!
//! ## Example
//!
//! ```
//! use bot_casino::db::InMemoryAccountStore;
//! use bot_casino::wallet::{WalletConfig, WalletManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let wallet = WalletManager::new(
//!         Arc::new(InMemoryAccountStore::new()),
//!         WalletConfig::default(),
//!     );
//!
//!     let account = wallet.register("Lucky", "seed-42", "bottts").await?;
//!     println!("{} starts with {} chips", account.name, account.balance);
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{WalletError, WalletResult};
pub use manager::{WalletConfig, WalletManager};
pub use models::{Account, AccountDelta};
