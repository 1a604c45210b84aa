//! Storage module for the engine's account and round collaborators.
//!
//! This module provides trait-based abstractions over storage so the engine
//! can run against any backend, plus in-memory implementations used by the
//! server and by tests.

pub mod errors;
pub mod memory;
pub mod repository;

pub use errors::{StoreError, StoreResult};
pub use memory::{InMemoryAccountStore, InMemoryRoundStore};
pub use repository::{AccountStore, RoundStore};
