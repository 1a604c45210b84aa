//! Storage trait definitions for the table engine's collaborators.
//!
//! The engine only talks to these traits, so account and round storage can be
//! swapped for any backend. In-memory implementations live in
//! [`memory`](super::memory).

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::StoreResult;
use crate::game::RoundResult;
use crate::table::ParticipantId;
use crate::wallet::{Account, AccountDelta};

/// Participant account storage
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get an account by participant ID
    async fn get(&self, participant_id: &ParticipantId) -> StoreResult<Option<Account>>;

    /// Insert a new account
    ///
    /// Fails with `StoreError::Duplicate` if the participant already has one.
    async fn insert(&self, account: Account) -> StoreResult<()>;

    /// Apply field deltas atomically for one participant, returning the
    /// updated account
    async fn apply_delta(
        &self,
        participant_id: &ParticipantId,
        delta: &AccountDelta,
    ) -> StoreResult<Account>;

    /// All known accounts, in no particular order
    async fn list(&self) -> StoreResult<Vec<Account>>;
}

/// Append-only round result storage
#[async_trait]
pub trait RoundStore: Send + Sync {
    /// Persist a round result keyed by its round ID
    ///
    /// Fails with `StoreError::Duplicate` if the round ID is already stored.
    async fn save(&self, result: &RoundResult) -> StoreResult<()>;

    /// Get a round by ID
    async fn get(&self, round_id: &Uuid) -> StoreResult<Option<RoundResult>>;

    /// Rounds the participant bet in, highest round number first
    async fn recent_for_participant(
        &self,
        participant_id: &ParticipantId,
        limit: usize,
    ) -> StoreResult<Vec<RoundResult>>;
}
