//! In-memory storage backends.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::repository::{AccountStore, RoundStore};
use crate::game::RoundResult;
use crate::table::ParticipantId;
use crate::wallet::{Account, AccountDelta};

/// Account store backed by a map
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<ParticipantId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.participant_id, account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, participant_id: &ParticipantId) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(participant_id).cloned())
    }

    async fn insert(&self, account: Account) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.participant_id) {
            return Err(StoreError::Duplicate(account.participant_id.to_string()));
        }
        accounts.insert(account.participant_id, account);
        Ok(())
    }

    async fn apply_delta(
        &self,
        participant_id: &ParticipantId,
        delta: &AccountDelta,
    ) -> StoreResult<Account> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(participant_id)
            .ok_or_else(|| StoreError::NotFound(participant_id.to_string()))?;
        account.apply(delta);
        Ok(account.clone())
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        Ok(self.accounts.read().await.values().cloned().collect())
    }
}

/// Round store backed by an append-only vector
#[derive(Debug, Default)]
pub struct InMemoryRoundStore {
    rounds: RwLock<Vec<RoundResult>>,
}

impl InMemoryRoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rounds
    pub async fn len(&self) -> usize {
        self.rounds.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rounds.read().await.is_empty()
    }
}

#[async_trait]
impl RoundStore for InMemoryRoundStore {
    async fn save(&self, result: &RoundResult) -> StoreResult<()> {
        let mut rounds = self.rounds.write().await;
        if rounds.iter().any(|r| r.round_id == result.round_id) {
            return Err(StoreError::Duplicate(result.round_id.to_string()));
        }
        rounds.push(result.clone());
        Ok(())
    }

    async fn get(&self, round_id: &Uuid) -> StoreResult<Option<RoundResult>> {
        let rounds = self.rounds.read().await;
        Ok(rounds.iter().find(|r| &r.round_id == round_id).cloned())
    }

    async fn recent_for_participant(
        &self,
        participant_id: &ParticipantId,
        limit: usize,
    ) -> StoreResult<Vec<RoundResult>> {
        let rounds = self.rounds.read().await;
        let mut history: Vec<RoundResult> = rounds
            .iter()
            .filter(|r| r.involves(participant_id))
            .cloned()
            .collect();
        history.sort_by(|a, b| b.round_number.cmp(&a.round_number));
        history.truncate(limit);
        Ok(history)
    }
}
