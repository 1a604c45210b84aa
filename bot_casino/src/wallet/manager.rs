//! Wallet manager implementation with registration and refills.

use super::{
    errors::{WalletError, WalletResult},
    models::{Account, AccountDelta},
};
use crate::db::AccountStore;
use crate::table::ParticipantId;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Maximum display name length in characters
const MAX_NAME_LEN: usize = 32;

/// Wallet policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Chips credited to a new account
    pub starting_balance: i64,

    /// Chips credited by a refill
    pub refill_amount: i64,

    /// Minimum time between refills in hours
    pub refill_cooldown_hours: i64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            refill_amount: 1000,
            refill_cooldown_hours: 24,
        }
    }
}

impl WalletConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.starting_balance < 0 {
            return Err("Starting balance must not be negative".to_string());
        }
        if self.refill_amount <= 0 {
            return Err("Refill amount must be positive".to_string());
        }
        if self.refill_cooldown_hours < 0 {
            return Err("Refill cooldown must not be negative".to_string());
        }
        Ok(())
    }
}

/// Wallet manager
#[derive(Clone)]
pub struct WalletManager {
    store: Arc<dyn AccountStore>,
    config: WalletConfig,
}

impl WalletManager {
    /// Create a new wallet manager
    ///
    /// # Arguments
    ///
    /// * `store` - Account storage
    /// * `config` - Wallet policy
    pub fn new(store: Arc<dyn AccountStore>, config: WalletConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Create an account funded with the starting balance
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidName` - Name empty or longer than 32 characters
    pub async fn register(
        &self,
        name: &str,
        avatar_seed: &str,
        avatar_style: &str,
    ) -> WalletResult<Account> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(WalletError::InvalidName(format!(
                "name must be 1-{MAX_NAME_LEN} characters"
            )));
        }

        let account = Account {
            participant_id: Uuid::new_v4(),
            name: name.to_string(),
            avatar_seed: avatar_seed.to_string(),
            avatar_style: avatar_style.to_string(),
            balance: self.config.starting_balance,
            total_wagered: 0,
            total_won: 0,
            total_lost: 0,
            rounds_played: 0,
            wins: 0,
            losses: 0,
            last_refill_at: None,
            created_at: Utc::now(),
        };

        self.store.insert(account.clone()).await?;
        log::info!(
            "Registered account {} ({}) with {} chips",
            account.participant_id,
            account.name,
            account.balance
        );

        Ok(account)
    }

    /// Get an account
    pub async fn get_account(&self, participant_id: &ParticipantId) -> WalletResult<Account> {
        self.store
            .get(participant_id)
            .await?
            .ok_or(WalletError::AccountNotFound(*participant_id))
    }

    /// Refill an empty balance
    ///
    /// # Errors
    ///
    /// * `WalletError::RefillNotAvailable` - Balance is not zero
    /// * `WalletError::RefillCooldown` - Cooldown since the last refill not elapsed
    pub async fn claim_refill(&self, participant_id: &ParticipantId) -> WalletResult<Account> {
        let account = self.get_account(participant_id).await?;

        if account.balance > 0 {
            return Err(WalletError::RefillNotAvailable {
                balance: account.balance,
            });
        }

        let now = Utc::now();
        if let Some(last) = account.last_refill_at {
            let cooldown_end = last + Duration::hours(self.config.refill_cooldown_hours);
            if now < cooldown_end {
                return Err(WalletError::RefillCooldown(cooldown_end));
            }
        }

        // Top up to the refill amount even if settlement left a negative balance
        let credit = self.config.refill_amount - account.balance;
        let updated = self
            .store
            .apply_delta(participant_id, &AccountDelta::refill(credit, now))
            .await?;

        log::info!(
            "Participant {} ({}) refilled with {} chips",
            participant_id,
            updated.name,
            self.config.refill_amount
        );

        Ok(updated)
    }
}
