//! The engine: one table, its collaborators and the caller-facing API.

use super::{
    errors::{CasinoError, CasinoResult},
    events::{Broadcaster, TableEvent},
    leaderboard::{self, LeaderboardEntry},
    models::{GAME_TYPE, GameInfo, TableSnapshot},
};
use crate::db::{AccountStore, RoundStore};
use crate::game::{BetKind, RoundResult, SecureWheel, Wheel};
use crate::table::{Bet, ParticipantId, Seat, Table, TableConfig, TableId, TableStatus};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

/// Roulette table engine
///
/// Owns the table state behind a single lock and drives its phases from
/// [`run`](Engine::run). Share it with `Arc`; every operation takes `&self`.
pub struct Engine {
    pub(super) config: TableConfig,
    pub(super) table: RwLock<Table>,
    pub(super) accounts: Arc<dyn AccountStore>,
    pub(super) rounds: Arc<dyn RoundStore>,
    pub(super) broadcaster: Arc<dyn Broadcaster>,
    pub(super) wheel: Arc<dyn Wheel>,
    pub(super) stop_tx: watch::Sender<bool>,
}

impl Engine {
    /// Create a new engine with a secure wheel
    ///
    /// # Arguments
    ///
    /// * `config` - Table configuration
    /// * `accounts` - Account storage used for balances and settlement
    /// * `rounds` - Round result storage
    /// * `broadcaster` - Sink for table notifications
    pub fn new(
        config: TableConfig,
        accounts: Arc<dyn AccountStore>,
        rounds: Arc<dyn RoundStore>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            table: RwLock::new(Table::new(config.clone())),
            config,
            accounts,
            rounds,
            broadcaster,
            wheel: Arc::new(SecureWheel),
            stop_tx,
        }
    }

    /// Replace the outcome source
    pub fn with_wheel(mut self, wheel: Arc<dyn Wheel>) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn table_id(&self) -> &TableId {
        &self.config.table_id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn check_table(&self, table_id: &str) -> CasinoResult<()> {
        if table_id != self.config.table_id {
            return Err(CasinoError::TableNotFound(table_id.to_string()));
        }
        Ok(())
    }

    /// Seat a registered participant, using the name and avatar on their account
    pub async fn join(&self, table_id: &str, participant_id: ParticipantId) -> CasinoResult<Seat> {
        self.check_table(table_id)?;
        let account = self
            .accounts
            .get(&participant_id)
            .await?
            .ok_or(CasinoError::AccountNotFound(participant_id))?;

        let mut table = self.table.write().await;
        Ok(table.join(
            participant_id,
            &account.name,
            &account.avatar_seed,
            &account.avatar_style,
        )?)
    }

    /// Remove a participant's seat; returns the seat if there was one
    pub async fn leave(
        &self,
        table_id: &str,
        participant_id: ParticipantId,
    ) -> CasinoResult<Option<Seat>> {
        self.check_table(table_id)?;
        Ok(self.table.write().await.leave(&participant_id))
    }

    /// Place a bet against the participant's stored balance
    ///
    /// The balance is read before the table lock is taken. Accepted bets are
    /// announced to observers.
    ///
    /// # Errors
    ///
    /// * `CasinoError::Table` - Any table rule violation, unchanged
    /// * `CasinoError::AccountNotFound` - Participant has no account
    pub async fn place_bet(
        &self,
        table_id: &str,
        participant_id: ParticipantId,
        kind: BetKind,
        value: Option<u8>,
        amount: i64,
    ) -> CasinoResult<Bet> {
        self.check_table(table_id)?;
        let account = self
            .accounts
            .get(&participant_id)
            .await?
            .ok_or(CasinoError::AccountNotFound(participant_id))?;

        let bet = {
            let mut table = self.table.write().await;
            table.place_bet(participant_id, kind, value, amount, account.balance)?
        };

        self.broadcaster.notify(TableEvent::NewBet {
            table_id: self.config.table_id.clone(),
            bet: bet.clone(),
        });

        Ok(bet)
    }

    /// Current table status
    pub async fn status(&self, table_id: &str) -> CasinoResult<TableStatus> {
        self.check_table(table_id)?;
        Ok(self.table.read().await.status())
    }

    /// Most recently settled round
    pub async fn last_result(&self, table_id: &str) -> CasinoResult<Option<RoundResult>> {
        self.check_table(table_id)?;
        Ok(self.table.read().await.last_result().cloned())
    }

    /// Top accounts by balance; `None` uses the configured leaderboard size
    pub async fn leaderboard(&self, limit: Option<usize>) -> CasinoResult<Vec<LeaderboardEntry>> {
        let accounts = self.accounts.list().await?;
        Ok(leaderboard::rank(
            &accounts,
            limit.unwrap_or(self.config.leaderboard_size),
        ))
    }

    /// Rounds the participant bet in, newest first
    pub async fn history(
        &self,
        participant_id: ParticipantId,
        limit: usize,
    ) -> CasinoResult<Vec<RoundResult>> {
        Ok(self
            .rounds
            .recent_for_participant(&participant_id, limit)
            .await?)
    }

    /// Status plus leaderboard for a newly connected observer
    pub async fn snapshot(&self) -> CasinoResult<TableSnapshot> {
        let status = self.table.read().await.status();
        let leaderboard = self.leaderboard(None).await?;
        Ok(TableSnapshot {
            status,
            leaderboard,
        })
    }

    /// Catalogue entry for this table
    pub async fn describe(&self) -> GameInfo {
        let table = self.table.read().await;
        GameInfo {
            game_type: GAME_TYPE.to_string(),
            table_id: self.config.table_id.clone(),
            phase: table.phase(),
            seat_count: table.seat_count(),
            max_seats: self.config.max_seats,
        }
    }

    /// Ask the phase loop to stop
    ///
    /// The loop exits at its next stage boundary or suspension point. A round
    /// that is being settled is finished first.
    pub fn stop(&self) {
        if !self.stop_tx.send_replace(true) {
            log::info!("Table {}: stop requested", self.config.table_id);
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryAccountStore, InMemoryRoundStore};
    use crate::engine::events::NullBroadcaster;
    use crate::table::{Phase, TableError};
    use crate::wallet::Account;
    use chrono::Utc;
    use uuid::Uuid;

    fn account(name: &str, balance: i64) -> Account {
        Account {
            participant_id: Uuid::new_v4(),
            name: name.to_string(),
            avatar_seed: format!("{name}-seed"),
            avatar_style: "bottts".to_string(),
            balance,
            total_wagered: 0,
            total_won: 0,
            total_lost: 0,
            rounds_played: 0,
            wins: 0,
            losses: 0,
            last_refill_at: None,
            created_at: Utc::now(),
        }
    }

    fn engine(accounts: Vec<Account>) -> Engine {
        Engine::new(
            TableConfig::default(),
            Arc::new(InMemoryAccountStore::with_accounts(accounts)),
            Arc::new(InMemoryRoundStore::new()),
            Arc::new(NullBroadcaster),
        )
    }

    #[tokio::test]
    async fn test_join_uses_account_profile() {
        let acc = account("Lucky", 1000);
        let id = acc.participant_id;
        let engine = engine(vec![acc]);

        let seat = engine.join("main", id).await.unwrap();
        assert_eq!(seat.name, "Lucky");
        assert_eq!(seat.avatar_seed, "Lucky-seed");
        assert_eq!(engine.describe().await.seat_count, 1);
    }

    #[tokio::test]
    async fn test_unknown_table_and_account() {
        let engine = engine(Vec::new());
        let err = engine.status("other").await.unwrap_err();
        assert_eq!(err.code(), "TABLE_NOT_FOUND");

        let err = engine.join("main", Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, CasinoError::AccountNotFound(_)));
    }

    #[tokio::test]
    async fn test_bet_while_idle_is_closed() {
        let acc = account("Lucky", 1000);
        let id = acc.participant_id;
        let engine = engine(vec![acc]);
        engine.join("main", id).await.unwrap();

        let err = engine
            .place_bet("main", id, BetKind::Red, None, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, CasinoError::Table(TableError::BettingClosed)));
    }

    #[tokio::test]
    async fn test_describe_and_snapshot() {
        let engine = engine(vec![account("a", 10), account("b", 20)]);

        let info = engine.describe().await;
        assert_eq!(info.game_type, "european_roulette");
        assert_eq!(info.phase, Phase::Idle);
        assert_eq!(info.max_seats, 25);

        let snapshot = engine.snapshot().await.unwrap();
        assert_eq!(snapshot.status.round_number, 0);
        assert_eq!(snapshot.leaderboard[0].name, "b");
    }

    #[test]
    fn test_stop_is_sticky() {
        let engine = engine(Vec::new());
        assert!(!engine.is_stopped());
        engine.stop();
        engine.stop();
        assert!(engine.is_stopped());
    }
}
