//! Phase loop and settlement tests with a paused clock.
//!
//! The runtime clock is paused, so every sleep in the engine completes as
//! soon as the runtime is otherwise idle and rounds run deterministically.

use async_trait::async_trait;
use bot_casino::db::{
    AccountStore, InMemoryAccountStore, InMemoryRoundStore, RoundStore, StoreError, StoreResult,
};
use bot_casino::engine::{Broadcaster, Engine, TableEvent};
use bot_casino::game::{BetKind, Color, RoundResult, ScriptedWheel};
use bot_casino::table::{ParticipantId, Phase, TableConfig};
use bot_casino::wallet::{Account, AccountDelta, WalletConfig, WalletManager};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Broadcaster that keeps every event
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<TableEvent>>,
}

impl Recorder {
    fn events(&self) -> Vec<TableEvent> {
        self.events.lock().unwrap().clone()
    }

    fn phases(&self) -> Vec<(Phase, u64)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TableEvent::PhaseChange(change) => Some((change.phase, change.round_number)),
                _ => None,
            })
            .collect()
    }

    fn settled(&self) -> Vec<RoundResult> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TableEvent::RoundSettled { result, .. } => Some(result),
                _ => None,
            })
            .collect()
    }
}

impl Broadcaster for Recorder {
    fn notify(&self, event: TableEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Round store that is always down
struct BrokenRoundStore;

#[async_trait]
impl RoundStore for BrokenRoundStore {
    async fn save(&self, _result: &RoundResult) -> StoreResult<()> {
        Err(StoreError::Unavailable("disk full".to_string()))
    }

    async fn get(&self, _round_id: &Uuid) -> StoreResult<Option<RoundResult>> {
        Ok(None)
    }

    async fn recent_for_participant(
        &self,
        _participant_id: &ParticipantId,
        _limit: usize,
    ) -> StoreResult<Vec<RoundResult>> {
        Ok(Vec::new())
    }
}

/// Account store that refuses updates for one participant, or updates slowly
struct FlakyAccountStore {
    inner: InMemoryAccountStore,
    reject: Mutex<Option<ParticipantId>>,
    delay: Duration,
}

impl FlakyAccountStore {
    fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryAccountStore::new(),
            reject: Mutex::new(None),
            delay,
        }
    }
}

#[async_trait]
impl AccountStore for FlakyAccountStore {
    async fn get(&self, participant_id: &ParticipantId) -> StoreResult<Option<Account>> {
        self.inner.get(participant_id).await
    }

    async fn insert(&self, account: Account) -> StoreResult<()> {
        self.inner.insert(account).await
    }

    async fn apply_delta(
        &self,
        participant_id: &ParticipantId,
        delta: &AccountDelta,
    ) -> StoreResult<Account> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if *self.reject.lock().unwrap() == Some(*participant_id) {
            return Err(StoreError::Unavailable("write timeout".to_string()));
        }
        self.inner.apply_delta(participant_id, delta).await
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        self.inner.list().await
    }
}

/// One second per phase
fn fast_config() -> TableConfig {
    TableConfig {
        bet_rate_limit: Duration::ZERO,
        betting_duration: Duration::from_secs(1),
        spin_duration: Duration::from_secs(1),
        settlement_duration: Duration::from_secs(1),
        pause_duration: Duration::from_secs(1),
        idle_poll: Duration::from_secs(1),
        ..TableConfig::default()
    }
}

const ROUND: Duration = Duration::from_secs(4);

struct Harness {
    engine: Arc<Engine>,
    wallet: WalletManager,
    recorder: Arc<Recorder>,
}

impl Harness {
    fn new(
        accounts: Arc<dyn AccountStore>,
        rounds: Arc<dyn RoundStore>,
        outcomes: Vec<u8>,
    ) -> Self {
        let recorder = Arc::new(Recorder::default());
        let engine = Engine::new(fast_config(), accounts.clone(), rounds, recorder.clone())
            .with_wheel(Arc::new(ScriptedWheel::new(outcomes).unwrap()));
        Self {
            engine: Arc::new(engine),
            wallet: WalletManager::new(accounts, WalletConfig::default()),
            recorder,
        }
    }

    async fn seat(&self, name: &str) -> ParticipantId {
        let account = self.wallet.register(name, name, "bottts").await.unwrap();
        self.engine
            .join("main", account.participant_id)
            .await
            .unwrap();
        account.participant_id
    }

    fn spawn(&self) -> tokio::task::JoinHandle<()> {
        let runner = self.engine.clone();
        tokio::spawn(async move { runner.run().await })
    }

    async fn wait_for_betting(&self) {
        while self.engine.status("main").await.unwrap().phase != Phase::Betting {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    async fn balance(&self, id: ParticipantId) -> i64 {
        self.wallet.get_account(&id).await.unwrap().balance
    }
}

#[tokio::test(start_paused = true)]
async fn test_round_numbers_increase_by_one_over_1000_rounds() {
    let harness = Harness::new(
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(InMemoryRoundStore::new()),
        vec![0, 7, 17, 36],
    );
    harness.seat("Watcher").await;
    let handle = harness.spawn();

    tokio::time::sleep(ROUND * 1000).await;
    harness.engine.stop();
    handle.await.unwrap();

    let opened: Vec<u64> = harness
        .recorder
        .phases()
        .into_iter()
        .filter(|(phase, _)| *phase == Phase::Betting)
        .map(|(_, round)| round)
        .collect();

    assert!(opened.len() >= 1000, "only {} rounds opened", opened.len());
    let expected: Vec<u64> = (1..=opened.len() as u64).collect();
    assert_eq!(opened, expected);

    let settled = harness.recorder.settled();
    assert!(settled.len() >= 999);
    assert!(
        settled
            .windows(2)
            .all(|w| w[1].round_number == w[0].round_number + 1)
    );
}

#[tokio::test(start_paused = true)]
async fn test_straight_seventeen_settles() {
    let rounds = Arc::new(InMemoryRoundStore::new());
    let harness = Harness::new(
        Arc::new(InMemoryAccountStore::new()),
        rounds.clone(),
        vec![17],
    );
    let lucky = harness.seat("Lucky").await;
    let unlucky = harness.seat("Unlucky").await;
    let handle = harness.spawn();
    harness.wait_for_betting().await;

    harness
        .engine
        .place_bet("main", lucky, BetKind::Straight, Some(17), 10)
        .await
        .unwrap();
    harness
        .engine
        .place_bet("main", unlucky, BetKind::Red, None, 10)
        .await
        .unwrap();

    // Betting and spin take 2s, settlement is done just after
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let result = harness.engine.last_result("main").await.unwrap().unwrap();
    assert_eq!(result.round_number, 1);
    assert_eq!(result.outcome, 17);
    assert_eq!(result.color, Color::Black);
    assert_eq!(result.total_wagered, 20);
    assert_eq!(result.total_payout, 360);
    assert_eq!(result.bets[0].payout, 360);
    assert!(result.bets[0].is_winner);
    assert_eq!(result.bets[1].payout, 0);
    assert!(!result.bets[1].is_winner);

    assert_eq!(harness.balance(lucky).await, 1350);
    assert_eq!(harness.balance(unlucky).await, 990);

    let winner = harness.wallet.get_account(&lucky).await.unwrap();
    assert_eq!(winner.total_won, 350);
    assert_eq!(winner.wins, 1);
    assert_eq!(winner.rounds_played, 1);
    let loser = harness.wallet.get_account(&unlucky).await.unwrap();
    assert_eq!(loser.total_lost, 10);
    assert_eq!(loser.losses, 1);

    // Settled bets stay visible until the round ends
    let status = harness.engine.status("main").await.unwrap();
    assert_eq!(status.phase, Phase::Settlement);
    assert_eq!(status.bets, result.bets);
    assert_eq!(status.total_rounds_today, 1);
    assert_eq!(status.total_wagered_today, 20);

    assert_eq!(rounds.len().await, 1);
    let history = harness.engine.history(lucky, 10).await.unwrap();
    assert_eq!(history, vec![result.clone()]);

    let names: Vec<&str> = harness.recorder.events().iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec![
            "phase_change",
            "new_bet",
            "new_bet",
            "phase_change",
            "phase_change",
            "round_result"
        ]
    );
    match harness.recorder.events().last() {
        Some(TableEvent::RoundSettled { leaderboard, .. }) => {
            assert_eq!(leaderboard[0].participant_id, lucky);
            assert_eq!(leaderboard[0].balance, 1350);
        }
        other => panic!("expected round result, got {:?}", other),
    }

    harness.engine.stop();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_persistence_failure_still_reaches_pause() {
    let harness = Harness::new(
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(BrokenRoundStore),
        vec![2],
    );
    let id = harness.seat("Red").await;
    let handle = harness.spawn();
    harness.wait_for_betting().await;

    harness
        .engine
        .place_bet("main", id, BetKind::Red, None, 10)
        .await
        .unwrap();

    tokio::time::sleep(ROUND * 2).await;
    harness.engine.stop();
    handle.await.unwrap();

    let phases = harness.recorder.phases();
    assert!(phases.contains(&(Phase::Pause, 1)));
    assert!(phases.contains(&(Phase::Betting, 2)));
    assert!(harness.recorder.settled().is_empty());
    assert!(harness.engine.last_result("main").await.unwrap().is_none());

    // Balances were already updated before the save failed
    assert_eq!(harness.balance(id).await, 990);
}

#[tokio::test(start_paused = true)]
async fn test_account_failure_is_isolated_per_bet() {
    let accounts = Arc::new(FlakyAccountStore::new(Duration::ZERO));
    let rounds = Arc::new(InMemoryRoundStore::new());
    let harness = Harness::new(accounts.clone(), rounds.clone(), vec![1]);
    let ok = harness.seat("Ok").await;
    let broken = harness.seat("Broken").await;
    *accounts.reject.lock().unwrap() = Some(broken);

    let handle = harness.spawn();
    harness.wait_for_betting().await;
    for id in [broken, ok] {
        harness
            .engine
            .place_bet("main", id, BetKind::Red, None, 10)
            .await
            .unwrap();
    }

    tokio::time::sleep(Duration::from_millis(2500)).await;
    harness.engine.stop();
    handle.await.unwrap();

    assert_eq!(harness.balance(ok).await, 1010);
    assert_eq!(harness.balance(broken).await, 1000);

    let result = harness.engine.last_result("main").await.unwrap().unwrap();
    assert_eq!(result.bets.len(), 2);
    assert!(result.bets.iter().all(|b| b.is_winner));
    assert_eq!(rounds.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_during_settlement_finishes_round() {
    let accounts = Arc::new(FlakyAccountStore::new(Duration::from_secs(1)));
    let rounds = Arc::new(InMemoryRoundStore::new());
    let harness = Harness::new(accounts, rounds.clone(), vec![4]);
    let a = harness.seat("A").await;
    let b = harness.seat("B").await;

    let handle = harness.spawn();
    harness.wait_for_betting().await;
    harness
        .engine
        .place_bet("main", a, BetKind::Even, None, 50)
        .await
        .unwrap();
    harness
        .engine
        .place_bet("main", b, BetKind::Odd, None, 50)
        .await
        .unwrap();

    // Settlement starts at 2s and takes 2s of account writes
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(
        harness.engine.status("main").await.unwrap().phase,
        Phase::Settlement
    );
    harness.engine.stop();
    handle.await.unwrap();

    assert_eq!(rounds.len().await, 1);
    assert_eq!(harness.balance(a).await, 1050);
    assert_eq!(harness.balance(b).await, 950);
    assert!(!harness.recorder.phases().contains(&(Phase::Pause, 1)));
}

#[tokio::test(start_paused = true)]
async fn test_empty_table_goes_idle_without_new_rounds() {
    let harness = Harness::new(
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(InMemoryRoundStore::new()),
        vec![9],
    );
    let id = harness.seat("Leaver").await;
    let handle = harness.spawn();
    harness.wait_for_betting().await;

    harness
        .engine
        .place_bet("main", id, BetKind::Red, None, 10)
        .await
        .unwrap();
    harness.engine.leave("main", id).await.unwrap();
    tokio::time::sleep(ROUND * 5).await;

    let status = harness.engine.status("main").await.unwrap();
    assert_eq!(status.phase, Phase::Idle);
    assert_eq!(status.round_number, 1);
    assert_eq!(status.time_remaining, 0.0);
    assert!(status.bets.is_empty());
    assert_eq!(status.last_result.map(|r| r.bets.len()), Some(1));

    let idle_entries = harness
        .recorder
        .phases()
        .into_iter()
        .filter(|(phase, _)| *phase == Phase::Idle)
        .count();
    assert_eq!(idle_entries, 1);

    // Sitting down again starts round 2
    harness.engine.join("main", id).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(harness.engine.status("main").await.unwrap().round_number, 2);

    harness.engine.stop();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_idle() {
    let harness = Harness::new(
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(InMemoryRoundStore::new()),
        vec![0],
    );
    let handle = harness.spawn();
    tokio::time::sleep(Duration::from_secs(3)).await;

    harness.engine.stop();
    handle.await.unwrap();

    assert!(harness.engine.is_stopped());
    assert!(harness.recorder.events().is_empty());
    assert_eq!(
        harness.engine.status("main").await.unwrap().round_number,
        0
    );
}
