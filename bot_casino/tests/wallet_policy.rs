//! Wallet policy tests across settlement and refills.

use bot_casino::db::{InMemoryAccountStore, InMemoryRoundStore};
use bot_casino::engine::{Engine, NullBroadcaster};
use bot_casino::game::{BetKind, ScriptedWheel};
use bot_casino::table::{Phase, TableConfig};
use bot_casino::wallet::{WalletConfig, WalletError, WalletManager};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_refill_after_losing_everything() {
    let accounts = Arc::new(InMemoryAccountStore::new());
    let wallet = WalletManager::new(
        accounts.clone(),
        WalletConfig {
            starting_balance: 25,
            refill_amount: 1000,
            refill_cooldown_hours: 24,
        },
    );
    let engine = Arc::new(
        Engine::new(
            TableConfig {
                betting_duration: Duration::from_secs(1),
                spin_duration: Duration::from_secs(1),
                settlement_duration: Duration::from_secs(1),
                pause_duration: Duration::from_secs(1),
                ..TableConfig::default()
            },
            accounts,
            Arc::new(InMemoryRoundStore::new()),
            Arc::new(NullBroadcaster),
        )
        // Zero: every colour bet loses
        .with_wheel(Arc::new(ScriptedWheel::new(vec![0]).unwrap())),
    );

    let account = wallet.register("Gambler", "seed", "bottts").await.unwrap();
    let id = account.participant_id;

    // Refill is refused while chips remain
    let err = wallet.claim_refill(&id).await.unwrap_err();
    assert!(matches!(err, WalletError::RefillNotAvailable { balance: 25 }));

    engine.join("main", id).await.unwrap();
    let runner = engine.clone();
    let handle = tokio::spawn(async move { runner.run().await });
    while engine.status("main").await.unwrap().phase != Phase::Betting {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    engine
        .place_bet("main", id, BetKind::Red, None, 25)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;
    engine.stop();
    handle.await.unwrap();

    let broke = wallet.get_account(&id).await.unwrap();
    assert_eq!(broke.balance, 0);
    assert_eq!(broke.total_lost, 25);

    let refilled = wallet.claim_refill(&id).await.unwrap();
    assert_eq!(refilled.balance, 1000);
    assert!(refilled.last_refill_at.is_some());

    // Second refill needs an empty balance again
    let err = wallet.claim_refill(&id).await.unwrap_err();
    assert_eq!(err.code(), "REFILL_COOLDOWN");
}

#[tokio::test]
async fn test_leaderboard_reflects_registrations() {
    let accounts = Arc::new(InMemoryAccountStore::new());
    let rich = WalletManager::new(
        accounts.clone(),
        WalletConfig {
            starting_balance: 5000,
            ..WalletConfig::default()
        },
    );
    let poor = WalletManager::new(
        accounts.clone(),
        WalletConfig {
            starting_balance: 50,
            ..WalletConfig::default()
        },
    );
    let engine = Engine::new(
        TableConfig {
            leaderboard_size: 1,
            ..TableConfig::default()
        },
        accounts,
        Arc::new(InMemoryRoundStore::new()),
        Arc::new(NullBroadcaster),
    );

    poor.register("Poor", "p", "bottts").await.unwrap();
    rich.register("Rich", "r", "bottts").await.unwrap();

    let top = engine.leaderboard(None).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Rich");

    let all = engine.leaderboard(Some(10)).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].balance, 50);
}
