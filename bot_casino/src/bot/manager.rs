//! Bot manager spawning simulated participants onto a table.

use super::{
    errors::BotResult,
    models::{BOT_AVATAR_STYLE, BotConfig, BotPlayer, BotStats},
};
use crate::engine::{Engine, SubscriberHub, Subscription, TableEvent};
use crate::table::{ParticipantId, Phase};
use crate::wallet::{WalletError, WalletManager};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

/// Shared per-bot statistics
type StatsMap = Arc<RwLock<HashMap<ParticipantId, (String, BotStats)>>>;

/// Bot manager for a single table
pub struct BotManager {
    engine: Arc<Engine>,
    wallet: WalletManager,
    hub: Arc<SubscriberHub>,

    /// Running bot tasks (participant_id -> task)
    tasks: HashMap<ParticipantId, JoinHandle<()>>,

    stats: StatsMap,
    shutdown_tx: watch::Sender<bool>,
}

impl BotManager {
    /// Create a new bot manager
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine running the table the bots sit at
    /// * `wallet` - Wallet used to register and refill bot accounts
    /// * `hub` - Hub the bots subscribe to for phase and result events
    pub fn new(engine: Arc<Engine>, wallet: WalletManager, hub: Arc<SubscriberHub>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            engine,
            wallet,
            hub,
            tasks: HashMap::new(),
            stats: Arc::new(RwLock::new(HashMap::new())),
            shutdown_tx,
        }
    }

    /// Register, seat and start one task per bot
    ///
    /// # Returns
    ///
    /// * `BotResult<usize>` - Number of bots spawned
    pub async fn spawn_bots(&mut self, configs: Vec<BotConfig>) -> BotResult<usize> {
        let mut spawned = 0;

        for config in configs {
            let account = self
                .wallet
                .register(&config.name, &config.name, BOT_AVATAR_STYLE)
                .await?;
            let participant_id = account.participant_id;
            self.engine
                .join(self.engine.table_id(), participant_id)
                .await?;

            log::info!(
                "Spawned bot {} ({}) with strategy {}",
                config.name,
                participant_id,
                config.strategy
            );

            self.stats
                .write()
                .await
                .insert(participant_id, (config.name.clone(), BotStats::default()));

            let task = BotTask {
                bot: BotPlayer::new(participant_id, config),
                engine: self.engine.clone(),
                wallet: self.wallet.clone(),
                stats: self.stats.clone(),
            };
            let subscription = self.hub.subscribe();
            let shutdown = self.shutdown_tx.subscribe();
            let handle = tokio::spawn(task.run(subscription, shutdown));

            self.tasks.insert(participant_id, handle);
            spawned += 1;
        }

        Ok(spawned)
    }

    /// Get number of running bots
    pub fn bot_count(&self) -> usize {
        self.tasks.len()
    }

    /// Statistics per bot, sorted by name
    pub async fn stats(&self) -> Vec<(ParticipantId, String, BotStats)> {
        let mut stats: Vec<_> = self
            .stats
            .read()
            .await
            .iter()
            .map(|(id, (name, stats))| (*id, name.clone(), stats.clone()))
            .collect();
        stats.sort_by(|a, b| a.1.cmp(&b.1));
        stats
    }

    /// Stop every bot task and unseat the bots
    pub async fn shutdown(&mut self) {
        self.shutdown_tx.send_replace(true);

        let table_id = self.engine.table_id().clone();
        for (participant_id, handle) in self.tasks.drain() {
            if let Err(e) = handle.await {
                log::warn!("Bot {} task ended abnormally: {}", participant_id, e);
            }
            if let Err(e) = self.engine.leave(&table_id, participant_id).await {
                log::warn!("Bot {} could not leave table: {}", participant_id, e);
            }
        }

        log::info!("All bots stopped");
    }
}

/// One bot reacting to table events
struct BotTask {
    bot: BotPlayer,
    engine: Arc<Engine>,
    wallet: WalletManager,
    stats: StatsMap,
}

impl BotTask {
    async fn run(mut self, mut subscription: Subscription, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                event = subscription.receiver.recv() => match event {
                    Some(TableEvent::PhaseChange(change)) if change.phase == Phase::Betting => {
                        self.on_betting_open().await;
                    }
                    Some(TableEvent::RoundSettled { result, .. }) => {
                        self.bot.record_round(&result);
                        self.publish_stats().await;
                    }
                    Some(_) => {}
                    None => break,
                },
            }
        }

        log::debug!(
            "Bot {} stopped after {} rounds",
            self.bot.config.name,
            self.bot.stats.rounds_played
        );
    }

    async fn on_betting_open(&mut self) {
        let id = self.bot.participant_id;

        let mut balance = match self.wallet.get_account(&id).await {
            Ok(account) => account.balance,
            Err(e) => {
                log::warn!("Bot {} could not read balance: {}", self.bot.config.name, e);
                return;
            }
        };

        if balance <= 0 && self.bot.config.auto_refill {
            match self.wallet.claim_refill(&id).await {
                Ok(account) => {
                    balance = account.balance;
                    self.bot.stats.refills += 1;
                }
                Err(WalletError::RefillCooldown(until)) => {
                    log::debug!(
                        "Bot {} is broke, refill available at {}",
                        self.bot.config.name,
                        until
                    );
                }
                Err(e) => {
                    log::warn!("Bot {} refill failed: {}", self.bot.config.name, e);
                }
            }
        }

        let Some(intent) = self.bot.strategy_mut().decide(balance) else {
            return;
        };

        let amount = intent.amount.min(balance);
        if amount <= 0 {
            return;
        }

        let table_id = self.engine.table_id().clone();
        if let Err(e) = self
            .engine
            .place_bet(&table_id, id, intent.kind, intent.value, amount)
            .await
        {
            self.bot.stats.rejected_bets += 1;
            log::debug!(
                "Bot {} bet {} for {} rejected: {}",
                self.bot.config.name,
                intent.kind,
                amount,
                e
            );
        }
    }

    async fn publish_stats(&mut self) {
        if let Some(entry) = self.stats.write().await.get_mut(&self.bot.participant_id) {
            entry.1 = self.bot.stats.clone();
        }
    }
}
