//! Bot player models and configuration.

use super::strategy::{Strategy, StrategyKind};
use crate::game::{RoundResult, Spin};
use crate::table::ParticipantId;
use serde::{Deserialize, Serialize};

/// Avatar style used for every bot
pub const BOT_AVATAR_STYLE: &str = "bottts";

/// Bot player configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot display name
    pub name: String,

    /// Betting strategy
    pub strategy: StrategyKind,

    /// Base stake in chips
    pub bet_size: i64,

    /// Number used by the flat-number strategy; random if unset
    pub lucky_number: Option<u8>,

    /// Claim a refill when the balance reaches zero
    pub auto_refill: bool,
}

impl BotConfig {
    /// Build `count` bots cycling through every strategy
    pub fn roster(count: usize, bet_size: i64) -> Vec<BotConfig> {
        (0..count)
            .map(|i| {
                let strategy = StrategyKind::ALL[i % StrategyKind::ALL.len()];
                BotConfig {
                    name: format!("Bot-{:02} {}", i + 1, strategy),
                    strategy,
                    bet_size,
                    lucky_number: None,
                    auto_refill: true,
                }
            })
            .collect()
    }
}

/// Bot statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    /// Rounds the bot bet in
    pub rounds_played: u64,

    /// Rounds the bot sat out
    pub rounds_skipped: u64,

    pub wins: u64,
    pub losses: u64,
    pub total_wagered: i64,

    /// Sum of payouts, stake included
    pub total_payout: i64,

    pub consecutive_losses: u64,
    pub max_consecutive_losses: u64,

    /// Bets the table refused
    pub rejected_bets: u64,

    pub refills: u64,
}

impl BotStats {
    pub fn net_profit(&self) -> i64 {
        self.total_payout - self.total_wagered
    }

    /// Win rate as a percentage of rounds played
    pub fn win_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            (self.wins as f64 / self.rounds_played as f64) * 100.0
        }
    }
}

/// A simulated participant with its strategy
pub struct BotPlayer {
    pub participant_id: ParticipantId,
    pub config: BotConfig,
    pub stats: BotStats,
    strategy: Box<dyn Strategy>,
}

impl BotPlayer {
    /// Create a bot for a registered account
    pub fn new(participant_id: ParticipantId, config: BotConfig) -> Self {
        let strategy = config.strategy.build(config.bet_size, config.lucky_number);
        Self {
            participant_id,
            config,
            stats: BotStats::default(),
            strategy,
        }
    }

    pub fn strategy_mut(&mut self) -> &mut dyn Strategy {
        self.strategy.as_mut()
    }

    /// Update statistics and strategy from a settled round
    ///
    /// Returns whether the bot bet in the round.
    pub fn record_round(&mut self, result: &RoundResult) -> bool {
        let spin = Spin {
            number: result.outcome,
            color: result.color,
        };

        let mine: Vec<_> = result
            .bets
            .iter()
            .filter(|bet| bet.participant_id == self.participant_id)
            .collect();

        if mine.is_empty() {
            self.stats.rounds_skipped += 1;
            self.strategy.on_result(spin, None);
            return false;
        }

        let won = mine.iter().any(|bet| bet.is_winner);
        self.stats.rounds_played += 1;
        self.stats.total_wagered += mine.iter().map(|bet| bet.amount).sum::<i64>();
        self.stats.total_payout += mine.iter().map(|bet| bet.payout).sum::<i64>();

        if won {
            self.stats.wins += 1;
            self.stats.consecutive_losses = 0;
        } else {
            self.stats.losses += 1;
            self.stats.consecutive_losses += 1;
            self.stats.max_consecutive_losses = self
                .stats
                .max_consecutive_losses
                .max(self.stats.consecutive_losses);
        }

        self.strategy.on_result(spin, Some(won));
        true
    }
}
