//! Wallet data models.

use crate::table::{Bet, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participant account with balance and lifetime statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub participant_id: ParticipantId,
    pub name: String,
    pub avatar_seed: String,
    pub avatar_style: String,
    pub balance: i64,
    pub total_wagered: i64,
    pub total_won: i64,
    pub total_lost: i64,
    pub rounds_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub last_refill_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Apply field deltas in place
    pub fn apply(&mut self, delta: &AccountDelta) {
        self.balance = self.balance.saturating_add(delta.balance);
        self.total_wagered = self.total_wagered.saturating_add(delta.total_wagered);
        self.total_won = self.total_won.saturating_add(delta.total_won);
        self.total_lost = self.total_lost.saturating_add(delta.total_lost);
        self.rounds_played += delta.rounds_played;
        self.wins += delta.wins;
        self.losses += delta.losses;
        if let Some(at) = delta.refilled_at {
            self.last_refill_at = Some(at);
        }
    }

    /// Lifetime winnings minus lifetime losses
    pub fn net_result(&self) -> i64 {
        self.total_won - self.total_lost
    }
}

/// Field changes applied atomically to one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDelta {
    pub balance: i64,
    pub total_wagered: i64,
    pub total_won: i64,
    pub total_lost: i64,
    pub rounds_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub refilled_at: Option<DateTime<Utc>>,
}

impl AccountDelta {
    /// Balance and statistics change for one settled bet
    pub fn for_settled_bet(bet: &Bet) -> Self {
        if bet.is_winner {
            let net_win = bet.payout - bet.amount;
            Self {
                balance: net_win,
                total_wagered: bet.amount,
                total_won: net_win,
                rounds_played: 1,
                wins: 1,
                ..Self::default()
            }
        } else {
            Self {
                balance: -bet.amount,
                total_wagered: bet.amount,
                total_lost: bet.amount,
                rounds_played: 1,
                losses: 1,
                ..Self::default()
            }
        }
    }

    /// Refill credit
    pub fn refill(amount: i64, at: DateTime<Utc>) -> Self {
        Self {
            balance: amount,
            refilled_at: Some(at),
            ..Self::default()
        }
    }
}
