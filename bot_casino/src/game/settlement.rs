//! Round settlement: resolving bets against a spin.

use super::{
    rules::winning_payout,
    wheel::{Color, Spin},
};
use crate::table::{Bet, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bets of one round resolved against its spin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledRound {
    pub spin: Spin,
    /// Bets in placement order with final payout and winner flag
    pub bets: Vec<Bet>,
    pub total_wagered: i64,
    pub total_payout: i64,
    pub winners: usize,
    pub losers: usize,
}

impl SettledRound {
    /// House result from the players' side: positive when players won
    pub fn net(&self) -> i64 {
        self.total_payout - self.total_wagered
    }
}

/// Resolve `bets` against `spin`, keeping placement order
pub fn settle_bets(bets: &[Bet], spin: Spin) -> SettledRound {
    let mut total_wagered: i64 = 0;
    let mut total_payout: i64 = 0;
    let mut winners = 0;

    let bets: Vec<Bet> = bets
        .iter()
        .map(|bet| {
            total_wagered = total_wagered.saturating_add(bet.amount);
            let mut bet = bet.clone();
            if bet.kind.wins(bet.value, spin) {
                bet.payout = winning_payout(bet.kind, bet.amount);
                bet.is_winner = true;
                total_payout = total_payout.saturating_add(bet.payout);
                winners += 1;
            } else {
                bet.payout = 0;
                bet.is_winner = false;
            }
            bet
        })
        .collect();

    let losers = bets.len() - winners;

    SettledRound {
        spin,
        bets,
        total_wagered,
        total_payout,
        winners,
        losers,
    }
}

/// Permanent record of one settled round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: Uuid,
    pub table_id: TableId,
    pub round_number: u64,
    pub outcome: u8,
    pub color: Color,
    pub timestamp: DateTime<Utc>,
    pub bets: Vec<Bet>,
    pub total_wagered: i64,
    pub total_payout: i64,
}

impl RoundResult {
    pub fn new(table_id: TableId, round_number: u64, settled: SettledRound) -> Self {
        Self {
            round_id: Uuid::new_v4(),
            table_id,
            round_number,
            outcome: settled.spin.number,
            color: settled.spin.color,
            timestamp: Utc::now(),
            bets: settled.bets,
            total_wagered: settled.total_wagered,
            total_payout: settled.total_payout,
        }
    }

    /// Whether a participant placed any bet in this round
    pub fn involves(&self, participant_id: &Uuid) -> bool {
        self.bets
            .iter()
            .any(|bet| &bet.participant_id == participant_id)
    }
}
