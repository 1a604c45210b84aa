//! Leaderboard ranking over all accounts.

use crate::table::ParticipantId;
use crate::wallet::Account;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a participant's lifetime result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn from_net(net: i64) -> Self {
        match net.cmp(&0) {
            Ordering::Greater => Trend::Up,
            Ordering::Less => Trend::Down,
            Ordering::Equal => Trend::Neutral,
        }
    }
}

/// One ranked participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub participant_id: ParticipantId,
    pub name: String,
    pub avatar_seed: String,
    pub avatar_style: String,
    pub balance: i64,
    pub total_wagered: i64,
    pub total_won: i64,
    pub rounds_played: u64,
    pub trend: Trend,
}

impl From<&Account> for LeaderboardEntry {
    fn from(account: &Account) -> Self {
        Self {
            participant_id: account.participant_id,
            name: account.name.clone(),
            avatar_seed: account.avatar_seed.clone(),
            avatar_style: account.avatar_style.clone(),
            balance: account.balance,
            total_wagered: account.total_wagered,
            total_won: account.total_won,
            rounds_played: account.rounds_played,
            trend: Trend::from_net(account.net_result()),
        }
    }
}

/// Rank accounts by balance, highest first, and keep the top `limit`
///
/// Equal balances are ordered by name, then participant ID, so the ranking
/// does not depend on storage order.
pub fn rank(accounts: &[Account], limit: usize) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&Account> = accounts.iter().collect();
    sorted.sort_by(|a, b| {
        b.balance
            .cmp(&a.balance)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });

    sorted
        .into_iter()
        .take(limit)
        .map(LeaderboardEntry::from)
        .collect()
}
