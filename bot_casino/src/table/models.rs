//! Table data models.

use crate::game::{BetKind, RoundResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Table ID type
pub type TableId = String;

/// Participant ID type (issued by the identity layer)
pub type ParticipantId = Uuid;

/// Table phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Betting,
    Spinning,
    Settlement,
    Pause,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Betting => write!(f, "betting"),
            Phase::Spinning => write!(f, "spinning"),
            Phase::Settlement => write!(f, "settlement"),
            Phase::Pause => write!(f, "pause"),
        }
    }
}

/// A participant's place at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub participant_id: ParticipantId,
    pub name: String,
    pub avatar_seed: String,
    pub avatar_style: String,
    pub joined_at: DateTime<Utc>,
}

/// A single wager in the current round
///
/// Only `payout` and `is_winner` change after placement, and only once,
/// when the round is settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub avatar_seed: String,
    pub kind: BetKind,
    pub value: Option<u8>,
    pub amount: i64,
    pub payout: i64,
    pub is_winner: bool,
}

impl Bet {
    /// Net effect of this bet on the participant's balance once settled
    pub fn net(&self) -> i64 {
        if self.is_winner {
            self.payout - self.amount
        } else {
            -self.amount
        }
    }
}

/// Running aggregates for the current UTC day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub day: NaiveDate,
    pub rounds: u64,
    pub wagered: i64,
}

impl DailyStats {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            rounds: 0,
            wagered: 0,
        }
    }

    /// Count a settled round, starting over when the day has changed
    pub fn record(&mut self, day: NaiveDate, wagered: i64) {
        self.roll_over(day);
        self.rounds += 1;
        self.wagered = self.wagered.saturating_add(wagered);
    }

    /// Reset the counters if `day` is past the tracked day
    pub fn roll_over(&mut self, day: NaiveDate) {
        if day > self.day {
            *self = Self::new(day);
        }
    }
}

/// Read-only projection of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStatus {
    pub table_id: TableId,
    pub phase: Phase,
    /// Seconds left in the current phase
    pub time_remaining: f64,
    pub round_number: u64,
    pub seats: Vec<Seat>,
    pub seat_count: usize,
    pub max_seats: usize,
    pub bets: Vec<Bet>,
    pub last_result: Option<RoundResult>,
    pub total_rounds_today: u64,
    pub total_wagered_today: i64,
}
