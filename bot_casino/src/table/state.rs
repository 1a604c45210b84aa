//! Per-table round state with validated mutations.

use super::{
    config::TableConfig,
    errors::{TableError, TableResult},
    models::{Bet, DailyStats, ParticipantId, Phase, Seat, TableId, TableStatus},
};
use crate::game::{BetKind, RoundResult};
use chrono::Utc;
use std::collections::HashMap;
use tokio::time::Instant;

/// A roulette table
///
/// Holds seats, the live bet list and rate-limit records. It owns no timers
/// and performs no I/O; the engine advances its phase.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    phase: Phase,
    phase_started_at: Instant,
    round_number: u64,
    seats: HashMap<ParticipantId, Seat>,
    bets: Vec<Bet>,
    last_result: Option<RoundResult>,
    last_bet_at: HashMap<ParticipantId, Instant>,
    daily: DailyStats,
}

impl Table {
    /// Create an empty table in the IDLE phase
    pub fn new(config: TableConfig) -> Self {
        log::info!("Table {} initialized", config.table_id);
        Self {
            config,
            phase: Phase::Idle,
            phase_started_at: Instant::now(),
            round_number: 0,
            seats: HashMap::new(),
            bets: Vec::new(),
            last_result: None,
            last_bet_at: HashMap::new(),
            daily: DailyStats::new(Utc::now().date_naive()),
        }
    }

    pub fn id(&self) -> &TableId {
        &self.config.table_id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_seated(&self, participant_id: &ParticipantId) -> bool {
        self.seats.contains_key(participant_id)
    }

    /// Live bets in placement order
    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Seat a participant
    ///
    /// Re-joining while already seated overwrites the seat metadata and is
    /// allowed even when the table is full.
    pub fn join(
        &mut self,
        participant_id: ParticipantId,
        name: &str,
        avatar_seed: &str,
        avatar_style: &str,
    ) -> TableResult<Seat> {
        if !self.seats.contains_key(&participant_id) && self.seats.len() >= self.config.max_seats {
            log::warn!(
                "Participant {} tried to join full table {}",
                participant_id,
                self.config.table_id
            );
            return Err(TableError::TableFull {
                table_id: self.config.table_id.clone(),
                max_seats: self.config.max_seats,
            });
        }

        let seat = Seat {
            participant_id,
            name: name.to_string(),
            avatar_seed: avatar_seed.to_string(),
            avatar_style: avatar_style.to_string(),
            joined_at: Utc::now(),
        };
        self.seats.insert(participant_id, seat.clone());

        log::info!(
            "Participant {} ({}) joined table {}. Seated: {}/{}",
            participant_id,
            name,
            self.config.table_id,
            self.seats.len(),
            self.config.max_seats
        );

        Ok(seat)
    }

    /// Remove a participant's seat and rate-limit record; no-op if absent
    pub fn leave(&mut self, participant_id: &ParticipantId) -> Option<Seat> {
        let seat = self.seats.remove(participant_id)?;
        self.last_bet_at.remove(participant_id);

        log::info!(
            "Participant {} ({}) left table {}. Seated: {}/{}",
            participant_id,
            seat.name,
            self.config.table_id,
            self.seats.len(),
            self.config.max_seats
        );

        Some(seat)
    }

    /// Validate and record a bet
    ///
    /// `current_balance` is the participant's externally tracked balance.
    /// Checks run in a fixed order: phase, seat, rate limit, amount, bet
    /// value, balance.
    pub fn place_bet(
        &mut self,
        participant_id: ParticipantId,
        kind: BetKind,
        value: Option<u8>,
        amount: i64,
        current_balance: i64,
    ) -> TableResult<Bet> {
        self.place_bet_at(
            Instant::now(),
            participant_id,
            kind,
            value,
            amount,
            current_balance,
        )
    }

    fn place_bet_at(
        &mut self,
        now: Instant,
        participant_id: ParticipantId,
        kind: BetKind,
        value: Option<u8>,
        amount: i64,
        current_balance: i64,
    ) -> TableResult<Bet> {
        if self.phase != Phase::Betting {
            log::warn!(
                "Participant {} tried to bet during {} phase",
                participant_id,
                self.phase
            );
            return Err(TableError::BettingClosed);
        }

        let seat = self
            .seats
            .get(&participant_id)
            .ok_or(TableError::NotSeated(participant_id))?;

        if let Some(last) = self.last_bet_at.get(&participant_id) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.config.bet_rate_limit {
                let retry_after = self.config.bet_rate_limit - elapsed;
                log::warn!(
                    "Participant {} hit rate limit (last bet {:?} ago)",
                    participant_id,
                    elapsed
                );
                return Err(TableError::RateLimited {
                    retry_after_ms: retry_after.as_millis().try_into().unwrap_or(u64::MAX),
                });
            }
        }

        let min_bet = self.config.min_bet.max(1);
        if amount < min_bet {
            return Err(TableError::InvalidAmount(format!(
                "bet amount {} is below minimum {}",
                amount, min_bet
            )));
        }

        // Only straight bets carry a value; other kinds ignore it.
        let value = if kind.requires_value() {
            match value {
                Some(number) if number <= 36 => Some(number),
                other => {
                    return Err(TableError::InvalidAmount(format!(
                        "straight bet value must be 0-36, got {:?}",
                        other
                    )));
                }
            }
        } else {
            None
        };

        let committed: i64 = self
            .bets
            .iter()
            .filter(|bet| bet.participant_id == participant_id)
            .map(|bet| bet.amount)
            .sum();
        let need = committed.checked_add(amount).unwrap_or(i64::MAX);

        if need > current_balance {
            log::warn!(
                "Participant {} insufficient balance: has {}, needs {} (existing {} + new {})",
                participant_id,
                current_balance,
                need,
                committed,
                amount
            );
            return Err(TableError::InsufficientBalance {
                have: current_balance,
                need,
            });
        }

        let bet = Bet {
            participant_id,
            participant_name: seat.name.clone(),
            avatar_seed: seat.avatar_seed.clone(),
            kind,
            value,
            amount,
            payout: 0,
            is_winner: false,
        };

        self.bets.push(bet.clone());
        self.last_bet_at.insert(participant_id, now);

        log::info!(
            "Participant {} placed bet: {}{} for {}. Total bets this round: {}",
            participant_id,
            kind,
            value.map(|v| format!("({v})")).unwrap_or_default(),
            amount,
            self.bets.len()
        );

        Ok(bet)
    }

    /// Time left in the current phase
    pub fn time_remaining(&self) -> std::time::Duration {
        let duration = self.config.phase_duration(self.phase);
        duration.saturating_sub(self.phase_started_at.elapsed())
    }

    /// Build the current status projection
    pub fn status(&self) -> TableStatus {
        let mut seats: Vec<Seat> = self.seats.values().cloned().collect();
        seats.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.participant_id.cmp(&b.participant_id))
        });

        // A stale day reads as zero until the next settlement rolls it over.
        let today = Utc::now().date_naive();
        let (rounds_today, wagered_today) = if self.daily.day < today {
            (0, 0)
        } else {
            (self.daily.rounds, self.daily.wagered)
        };

        TableStatus {
            table_id: self.config.table_id.clone(),
            phase: self.phase,
            time_remaining: self.time_remaining().as_secs_f64(),
            round_number: self.round_number,
            seat_count: seats.len(),
            seats,
            max_seats: self.config.max_seats,
            bets: self.bets.clone(),
            last_result: self.last_result.clone(),
            total_rounds_today: rounds_today,
            total_wagered_today: wagered_today,
        }
    }

    /// Start a new round: bump the round number, clear bets, open betting
    ///
    /// Returns the new round number.
    pub fn open_round(&mut self) -> u64 {
        self.round_number += 1;
        self.bets.clear();
        self.enter_phase(Phase::Betting);
        self.round_number
    }

    /// Switch phase and restart the phase clock
    ///
    /// Live bets belong to one round: they are dropped on PAUSE and IDLE,
    /// the settled copies remain in the last result.
    pub fn enter_phase(&mut self, phase: Phase) {
        if matches!(phase, Phase::Pause | Phase::Idle) {
            self.bets.clear();
        }
        self.phase = phase;
        self.phase_started_at = Instant::now();
    }

    /// Store a settled round: settled bets replace the live list and the
    /// daily aggregates are updated
    pub fn record_settlement(&mut self, result: &RoundResult) {
        self.bets = result.bets.clone();
        self.daily
            .record(result.timestamp.date_naive(), result.total_wagered);
        self.last_result = Some(result.clone());
    }
}
