//! Table configuration models.

use super::models::{Phase, TableId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table ID
    pub table_id: TableId,

    /// Maximum number of seated participants (default: 25)
    pub max_seats: usize,

    /// Minimum bet amount in chips
    pub min_bet: i64,

    /// Minimum time between two accepted bets from one participant
    pub bet_rate_limit: Duration,

    /// Betting window
    pub betting_duration: Duration,

    /// Spin phase duration
    pub spin_duration: Duration,

    /// Settlement phase duration
    pub settlement_duration: Duration,

    /// Pause between rounds
    pub pause_duration: Duration,

    /// How often an empty table checks for participants
    pub idle_poll: Duration,

    /// Leaderboard entries returned when no limit is given
    pub leaderboard_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_id: "main".to_string(),
            max_seats: 25,
            min_bet: 1,
            bet_rate_limit: Duration::from_secs(1),
            betting_duration: Duration::from_secs(30),
            spin_duration: Duration::from_secs(5),
            settlement_duration: Duration::from_secs(2),
            pause_duration: Duration::from_secs(3),
            idle_poll: Duration::from_secs(1),
            leaderboard_size: 20,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.table_id.trim().is_empty() {
            return Err("Table ID must not be empty".to_string());
        }

        if self.max_seats == 0 {
            return Err("Max seats must be at least 1".to_string());
        }

        if self.min_bet < 1 {
            return Err("Minimum bet must be at least 1 chip".to_string());
        }

        if self.betting_duration.is_zero() {
            return Err("Betting duration must be greater than zero".to_string());
        }

        if self.idle_poll.is_zero() {
            return Err("Idle poll interval must be greater than zero".to_string());
        }

        if self.leaderboard_size == 0 {
            return Err("Leaderboard size must be at least 1".to_string());
        }

        Ok(())
    }

    /// Scheduled length of a phase; IDLE has no fixed length
    pub fn phase_duration(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Idle => Duration::ZERO,
            Phase::Betting => self.betting_duration,
            Phase::Spinning => self.spin_duration,
            Phase::Settlement => self.settlement_duration,
            Phase::Pause => self.pause_duration,
        }
    }

    /// Length of one full round, excluding idle time
    pub fn round_duration(&self) -> Duration {
        self.betting_duration + self.spin_duration + self.settlement_duration + self.pause_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_seats_rejected() {
        let config = TableConfig {
            max_seats: 0,
            ..TableConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_min_bet_rejected() {
        let config = TableConfig {
            min_bet: 0,
            ..TableConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_phase_durations() {
        let config = TableConfig::default();
        assert_eq!(config.phase_duration(Phase::Idle), Duration::ZERO);
        assert_eq!(config.phase_duration(Phase::Betting), Duration::from_secs(30));
        assert_eq!(config.round_duration(), Duration::from_secs(40));
    }
}
