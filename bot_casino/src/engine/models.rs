//! Engine projections handed to observers and catalogue listings.

use super::leaderboard::LeaderboardEntry;
use crate::table::{Phase, TableId, TableStatus};
use serde::{Deserialize, Serialize};

/// Game type reported in the catalogue
pub const GAME_TYPE: &str = "european_roulette";

/// Initial state sent to a newly connected observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub status: TableStatus,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Catalogue entry for a running table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_type: String,
    pub table_id: TableId,
    pub phase: Phase,
    pub seat_count: usize,
    pub max_seats: usize,
}
