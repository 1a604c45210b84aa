//! Roulette rules - wheel, bet kinds and settlement.
//!
//! This module provides the pure game logic:
//! - European wheel with red/black/green pockets and outcome sources
//! - Bet kinds with their win predicates and payout multipliers
//! - Settlement of a round's bets against a spin

pub mod rules;
pub mod settlement;
pub mod wheel;

pub use rules::{BetKind, ParseBetKindError, winning_payout};
pub use settlement::{RoundResult, SettledRound, settle_bets};
pub use wheel::{Color, POCKETS, RED_NUMBERS, ScriptedWheel, SecureWheel, Spin, Wheel};
