//! Bet kinds, win predicates and payout multipliers.

use super::wheel::{Color, Spin};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetKind {
    #[serde(rename = "straight")]
    Straight,
    #[serde(rename = "red")]
    Red,
    #[serde(rename = "black")]
    Black,
    #[serde(rename = "even")]
    Even,
    #[serde(rename = "odd")]
    Odd,
    #[serde(rename = "dozen_1")]
    Dozen1,
    #[serde(rename = "dozen_2")]
    Dozen2,
    #[serde(rename = "dozen_3")]
    Dozen3,
}

/// Unknown bet kind name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bet kind: {0}")]
pub struct ParseBetKindError(pub String);

impl BetKind {
    pub const ALL: [BetKind; 8] = [
        BetKind::Straight,
        BetKind::Red,
        BetKind::Black,
        BetKind::Even,
        BetKind::Odd,
        BetKind::Dozen1,
        BetKind::Dozen2,
        BetKind::Dozen3,
    ];

    /// Winnings per chip staked, excluding the returned stake
    pub fn payout_multiplier(self) -> i64 {
        match self {
            BetKind::Straight => 35,
            BetKind::Red | BetKind::Black | BetKind::Even | BetKind::Odd => 1,
            BetKind::Dozen1 | BetKind::Dozen2 | BetKind::Dozen3 => 2,
        }
    }

    /// Only straight bets name a number
    pub fn requires_value(self) -> bool {
        matches!(self, BetKind::Straight)
    }

    /// Whether a bet of this kind wins against `spin`
    ///
    /// Zero loses every outside bet.
    pub fn wins(self, value: Option<u8>, spin: Spin) -> bool {
        let number = spin.number;
        match self {
            BetKind::Straight => value == Some(number),
            BetKind::Red => spin.color == Color::Red,
            BetKind::Black => spin.color == Color::Black,
            BetKind::Even => number != 0 && number % 2 == 0,
            BetKind::Odd => number % 2 == 1,
            BetKind::Dozen1 => (1..=12).contains(&number),
            BetKind::Dozen2 => (13..=24).contains(&number),
            BetKind::Dozen3 => (25..=36).contains(&number),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BetKind::Straight => "straight",
            BetKind::Red => "red",
            BetKind::Black => "black",
            BetKind::Even => "even",
            BetKind::Odd => "odd",
            BetKind::Dozen1 => "dozen_1",
            BetKind::Dozen2 => "dozen_2",
            BetKind::Dozen3 => "dozen_3",
        }
    }
}

impl std::fmt::Display for BetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BetKind {
    type Err = ParseBetKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseBetKindError(s.to_string()))
    }
}

/// Total returned to the player for a winning bet (winnings plus stake)
pub fn winning_payout(kind: BetKind, amount: i64) -> i64 {
    amount
        .saturating_mul(kind.payout_multiplier())
        .saturating_add(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_saturates() {
        assert_eq!(winning_payout(BetKind::Straight, i64::MAX / 2), i64::MAX);
        assert_eq!(winning_payout(BetKind::Red, i64::MAX), i64::MAX);
        assert_eq!(winning_payout(BetKind::Dozen2, 10), 30);
    }

    fn spin(number: u8) -> Spin {
        Spin::new(number).unwrap()
    }

    #[test]
    fn test_straight_bet() {
        assert!(BetKind::Straight.wins(Some(17), spin(17)));
        assert!(!BetKind::Straight.wins(Some(17), spin(5)));
        assert!(BetKind::Straight.wins(Some(0), spin(0)));
        assert!(!BetKind::Straight.wins(None, spin(0)));
    }

    #[test]
    fn test_zero_loses_outside_bets() {
        for kind in BetKind::ALL {
            if kind != BetKind::Straight {
                assert!(!kind.wins(None, spin(0)), "{kind} should lose on zero");
            }
        }
    }

    #[test]
    fn test_dozen_bounds() {
        assert!(BetKind::Dozen1.wins(None, spin(1)));
        assert!(BetKind::Dozen1.wins(None, spin(12)));
        assert!(BetKind::Dozen2.wins(None, spin(13)));
        assert!(BetKind::Dozen2.wins(None, spin(24)));
        assert!(BetKind::Dozen3.wins(None, spin(25)));
        assert!(BetKind::Dozen3.wins(None, spin(36)));
        assert!(!BetKind::Dozen3.wins(None, spin(24)));
    }

    #[test]
    fn test_each_outside_number_wins_exactly_one_dozen() {
        for n in 1..=36 {
            let winners = [BetKind::Dozen1, BetKind::Dozen2, BetKind::Dozen3]
                .into_iter()
                .filter(|kind| kind.wins(None, spin(n)))
                .count();
            assert_eq!(winners, 1, "number {n}");
        }
    }

    #[test]
    fn test_winning_payout() {
        assert_eq!(winning_payout(BetKind::Straight, 10), 360);
        assert_eq!(winning_payout(BetKind::Red, 10), 20);
        assert_eq!(winning_payout(BetKind::Dozen2, 10), 30);
    }

    #[test]
    fn test_parse_round_trip_names() {
        assert_eq!("dozen_1".parse::<BetKind>().unwrap(), BetKind::Dozen1);
        assert_eq!("straight".parse::<BetKind>().unwrap(), BetKind::Straight);
        assert!("column_1".parse::<BetKind>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BetKind::Dozen3).unwrap();
        assert_eq!(json, "\"dozen_3\"");
    }
}
