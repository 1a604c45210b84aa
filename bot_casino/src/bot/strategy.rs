//! Betting strategies for simulated participants.

use crate::game::{BetKind, Color, Spin};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default martingale stake ceiling
const MARTINGALE_MAX_BET: i64 = 500;

/// A bet a strategy wants to place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetIntent {
    pub kind: BetKind,
    pub value: Option<u8>,
    pub amount: i64,
}

impl BetIntent {
    pub fn new(kind: BetKind, amount: i64) -> Self {
        Self {
            kind,
            value: None,
            amount,
        }
    }

    pub fn straight(number: u8, amount: i64) -> Self {
        Self {
            kind: BetKind::Straight,
            value: Some(number),
            amount,
        }
    }
}

/// Decides what to bet each round and adapts to results
pub trait Strategy: Send {
    fn name(&self) -> &'static str;

    /// Bet for the round that just opened, or `None` to sit it out
    fn decide(&mut self, balance: i64) -> Option<BetIntent>;

    /// Observe a settled round; `won` is `None` when no bet was placed
    fn on_result(&mut self, _spin: Spin, _won: Option<bool>) {}
}

/// Always the same kind and stake
#[derive(Debug, Clone)]
pub struct Flat {
    name: &'static str,
    kind: BetKind,
    bet_size: i64,
}

impl Flat {
    pub fn new(name: &'static str, kind: BetKind, bet_size: i64) -> Self {
        Self {
            name,
            kind,
            bet_size,
        }
    }
}

impl Strategy for Flat {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decide(&mut self, balance: i64) -> Option<BetIntent> {
        (balance >= self.bet_size).then(|| BetIntent::new(self.kind, self.bet_size))
    }
}

/// Rotates through the first, second and third dozen
#[derive(Debug, Clone)]
pub struct FlatDozen {
    bet_size: i64,
    round: usize,
}

impl FlatDozen {
    pub fn new(bet_size: i64) -> Self {
        Self { bet_size, round: 0 }
    }
}

impl Strategy for FlatDozen {
    fn name(&self) -> &'static str {
        "flat-dozen"
    }

    fn decide(&mut self, balance: i64) -> Option<BetIntent> {
        if balance < self.bet_size {
            return None;
        }
        let kind = [BetKind::Dozen1, BetKind::Dozen2, BetKind::Dozen3][self.round % 3];
        self.round += 1;
        Some(BetIntent::new(kind, self.bet_size))
    }
}

/// Always a straight bet on one lucky number
#[derive(Debug, Clone)]
pub struct FlatNumber {
    bet_size: i64,
    lucky_number: u8,
}

impl FlatNumber {
    /// Lucky numbers above 36 are replaced by a random one
    pub fn new(bet_size: i64, lucky_number: Option<u8>) -> Self {
        let lucky_number = match lucky_number {
            Some(n) if n <= 36 => n,
            _ => rand::rng().random_range(0..=36),
        };
        Self {
            bet_size,
            lucky_number,
        }
    }

    pub fn lucky_number(&self) -> u8 {
        self.lucky_number
    }
}

impl Strategy for FlatNumber {
    fn name(&self) -> &'static str {
        "flat-number"
    }

    fn decide(&mut self, balance: i64) -> Option<BetIntent> {
        (balance >= self.bet_size).then(|| BetIntent::straight(self.lucky_number, self.bet_size))
    }
}

/// Doubles the colour stake after a loss, back to base after a win
#[derive(Debug, Clone)]
pub struct Martingale {
    base_bet: i64,
    max_bet: i64,
    current_bet: i64,
    kind: BetKind,
}

impl Martingale {
    pub fn new(bet_size: i64, max_bet: i64, kind: BetKind) -> Self {
        Self {
            base_bet: bet_size,
            max_bet,
            current_bet: bet_size,
            kind,
        }
    }

    pub fn current_bet(&self) -> i64 {
        self.current_bet
    }
}

impl Strategy for Martingale {
    fn name(&self) -> &'static str {
        "martingale"
    }

    fn decide(&mut self, balance: i64) -> Option<BetIntent> {
        let amount = self.current_bet.min(balance).min(self.max_bet);
        (amount >= 1).then(|| BetIntent::new(self.kind, amount))
    }

    fn on_result(&mut self, _spin: Spin, won: Option<bool>) {
        match won {
            Some(true) => self.current_bet = self.base_bet,
            Some(false) => self.current_bet = (self.current_bet * 2).min(self.max_bet),
            None => {}
        }
    }
}

/// Bets the colour opposite to the last outcome; green keeps the current pick
#[derive(Debug, Clone)]
pub struct ReverseColor {
    bet_size: i64,
    next: BetKind,
}

impl ReverseColor {
    pub fn new(bet_size: i64) -> Self {
        Self {
            bet_size,
            next: BetKind::Red,
        }
    }
}

impl Strategy for ReverseColor {
    fn name(&self) -> &'static str {
        "reverse-color"
    }

    fn decide(&mut self, balance: i64) -> Option<BetIntent> {
        (balance >= self.bet_size).then(|| BetIntent::new(self.next, self.bet_size))
    }

    fn on_result(&mut self, spin: Spin, _won: Option<bool>) {
        match spin.color {
            Color::Red => self.next = BetKind::Black,
            Color::Black => self.next = BetKind::Red,
            Color::Green => {}
        }
    }
}

/// Picks one of the other strategies at random every round
pub struct RandomMix {
    strategies: Vec<Box<dyn Strategy>>,
}

impl RandomMix {
    pub fn new(bet_size: i64, lucky_number: Option<u8>) -> Self {
        let strategies = StrategyKind::ALL
            .iter()
            .filter(|kind| **kind != StrategyKind::Random)
            .map(|kind| kind.build(bet_size, lucky_number))
            .collect();
        Self { strategies }
    }
}

impl Strategy for RandomMix {
    fn name(&self) -> &'static str {
        "random"
    }

    fn decide(&mut self, balance: i64) -> Option<BetIntent> {
        if self.strategies.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.strategies.len());
        self.strategies[index].decide(balance)
    }

    fn on_result(&mut self, spin: Spin, won: Option<bool>) {
        // Stateful strategies keep tracking even when not chosen
        for strategy in &mut self.strategies {
            strategy.on_result(spin, won);
        }
    }
}

/// Unknown strategy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown strategy: {0}")]
pub struct ParseStrategyError(pub String);

/// Named strategy presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    FlatRed,
    FlatBlack,
    FlatEven,
    FlatOdd,
    FlatDozen,
    FlatNumber,
    Martingale,
    ReverseColor,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 9] = [
        StrategyKind::FlatRed,
        StrategyKind::FlatBlack,
        StrategyKind::FlatEven,
        StrategyKind::FlatOdd,
        StrategyKind::FlatDozen,
        StrategyKind::FlatNumber,
        StrategyKind::Martingale,
        StrategyKind::ReverseColor,
        StrategyKind::Random,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::FlatRed => "flat-red",
            StrategyKind::FlatBlack => "flat-black",
            StrategyKind::FlatEven => "flat-even",
            StrategyKind::FlatOdd => "flat-odd",
            StrategyKind::FlatDozen => "flat-dozen",
            StrategyKind::FlatNumber => "flat-number",
            StrategyKind::Martingale => "martingale",
            StrategyKind::ReverseColor => "reverse-color",
            StrategyKind::Random => "random",
        }
    }

    /// Instantiate the strategy
    ///
    /// # Arguments
    ///
    /// * `bet_size` - Base stake in chips
    /// * `lucky_number` - Number used by `flat-number`; random if `None`
    pub fn build(self, bet_size: i64, lucky_number: Option<u8>) -> Box<dyn Strategy> {
        let name = self.as_str();
        match self {
            StrategyKind::FlatRed => Box::new(Flat::new(name, BetKind::Red, bet_size)),
            StrategyKind::FlatBlack => Box::new(Flat::new(name, BetKind::Black, bet_size)),
            StrategyKind::FlatEven => Box::new(Flat::new(name, BetKind::Even, bet_size)),
            StrategyKind::FlatOdd => Box::new(Flat::new(name, BetKind::Odd, bet_size)),
            StrategyKind::FlatDozen => Box::new(FlatDozen::new(bet_size)),
            StrategyKind::FlatNumber => Box::new(FlatNumber::new(bet_size, lucky_number)),
            StrategyKind::Martingale => Box::new(Martingale::new(
                bet_size,
                MARTINGALE_MAX_BET,
                BetKind::Red,
            )),
            StrategyKind::ReverseColor => Box::new(ReverseColor::new(bet_size)),
            StrategyKind::Random => Box::new(RandomMix::new(bet_size, lucky_number)),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spin(n: u8) -> Spin {
        Spin::new(n).unwrap()
    }

    #[test]
    fn test_flat_skips_when_short() {
        let mut flat = StrategyKind::FlatOdd.build(10, None);
        assert_eq!(flat.decide(10), Some(BetIntent::new(BetKind::Odd, 10)));
        assert_eq!(flat.decide(9), None);
    }

    #[test]
    fn test_flat_dozen_rotates() {
        let mut dozen = FlatDozen::new(5);
        let kinds: Vec<BetKind> = (0..4).filter_map(|_| dozen.decide(100)).map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BetKind::Dozen1, BetKind::Dozen2, BetKind::Dozen3, BetKind::Dozen1]
        );
    }

    #[test]
    fn test_flat_number_keeps_valid_lucky_number() {
        let mut number = FlatNumber::new(10, Some(17));
        assert_eq!(number.decide(100), Some(BetIntent::straight(17, 10)));
        assert!(FlatNumber::new(10, Some(40)).lucky_number() <= 36);
    }

    #[test]
    fn test_martingale_doubles_and_resets() {
        let mut martingale = Martingale::new(10, 50, BetKind::Black);

        martingale.on_result(spin(1), Some(false));
        martingale.on_result(spin(1), Some(false));
        assert_eq!(martingale.current_bet(), 40);

        martingale.on_result(spin(1), Some(false));
        assert_eq!(martingale.current_bet(), 50);
        // Capped by balance
        assert_eq!(martingale.decide(30).map(|b| b.amount), Some(30));

        martingale.on_result(spin(2), None);
        assert_eq!(martingale.current_bet(), 50);

        martingale.on_result(spin(2), Some(true));
        assert_eq!(martingale.current_bet(), 10);
    }

    #[test]
    fn test_reverse_color_follows_outcome() {
        let mut reverse = ReverseColor::new(10);
        assert_eq!(reverse.decide(100).unwrap().kind, BetKind::Red);

        reverse.on_result(spin(1), None);
        assert_eq!(reverse.decide(100).unwrap().kind, BetKind::Black);

        reverse.on_result(spin(0), Some(false));
        assert_eq!(reverse.decide(100).unwrap().kind, BetKind::Black);
    }

    #[test]
    fn test_random_only_returns_affordable_bets() {
        let mut random = StrategyKind::Random.build(10, Some(3));
        for _ in 0..100 {
            if let Some(bet) = random.decide(25) {
                assert!(bet.amount <= 25);
                assert!(bet.amount >= 1);
            }
        }
    }

    #[test]
    fn test_parse_names() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>(), Ok(kind));
        }
        assert!("zero-hunter".parse::<StrategyKind>().is_err());
    }
}
