//! European roulette wheel and outcome draw.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// Number of pockets on a European wheel (0-36)
pub const POCKETS: u8 = 37;

/// Red pockets; every other non-zero pocket is black
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Pocket colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    /// Colour of a pocket number
    pub fn of(number: u8) -> Self {
        if number == 0 {
            Color::Green
        } else if RED_NUMBERS.contains(&number) {
            Color::Red
        } else {
            Color::Black
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
            Color::Green => write!(f, "green"),
        }
    }
}

/// Outcome of one spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spin {
    pub number: u8,
    pub color: Color,
}

impl Spin {
    /// Spin landing on `number`, or `None` if no such pocket exists
    pub fn new(number: u8) -> Option<Self> {
        (number < POCKETS).then(|| Self {
            number,
            color: Color::of(number),
        })
    }
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number, self.color)
    }
}

/// Source of spin outcomes
pub trait Wheel: Send + Sync {
    fn spin(&self) -> Spin;
}

/// Uniform draw from the thread-local CSPRNG, reseeded from the OS
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureWheel;

impl Wheel for SecureWheel {
    fn spin(&self) -> Spin {
        let number = rand::rng().random_range(0..POCKETS);
        Spin {
            number,
            color: Color::of(number),
        }
    }
}

/// Replays a fixed sequence of outcomes, cycling when exhausted
#[derive(Debug)]
pub struct ScriptedWheel {
    numbers: Vec<u8>,
    next: Mutex<usize>,
}

impl ScriptedWheel {
    /// Returns `None` if `numbers` is empty or holds a number above 36
    pub fn new(numbers: Vec<u8>) -> Option<Self> {
        if numbers.is_empty() || numbers.iter().any(|n| *n >= POCKETS) {
            return None;
        }
        Some(Self {
            numbers,
            next: Mutex::new(0),
        })
    }
}

impl Wheel for ScriptedWheel {
    fn spin(&self) -> Spin {
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let number = self.numbers[*next % self.numbers.len()];
        *next += 1;
        Spin {
            number,
            color: Color::of(number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_partition() {
        let reds = (1..=36).filter(|n| Color::of(*n) == Color::Red).count();
        let blacks = (1..=36).filter(|n| Color::of(*n) == Color::Black).count();
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
        assert_eq!(Color::of(0), Color::Green);
        assert_eq!(Color::of(17), Color::Black);
        assert_eq!(Color::of(32), Color::Red);
    }

    #[test]
    fn test_spin_rejects_missing_pocket() {
        assert!(Spin::new(37).is_none());
        assert_eq!(Spin::new(0).unwrap().color, Color::Green);
    }

    #[test]
    fn test_secure_wheel_stays_in_range() {
        let wheel = SecureWheel;
        for _ in 0..1000 {
            let spin = wheel.spin();
            assert!(spin.number < POCKETS);
            assert_eq!(spin.color, Color::of(spin.number));
        }
    }

    #[test]
    fn test_scripted_wheel_cycles() {
        let wheel = ScriptedWheel::new(vec![17, 0]).unwrap();
        assert_eq!(wheel.spin().number, 17);
        assert_eq!(wheel.spin().number, 0);
        assert_eq!(wheel.spin().number, 17);
    }

    #[test]
    fn test_scripted_wheel_rejects_bad_numbers() {
        assert!(ScriptedWheel::new(vec![]).is_none());
        assert!(ScriptedWheel::new(vec![3, 40]).is_none());
    }
}
