//! # models::contract
//!
//! The inputs a user picks before placing a structured trade ([`Direction`],
//! [`RiskLevel`]) and the priced output the pricing engine derives from them
//! ([`PricedContract`]).

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Direction ────────────────────────────────────────────────────────────────

/// Which way the user is betting the price will move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Wins when price rises to (or above) the strike.
    #[default]
    #[serde(alias = "long")]
    Long,
    /// Wins when price falls to (or below) the strike.
    #[serde(alias = "short")]
    Short,
}

impl Direction {
    /// Signed price movement measured from `entry`, positive when favourable.
    #[inline]
    pub fn favourable_move(self, entry: f64, current: f64) -> f64 {
        match self {
            Direction::Long => current - entry,
            Direction::Short => entry - current,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

// ─── RiskLevel ────────────────────────────────────────────────────────────────

/// Risk slider position in `[0, 100]`.
///
/// Any out-of-range input is clamped on construction, so every `RiskLevel`
/// that exists is already valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct RiskLevel(u8);

impl RiskLevel {
    pub const MIN: RiskLevel = RiskLevel(0);
    pub const MAX: RiskLevel = RiskLevel(100);

    /// Build a risk level, clamping into `[0, 100]`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The level as a fraction in `[0.0, 1.0]`.
    #[inline]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for RiskLevel {
    /// The slider's starting position.
    fn default() -> Self {
        Self(20)
    }
}

impl From<i64> for RiskLevel {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> Self {
        level.0
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── PricedContract ───────────────────────────────────────────────────────────

/// Output of the pricing engine for one `(direction, risk_level, price)`.
///
/// Derived on demand, never stored on its own; a [`Position`] freezes the
/// fields it needs at open time.
///
/// [`Position`]: crate::models::Position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedContract {
    pub direction: Direction,
    pub risk_level: RiskLevel,
    /// Price the contract was priced against.
    pub reference_price: f64,
    /// Distance from `reference_price` to the strike, as a fraction.
    pub price_gap_pct: f64,
    /// Price the position must reach to fully mature.
    pub strike_price: f64,
    /// Fractional return at full maturity (0.10 = +10%).
    pub target_roi: f64,
    /// `1 + target_roi`.
    pub multiplier: f64,
    /// Heuristic success estimate in percent. Display only.
    pub win_probability: f64,
}

impl PricedContract {
    /// What the stake pays out if the position fully matures.
    #[inline]
    pub fn potential_payout(&self, stake: f64) -> f64 {
        stake * self.multiplier
    }
}
