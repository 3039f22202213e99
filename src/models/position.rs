//! # models::position
//!
//! Defines the single live [`Position`] a session can hold and the
//! [`LiveValuation`] recomputed from it on every price tick.
//!
//! ## Why separate from PricedContract?
//! `PricedContract` = a quote, recomputed whenever the inputs or price move
//! `Position`       = the quote frozen at the moment the order was placed
//! `LiveValuation`  = where that frozen quote stands against the latest price

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Direction, PricedContract, RiskLevel};

/// Length of the countdown shown next to an open position.
///
/// Display only: nothing closes or settles a position when it elapses.
pub const DISPLAY_WINDOW_HOURS: i64 = 24;

// ─── Position ─────────────────────────────────────────────────────────────────

/// An open structured trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub position_id: Uuid,
    pub direction: Direction,
    pub risk_level: RiskLevel,
    /// Price at the moment of opening.
    pub entry_price: f64,
    pub strike_price: f64,
    pub stake: f64,
    pub target_roi: f64,
    pub multiplier: f64,
    pub win_probability: f64,
    /// `stake × multiplier`, paid if the strike is reached.
    pub potential_payout: f64,
    pub opened_at: DateTime<Utc>,
    /// End of the display countdown (see [`DISPLAY_WINDOW_HOURS`]).
    pub expires_at: DateTime<Utc>,
}

impl Position {
    /// Freeze a priced contract into a position; the entry price is the
    /// contract's reference price.
    pub fn from_contract(contract: &PricedContract, stake: f64, opened_at: DateTime<Utc>) -> Self {
        Self {
            position_id: Uuid::new_v4(),
            direction: contract.direction,
            risk_level: contract.risk_level,
            entry_price: contract.reference_price,
            strike_price: contract.strike_price,
            stake,
            target_roi: contract.target_roi,
            multiplier: contract.multiplier,
            win_probability: contract.win_probability,
            potential_payout: contract.potential_payout(stake),
            opened_at,
            expires_at: opened_at + Duration::hours(DISPLAY_WINDOW_HOURS),
        }
    }

    /// Mark the position against `current_price`.
    ///
    /// Progress only counts favourable movement and the multiplier never
    /// extrapolates past `multiplier`, however far price overshoots the strike.
    pub fn valuation_at(&self, current_price: f64) -> LiveValuation {
        let price_diff = self.direction.favourable_move(self.entry_price, current_price);
        let pnl_percent = (price_diff / self.entry_price) * 100.0;
        let pnl = self.stake * (pnl_percent / 100.0);

        let target_diff = (self.strike_price - self.entry_price).abs();
        let raw_progress = if target_diff > 0.0 {
            price_diff.max(0.0) / target_diff
        } else {
            0.0
        };

        LiveValuation {
            marked_price: current_price,
            price_diff,
            pnl,
            pnl_percent,
            current_multiplier: 1.0 + self.target_roi * raw_progress.min(1.0),
            progress: (raw_progress * 100.0).min(100.0),
        }
    }
}

// ─── LiveValuation ────────────────────────────────────────────────────────────

/// Advisory mark-to-market of the open position. Reaching 100% progress does
/// not settle anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveValuation {
    /// Price this valuation was computed against.
    pub marked_price: f64,
    /// Favourable price movement since entry (negative = adverse).
    pub price_diff: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    /// Payout multiplier earned so far, between 1.0 and the target multiplier.
    pub current_multiplier: f64,
    /// Progress toward the strike in percent, capped at 100.
    pub progress: f64,
}

impl LiveValuation {
    /// Neutral valuation reported while no position is open.
    pub fn flat() -> Self {
        Self {
            marked_price: 0.0,
            price_diff: 0.0,
            pnl: 0.0,
            pnl_percent: 0.0,
            current_multiplier: 1.0,
            progress: 0.0,
        }
    }
}

// ─── ClosedPosition ───────────────────────────────────────────────────────────

/// What `close` hands back: the discarded position and its last valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedPosition {
    pub position: Position,
    pub final_valuation: LiveValuation,
    pub closed_at: DateTime<Utc>,
}
