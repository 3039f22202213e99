//! # engine::executor
//!
//! **Order Execution** — turns a user's order ticket into an open position.
//!
//! Orchestration only: validator first, then the lifecycle manager. The
//! validator's error comes back unchanged so the ticket can show it verbatim.
//! [`preview_order`] runs the same pricing and validation without touching
//! any state, for the order ticket shown before confirming.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::lifecycle::PositionLifecycle;
use crate::engine::{pricing, validator};
use crate::error::{OrderError, PriceError};
use crate::models::position::DISPLAY_WINDOW_HOURS;
use crate::models::{Direction, Position, PricedContract, RiskLevel};

/// Stake the order ticket starts with.
pub const DEFAULT_STAKE: f64 = 1000.0;

fn default_stake() -> f64 {
    DEFAULT_STAKE
}

// ─── Order Ticket ─────────────────────────────────────────────────────────────

/// What the user picked on the order ticket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default = "default_stake")]
    pub stake: f64,
}

impl Default for OrderRequest {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            risk_level: RiskLevel::default(),
            stake: DEFAULT_STAKE,
        }
    }
}

// ─── Preview ──────────────────────────────────────────────────────────────────

/// Everything the order ticket displays before the user confirms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPreview {
    pub contract: PricedContract,
    pub stake: f64,
    /// `stake × multiplier`.
    pub potential_payout: f64,
    /// User-facing stake error, `None` when the stake is acceptable.
    pub stake_error: Option<String>,
    pub valid: bool,
    /// End of the display countdown if the order were placed now.
    pub expires_at: DateTime<Utc>,
}

/// Price and validate an order without opening anything.
pub fn preview_order(
    order: &OrderRequest,
    current_price: f64,
    available_balance: f64,
) -> Result<OrderPreview, PriceError> {
    let contract = pricing::price_contract(order.direction, order.risk_level, current_price)?;
    let stake_error = validator::validate_stake(order.stake, available_balance)
        .err()
        .map(|e| e.to_string());

    Ok(OrderPreview {
        potential_payout: contract.potential_payout(order.stake),
        contract,
        stake: order.stake,
        valid: stake_error.is_none(),
        stake_error,
        expires_at: Utc::now() + Duration::hours(DISPLAY_WINDOW_HOURS),
    })
}

// ─── Execution ────────────────────────────────────────────────────────────────

/// Validate the stake, then open the position at `current_price`.
pub fn execute_order(
    lifecycle: &mut PositionLifecycle,
    order: &OrderRequest,
    current_price: f64,
    available_balance: f64,
) -> Result<Position, OrderError> {
    if let Err(err) = validator::validate_stake(order.stake, available_balance) {
        warn!(stake = order.stake, available_balance, reason = %err, "Order rejected");
        return Err(err.into());
    }

    let position = lifecycle.open(
        order.direction,
        order.risk_level,
        order.stake,
        current_price,
        available_balance,
    )?;

    info!(
        position_id = %position.position_id,
        direction   = %order.direction,
        stake       = order.stake,
        "🚀 [EXECUTOR] Order filled"
    );
    Ok(position)
}
