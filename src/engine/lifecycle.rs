//! # engine::lifecycle
//!
//! **Position Lifecycle Manager** — owns the one position a session may hold.
//!
//! ```text
//!            open(dir, risk, stake, price)
//!   ┌──────┐ ───────────────────────────▶ ┌──────┐ ◀─┐
//!   │ Flat │                               │ Open │   │ on_price_tick(p)
//!   └──────┘ ◀─────────────────────────── └──────┘ ──┘   (revalue only)
//!                       close()
//! ```
//!
//! A position only ever leaves `Open` through `close()`. Reaching the strike
//! moves progress to 100% and nothing else; there is no settlement or expiry.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::engine::{pricing, validator};
use crate::error::{LifecycleError, OrderError, PriceError};
use crate::models::{ClosedPosition, Direction, LiveValuation, Position, RiskLevel};

// ─── State ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PositionState {
    /// No position held. Initial state.
    #[default]
    Flat,
    /// One position held, with its valuation as of the last accepted price.
    Open {
        position: Position,
        valuation: LiveValuation,
    },
}

// ─── Manager ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PositionLifecycle {
    state: PositionState,
}

impl PositionLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PositionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PositionState::Open { .. })
    }

    pub fn position(&self) -> Option<&Position> {
        match &self.state {
            PositionState::Open { position, .. } => Some(position),
            PositionState::Flat => None,
        }
    }

    /// `Flat → Open`.
    ///
    /// Checks, in order: no position already open, stake accepted by the
    /// validator, price usable for pricing. Nothing changes on failure.
    pub fn open(
        &mut self,
        direction: Direction,
        risk_level: RiskLevel,
        stake: f64,
        current_price: f64,
        available_balance: f64,
    ) -> Result<Position, OrderError> {
        if self.is_open() {
            return Err(LifecycleError::PositionAlreadyOpen.into());
        }
        validator::validate_stake(stake, available_balance)?;
        let contract = pricing::price_contract(direction, risk_level, current_price)?;

        let position = Position::from_contract(&contract, stake, Utc::now());
        let valuation = position.valuation_at(current_price);

        info!(
            position_id = %position.position_id,
            direction   = %position.direction,
            risk_level  = %position.risk_level,
            stake,
            entry_price = position.entry_price,
            strike      = position.strike_price,
            multiplier  = position.multiplier,
            "📈 Position opened"
        );

        self.state = PositionState::Open {
            position: position.clone(),
            valuation,
        };
        Ok(position)
    }

    /// `Open → Flat`. Hands back the position and its last valuation.
    pub fn close(&mut self) -> Result<ClosedPosition, LifecycleError> {
        match std::mem::take(&mut self.state) {
            PositionState::Open { position, valuation } => {
                info!(
                    position_id = %position.position_id,
                    pnl         = valuation.pnl,
                    progress    = valuation.progress,
                    "📉 Position closed"
                );
                Ok(ClosedPosition {
                    position,
                    final_valuation: valuation,
                    closed_at: Utc::now(),
                })
            }
            PositionState::Flat => Err(LifecycleError::NoOpenPosition),
        }
    }

    /// `Open → Open`: revalue against `new_price`.
    ///
    /// Returns `Ok(None)` while flat. A malformed price is refused and the
    /// previous valuation is kept untouched.
    pub fn on_price_tick(&mut self, new_price: f64) -> Result<Option<LiveValuation>, PriceError> {
        if let Err(err) = pricing::ensure_valid_price(new_price) {
            warn!(price = new_price, "Ignoring malformed price tick");
            return Err(err);
        }

        match &mut self.state {
            PositionState::Open { position, valuation } => {
                *valuation = position.valuation_at(new_price);
                debug!(
                    price      = new_price,
                    pnl        = valuation.pnl,
                    progress   = valuation.progress,
                    multiplier = valuation.current_multiplier,
                    "Position revalued"
                );
                Ok(Some(*valuation))
            }
            PositionState::Flat => Ok(None),
        }
    }

    /// Live valuation as of the last accepted tick; neutral while flat.
    pub fn live_pnl(&self) -> LiveValuation {
        match &self.state {
            PositionState::Open { valuation, .. } => *valuation,
            PositionState::Flat => LiveValuation::flat(),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
