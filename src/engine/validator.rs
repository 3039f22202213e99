//! # engine::validator
//!
//! **Order Validator** — gates order placement on the stake.
//!
//! ## Check order (first failure wins)
//! 1. below [`MIN_STAKE`]          → `BelowMinimum`
//! 2. above [`MAX_STAKE`]          → `AboveMaximum`
//! 3. above the available balance  → `InsufficientBalance`
//!
//! The order is fixed so the message a user sees is deterministic: a stake of
//! 5 against a balance of 3 always reports the minimum, not the balance.

use crate::error::StakeError;

pub const MIN_STAKE: f64 = 10.0;
pub const MAX_STAKE: f64 = 99_999.0;

/// Validate a stake against the fixed bounds and the caller's balance.
///
/// A NaN stake is reported as `BelowMinimum`.
pub fn validate_stake(stake: f64, available_balance: f64) -> Result<(), StakeError> {
    if stake.is_nan() || stake < MIN_STAKE {
        return Err(StakeError::BelowMinimum);
    }
    if stake > MAX_STAKE {
        return Err(StakeError::AboveMaximum);
    }
    if stake > available_balance {
        return Err(StakeError::InsufficientBalance);
    }
    Ok(())
}
