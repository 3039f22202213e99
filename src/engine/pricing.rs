//! # engine::pricing
//!
//! **Contract Pricing Engine** — turns `(direction, risk_level, price)` into a
//! [`PricedContract`].
//!
//! ```text
//!  risk_level 0 ──────────────────────────────▶ 100
//!  price gap   0.2%   (linear)                   5.2%
//!  target ROI  +10%   (quadratic, convex)      +200%
//!  win prob.   65%    (linear, floored at 20)    20%
//! ```
//!
//! Pure and deterministic: no state, no clock, no randomness.

use crate::error::PriceError;
use crate::models::{Direction, PricedContract, RiskLevel};

const MIN_PRICE_GAP: f64 = 0.002;
const PRICE_GAP_SPAN: f64 = 0.05;

const MIN_TARGET_ROI: f64 = 0.1;
const TARGET_ROI_SPAN: f64 = 1.9;

const MAX_WIN_PROBABILITY: f64 = 65.0;
const MIN_WIN_PROBABILITY: f64 = 20.0;
const WIN_PROBABILITY_DECAY: f64 = 0.4;

/// Fractional distance from the current price to the strike.
#[inline]
pub fn price_gap_percentage(risk: RiskLevel) -> f64 {
    MIN_PRICE_GAP + risk.fraction() * PRICE_GAP_SPAN
}

/// Fractional return at full maturity.
#[inline]
pub fn target_roi(risk: RiskLevel) -> f64 {
    MIN_TARGET_ROI + risk.fraction().powi(2) * TARGET_ROI_SPAN
}

/// Heuristic success estimate in percent.
#[inline]
pub fn win_probability(risk: RiskLevel) -> f64 {
    (MAX_WIN_PROBABILITY - f64::from(risk.value()) * WIN_PROBABILITY_DECAY).max(MIN_WIN_PROBABILITY)
}

/// Strike price on the favourable side of `current_price`.
#[inline]
pub fn strike_price(direction: Direction, risk: RiskLevel, current_price: f64) -> f64 {
    let gap = price_gap_percentage(risk);
    match direction {
        Direction::Long => current_price * (1.0 + gap),
        Direction::Short => current_price * (1.0 - gap),
    }
}

/// Reject anything the feed should never have produced.
#[inline]
pub fn ensure_valid_price(price: f64) -> Result<f64, PriceError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(PriceError::InvalidPrice(price))
    }
}

/// Price a structured trade against the current price.
pub fn price_contract(
    direction: Direction,
    risk_level: RiskLevel,
    current_price: f64,
) -> Result<PricedContract, PriceError> {
    let reference_price = ensure_valid_price(current_price)?;
    let target_roi = target_roi(risk_level);

    Ok(PricedContract {
        direction,
        risk_level,
        reference_price,
        price_gap_pct: price_gap_percentage(risk_level),
        strike_price: strike_price(direction, risk_level, reference_price),
        target_roi,
        multiplier: 1.0 + target_roi,
        win_probability: win_probability(risk_level),
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn all_levels() -> impl Iterator<Item = RiskLevel> {
        (0..=100).map(RiskLevel::new)
    }

    #[test]
    fn price_gap_stays_in_range_and_never_shrinks() {
        let gaps: Vec<f64> = all_levels().map(price_gap_percentage).collect();
        for g in &gaps {
            assert!((0.002 - EPS..=0.052 + EPS).contains(g), "gap {g} out of range");
        }
        assert!(gaps.windows(2).all(|w| w[1] >= w[0]));
        assert!((gaps[0] - 0.002).abs() < EPS);
        assert!((gaps[100] - 0.052).abs() < EPS);
    }

    #[test]
    fn target_roi_is_bounded_monotone_and_convex() {
        let rois: Vec<f64> = all_levels().map(target_roi).collect();
        for r in &rois {
            assert!((0.10 - EPS..=2.00 + EPS).contains(r), "roi {r} out of range");
        }
        assert!(rois.windows(2).all(|w| w[1] >= w[0]));
        for w in rois.windows(3) {
            assert!(w[2] - 2.0 * w[1] + w[0] > 0.0, "second difference must be positive");
        }
        assert!((rois[0] - 0.10).abs() < EPS);
        assert!((rois[100] - 2.00).abs() < EPS);
    }

    #[test]
    fn win_probability_decays_to_floor() {
        let probs: Vec<f64> = all_levels().map(win_probability).collect();
        for p in &probs {
            assert!((20.0..=65.0).contains(p), "probability {p} out of range");
        }
        assert!(probs.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(probs[0], 65.0);
        assert!((probs[100] - 25.0).abs() < EPS);
        assert_eq!(win_probability(RiskLevel::new(1000)), probs[100]);
    }

    #[test]
    fn strike_is_strictly_on_the_favourable_side() {
        for price in [0.01, 1.0, 64_230.5, 1e9] {
            for risk in all_levels() {
                let long = strike_price(Direction::Long, risk, price);
                let short = strike_price(Direction::Short, risk, price);
                assert!(long > price, "long strike {long} <= {price}");
                assert!(short < price, "short strike {short} >= {price}");
            }
        }
    }

    #[test]
    fn reference_scenario_at_risk_twenty() {
        let c = price_contract(Direction::Long, RiskLevel::new(20), 64_230.50).unwrap();
        assert!((c.price_gap_pct - 0.012).abs() < EPS);
        assert!((c.strike_price - 64_230.50 * 1.012).abs() < 1e-6);
        assert!((c.strike_price - 65_001.266).abs() < 1e-6);
        assert!((c.target_roi - 0.176).abs() < EPS);
        assert!((c.multiplier - 1.176).abs() < EPS);
        assert!((c.win_probability - 57.0).abs() < EPS);
        assert_eq!(c.reference_price, 64_230.50);
    }

    #[test]
    fn short_contract_prices_below_current() {
        let c = price_contract(Direction::Short, RiskLevel::new(100), 1000.0).unwrap();
        assert!((c.strike_price - 948.0).abs() < EPS);
        assert!((c.multiplier - 3.0).abs() < EPS);
        assert!((c.potential_payout(100.0) - 300.0).abs() < EPS);
    }

    #[test]
    fn rejects_non_finite_or_non_positive_price() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = price_contract(Direction::Long, RiskLevel::default(), bad).unwrap_err();
            assert!(matches!(err, PriceError::InvalidPrice(_)));
        }
    }
}
