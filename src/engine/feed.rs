//! # engine::feed
//!
//! **Price Source** — where ticks come from.
//!
//! The engine only needs a readable current price that moves on a cadence.
//! [`RandomWalkFeed`] is the simulated market; [`ScriptedFeed`] replays a
//! fixed sequence so tests and demos are deterministic. A real market feed
//! pushes ticks over HTTP instead (see `routes::feed`).

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::pricing::ensure_valid_price;
use crate::error::PriceError;

/// One step of a price source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedTick {
    pub price: f64,
    /// Decorative 24h change in percent.
    pub change_pct: f64,
}

pub trait PriceSource: Send {
    /// Latest price produced.
    fn current(&self) -> FeedTick;

    /// Move to the next price and return it.
    fn advance(&mut self) -> FeedTick;
}

// ─── Random Walk ──────────────────────────────────────────────────────────────

/// Uniform random walk: each step moves the price by `(u - 0.5) × step`.
///
/// A step that would leave the price non-positive is discarded and the price
/// holds, so the feed never emits an invalid price.
pub struct RandomWalkFeed {
    current: FeedTick,
    step: f64,
    rng: StdRng,
}

impl RandomWalkFeed {
    pub fn new(initial_price: f64, change_pct: f64, step: f64) -> Result<Self, PriceError> {
        Self::with_rng(initial_price, change_pct, step, StdRng::from_entropy())
    }

    /// Same as [`RandomWalkFeed::new`] with a fixed seed.
    pub fn seeded(initial_price: f64, change_pct: f64, step: f64, seed: u64) -> Result<Self, PriceError> {
        Self::with_rng(initial_price, change_pct, step, StdRng::seed_from_u64(seed))
    }

    fn with_rng(initial_price: f64, change_pct: f64, step: f64, rng: StdRng) -> Result<Self, PriceError> {
        Ok(Self {
            current: FeedTick {
                price: ensure_valid_price(initial_price)?,
                change_pct,
            },
            step,
            rng,
        })
    }
}

impl PriceSource for RandomWalkFeed {
    fn current(&self) -> FeedTick {
        self.current
    }

    fn advance(&mut self) -> FeedTick {
        let delta = (self.rng.gen::<f64>() - 0.5) * self.step;
        let drift = (self.rng.gen::<f64>() - 0.5) * 0.1;

        let next = self.current.price + delta;
        if ensure_valid_price(next).is_ok() {
            self.current.price = next;
        }
        self.current.change_pct += drift;
        self.current
    }
}

// ─── Scripted ─────────────────────────────────────────────────────────────────

/// Replays a fixed list of prices, then holds the last one.
///
/// Prices are emitted as given, invalid ones included, so the rejection path
/// downstream can be exercised.
#[derive(Debug, Clone)]
pub struct ScriptedFeed {
    current: FeedTick,
    pending: VecDeque<f64>,
}

impl ScriptedFeed {
    pub fn new(initial_price: f64, upcoming: impl IntoIterator<Item = f64>) -> Self {
        Self {
            current: FeedTick {
                price: initial_price,
                change_pct: 0.0,
            },
            pending: upcoming.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl PriceSource for ScriptedFeed {
    fn current(&self) -> FeedTick {
        self.current
    }

    fn advance(&mut self) -> FeedTick {
        if let Some(next) = self.pending.pop_front() {
            self.current.price = next;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_feed_replays_then_holds() {
        let mut feed = ScriptedFeed::new(100.0, [105.0, 95.0]);
        assert_eq!(feed.current().price, 100.0);
        assert_eq!(feed.advance().price, 105.0);
        assert_eq!(feed.advance().price, 95.0);
        assert_eq!(feed.remaining(), 0);
        assert_eq!(feed.advance().price, 95.0);
    }

    #[test]
    fn random_walk_steps_are_bounded() {
        let mut feed = RandomWalkFeed::seeded(64_230.5, 2.45, 50.0, 7).unwrap();
        let mut prev = feed.current();
        for _ in 0..1_000 {
            let next = feed.advance();
            assert!((next.price - prev.price).abs() <= 25.0 + 1e-6);
            assert!((next.change_pct - prev.change_pct).abs() <= 0.05 + 1e-9);
            prev = next;
        }
    }

    #[test]
    fn random_walk_never_goes_non_positive() {
        // Step far wider than the price: most moves would cross zero.
        let mut feed = RandomWalkFeed::seeded(1.0, 0.0, 1_000.0, 42).unwrap();
        for _ in 0..1_000 {
            let tick = feed.advance();
            assert!(tick.price.is_finite() && tick.price > 0.0);
        }
    }

    #[test]
    fn same_seed_same_path() {
        let mut a = RandomWalkFeed::seeded(100.0, 0.0, 10.0, 99).unwrap();
        let mut b = RandomWalkFeed::seeded(100.0, 0.0, 10.0, 99).unwrap();
        for _ in 0..50 {
            assert_eq!(a.advance(), b.advance());
        }
    }

    #[test]
    fn random_walk_rejects_bad_start() {
        assert!(RandomWalkFeed::new(0.0, 0.0, 50.0).is_err());
        assert!(RandomWalkFeed::new(f64::NAN, 0.0, 50.0).is_err());
    }
}
