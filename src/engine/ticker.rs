//! # engine::ticker
//!
//! **Tick path** — runs on every price update, simulated or pushed.
//!
//! ## Order of work (every tick)
//! ```text
//! 1. Validate price            → malformed? count, broadcast, keep old state
//! 2. Lock lifecycle → market   → one tick at a time
//! 3. Publish PriceSnapshot     → dashboard price
//! 4. Revalue open position     → live PnL / progress / multiplier
//! 5. Broadcast events
//! ```

use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Interval, MissedTickBehavior};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engine::feed::PriceSource;
use crate::engine::pricing::ensure_valid_price;
use crate::error::PriceError;
use crate::events::WsEvent;
use crate::models::{LiveValuation, PriceSnapshot};
use crate::state::SharedState;

/// Result of an accepted tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    pub snapshot:  PriceSnapshot,
    /// `None` while no position is open.
    pub valuation: Option<LiveValuation>,
}

/// Apply one price update to the shared state.
pub async fn process_tick(
    state:      &SharedState,
    price:      f64,
    change_pct: Option<f64>,
) -> Result<TickOutcome, PriceError> {
    // ── 1. Validate ───────────────────────────────────────────────────────────
    if let Err(err) = ensure_valid_price(price) {
        state.rejected_ticks.fetch_add(1, Ordering::Relaxed);
        warn!(price, "Price tick rejected — keeping last good price");
        state.broadcast(&WsEvent::TickRejected {
            price,
            reason: err.to_string(),
        });
        return Err(err);
    }

    // ── 2. Serialize with other mutations ─────────────────────────────────────
    let mut lifecycle = state.lifecycle.write().await;
    let mut market = state.market.write().await;

    // ── 3. Publish price ──────────────────────────────────────────────────────
    market.price = price;
    if let Some(change) = change_pct.filter(|c| c.is_finite()) {
        market.change_pct = change;
    }
    market.updated_at = Utc::now();
    let snapshot = market.clone();
    drop(market);

    state.tick_count.fetch_add(1, Ordering::Relaxed);

    // ── 4. Revalue ────────────────────────────────────────────────────────────
    let valuation = lifecycle.on_price_tick(price)?;
    let position_id = lifecycle.position().map(|p| p.position_id);
    drop(lifecycle);

    // ── 5. Broadcast ──────────────────────────────────────────────────────────
    state.broadcast(&WsEvent::PriceTick {
        snapshot: snapshot.clone(),
    });
    if let (Some(valuation), Some(position_id)) = (valuation, position_id) {
        state.broadcast(&WsEvent::ValuationUpdated {
            position_id,
            valuation,
        });
    } else {
        debug!(price, "No open position — price published only");
    }

    Ok(TickOutcome { snapshot, valuation })
}

/// Advance `feed` once and push the new price through [`process_tick`].
pub async fn step_feed<F: PriceSource + ?Sized>(
    state: &SharedState,
    feed:  &mut F,
) -> Result<TickOutcome, PriceError> {
    let tick = feed.advance();
    process_tick(state, tick.price, Some(tick.change_pct)).await
}

/// Fixed-cadence timer for the price loop. After a stall the next tick is
/// pushed back instead of firing the missed ones in a burst.
fn price_interval(every: Duration) -> Interval {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Drive `feed` forever on a fixed cadence. Spawned once at startup when the
/// feed mode is `simulated`.
pub async fn run_price_loop<F: PriceSource>(state: SharedState, mut feed: F, every: Duration) {
    let mut interval = price_interval(every);
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;

    info!(interval = ?every, "⏱️ Price loop started");

    loop {
        interval.tick().await;
        // Rejections are already logged and broadcast by process_tick.
        let _ = step_feed(&state, &mut feed).await;
    }
}
