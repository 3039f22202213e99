//! # state
//!
//! The **shared application state** handed to every Axum handler and to the
//! price loop.
//!
//! ## Ownership
//!
//! * The [`PositionLifecycle`] is the only owner of the position. It sits
//!   behind one `RwLock`, and every mutation (`open`, `close`, tick
//!   revaluation) goes through its write guard, so two mutations never run
//!   concurrently.
//! * Lock order is always `lifecycle` → `market`. Tick processing holds both
//!   while it publishes a price, so the snapshot and the valuation never
//!   disagree about which tick they saw.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::config::AppConfig;
use crate::engine::lifecycle::PositionLifecycle;
use crate::events::WsEvent;
use crate::models::PriceSnapshot;

// ─── AppState ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    // ── Market ────────────────────────────────────────────────────────────────
    /// Latest accepted price. Only written by tick processing.
    pub market: Arc<RwLock<PriceSnapshot>>,

    // ── Position ──────────────────────────────────────────────────────────────
    /// `Flat` or `Open(position)`; see `engine::lifecycle`.
    pub lifecycle: Arc<RwLock<PositionLifecycle>>,

    // ── Monitor / WebSocket ───────────────────────────────────────────────────
    pub broadcast_tx: broadcast::Sender<String>,

    // ── Metrics ───────────────────────────────────────────────────────────────
    pub tick_count:     Arc<AtomicU64>,
    pub trade_count:    Arc<AtomicU64>,
    pub rejected_ticks: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(256);
        let snapshot = PriceSnapshot::new(
            config.symbol.clone(),
            config.initial_price,
            config.initial_change_pct,
        );

        Self {
            config:         Arc::new(config),
            market:         Arc::new(RwLock::new(snapshot)),
            lifecycle:      Arc::new(RwLock::new(PositionLifecycle::new())),
            broadcast_tx,
            tick_count:     Arc::new(AtomicU64::new(0)),
            trade_count:    Arc::new(AtomicU64::new(0)),
            rejected_ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    // ── Helper Methods ────────────────────────────────────────────────────────

    /// Broadcast to every WebSocket client. No listeners is not an error.
    pub fn broadcast(&self, event: &WsEvent) {
        let _ = self.broadcast_tx.send(event.to_json());
    }

    pub async fn snapshot(&self) -> PriceSnapshot {
        self.market.read().await.clone()
    }

    pub async fn current_price(&self) -> f64 {
        self.market.read().await.price
    }

    pub fn stats_event(&self, has_position: bool) -> WsEvent {
        WsEvent::ServerStats {
            tick_count:     self.tick_count.load(Ordering::Relaxed),
            trade_count:    self.trade_count.load(Ordering::Relaxed),
            rejected_ticks: self.rejected_ticks.load(Ordering::Relaxed),
            has_position,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

pub type SharedState = Arc<AppState>;

pub fn build_state(config: AppConfig) -> SharedState {
    Arc::new(AppState::new(config))
}
