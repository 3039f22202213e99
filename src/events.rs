//! # events
//!
//! Defines [`WsEvent`] — every event the engine broadcasts to WebSocket
//! monitor clients.
//!
//! Events go through a `tokio::sync::broadcast::Sender<String>` as
//! pre-serialized JSON, so slow or absent listeners never hold up a tick.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{ClosedPosition, LiveValuation, Position, PriceSnapshot};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsEvent {
    /// A new price was accepted.
    PriceTick {
        snapshot: PriceSnapshot,
    },

    /// A malformed price was refused; the previous price and valuation stand.
    TickRejected {
        price:  f64,
        reason: String,
    },

    PositionOpened {
        position: Box<Position>,
    },

    /// The open position was marked against the latest price.
    ValuationUpdated {
        position_id: Uuid,
        valuation:   LiveValuation,
    },

    PositionClosed {
        closed: Box<ClosedPosition>,
    },

    /// Server counters (sent whenever someone polls the stats endpoint).
    ServerStats {
        tick_count:     u64,
        trade_count:    u64,
        rejected_ticks: u64,
        has_position:   bool,
    },
}

impl WsEvent {
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}
