//! # models::tick
//!
//! [`PriceTick`] is the payload an external feed pushes in; [`PriceSnapshot`]
//! is the latest known price the engine and the dashboard read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price update pushed by an external feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTick {
    pub price: f64,

    /// Optional 24h change in percent. Display only.
    #[serde(default)]
    pub change_pct: Option<f64>,

    /// When the feed observed the price. Defaults to arrival time.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// Latest accepted price for the traded symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub symbol: String,
    pub price: f64,
    /// Decorative 24h change in percent.
    pub change_pct: f64,
    pub updated_at: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn new(symbol: impl Into<String>, price: f64, change_pct: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change_pct,
            updated_at: Utc::now(),
        }
    }
}
