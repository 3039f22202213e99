//! # routes::feed
//!
//! Price ingress for an external market feed, and the current price for the
//! dashboard.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    engine::ticker::process_tick,
    error::AppError,
    models::PriceTick,
    state::SharedState,
};

// ─── POST /api/feed/tick ──────────────────────────────────────────────────────

/// Same path as simulated ticks; a malformed price is a 400 and changes nothing.
pub async fn push_tick(
    State(state): State<SharedState>,
    Json(tick): Json<PriceTick>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(time) = tick.time {
        tracing::debug!(%time, price = tick.price, "External tick received");
    }
    let outcome = process_tick(&state, tick.price, tick.change_pct).await?;

    Ok(Json(json!({
        "ok":        true,
        "snapshot":  outcome.snapshot,
        "valuation": outcome.valuation,
    })))
}

// ─── GET /api/market/price ────────────────────────────────────────────────────

pub async fn get_price(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "ok":       true,
        "snapshot": state.snapshot().await,
    }))
}
