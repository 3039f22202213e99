//! # routes::quote
//!
//! Order ticket preview: price the contract and check the stake against the
//! current price without opening anything.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    engine::executor::{preview_order, OrderRequest},
    error::AppError,
    state::SharedState,
};

// ─── POST /api/quote ──────────────────────────────────────────────────────────

pub async fn quote(
    State(state): State<SharedState>,
    Json(order): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let price = state.current_price().await;
    let preview = preview_order(&order, price, state.config.available_balance)?;

    Ok(Json(json!({
        "ok":                true,
        "symbol":            state.config.symbol,
        "available_balance": state.config.available_balance,
        "quote":             preview,
    })))
}
