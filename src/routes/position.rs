//! # routes::position
//!
//! | Method | Path            | Description                          |
//! |--------|-----------------|--------------------------------------|
//! | POST   | `/api/position` | Place an order → open the position   |
//! | GET    | `/api/position` | Current position + live valuation    |
//! | DELETE | `/api/position` | Close the position                   |

use std::sync::atomic::Ordering;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    engine::executor::{execute_order, OrderRequest},
    error::AppError,
    events::WsEvent,
    state::SharedState,
};

// ─── POST /api/position ───────────────────────────────────────────────────────

pub async fn open_position(
    State(state): State<SharedState>,
    Json(order): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (position, valuation) = {
        let mut lifecycle = state.lifecycle.write().await;
        // Read under the lifecycle guard so no tick lands between pricing and open.
        let price = state.current_price().await;
        let position = execute_order(&mut lifecycle, &order, price, state.config.available_balance)?;
        (position, lifecycle.live_pnl())
    };

    state.trade_count.fetch_add(1, Ordering::Relaxed);
    state.broadcast(&WsEvent::PositionOpened {
        position: Box::new(position.clone()),
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "ok":        true,
            "position":  position,
            "valuation": valuation,
        })),
    ))
}

// ─── GET /api/position ────────────────────────────────────────────────────────

pub async fn get_position(State(state): State<SharedState>) -> impl IntoResponse {
    let lifecycle = state.lifecycle.read().await;
    Json(json!({
        "ok":        true,
        "position":  lifecycle.position(),
        "valuation": lifecycle.live_pnl(),
    }))
}

// ─── DELETE /api/position ─────────────────────────────────────────────────────

pub async fn close_position(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let closed = state.lifecycle.write().await.close()?;

    state.broadcast(&WsEvent::PositionClosed {
        closed: Box::new(closed.clone()),
    });

    Ok(Json(json!({
        "ok":     true,
        "closed": closed,
    })))
}
