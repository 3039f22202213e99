//! # routes::monitor
//!
//! **Monitor** — live stream and counters for the dashboard.
//!
//! | Method    | Path                 | Description                      |
//! |-----------|----------------------|----------------------------------|
//! | GET (WS)  | `/ws/monitor`        | WebSocket real-time event stream |
//! | GET       | `/api/monitor/stats` | tick / trade / rejection counts  |
//! | GET       | `/api/health`        | liveness                         |

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    Json,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

use crate::state::SharedState;

// ─── WebSocket Handler ────────────────────────────────────────────────────────

/// Upgrade HTTP → WebSocket, then forward every broadcast event as a text frame.
pub async fn ws_monitor(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let mut rx = state.broadcast_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 WebSocket client connected");

    // ── Send the current snapshot right away ─────────────────────────────────
    let snapshot = {
        let lifecycle = state.lifecycle.read().await;
        let market = state.market.read().await;

        json!({
            "event":       "SNAPSHOT",
            "market":      *market,
            "position":    lifecycle.position(),
            "valuation":   lifecycle.live_pnl(),
            "tick_count":  state.tick_count.load(Ordering::Relaxed),
            "trade_count": state.trade_count.load(Ordering::Relaxed),
        })
        .to_string()
    };

    if sender.send(Message::Text(snapshot)).await.is_err() {
        return;
    }

    // ── Event Loop ────────────────────────────────────────────────────────────
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!("WS client lagged, skipped {n} events");
                    }
                    Err(_) => break,
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("🔌 WebSocket client disconnected");
}

// ─── REST Monitoring Endpoints ────────────────────────────────────────────────

/// GET /api/monitor/stats
pub async fn get_stats(State(state): State<SharedState>) -> impl IntoResponse {
    let has_position = state.lifecycle.read().await.is_open();
    let stats = state.stats_event(has_position);

    // Push the same numbers to stream listeners on every poll.
    state.broadcast(&stats);

    Json(json!({ "ok": true, "stats": stats }))
}

/// GET /api/health
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "ok":        true,
        "symbol":    state.config.symbol,
        "feed_mode": state.config.feed_mode.to_string(),
    }))
}
