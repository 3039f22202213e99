//! HTTP surface of the engine.

pub mod feed;
pub mod monitor;
pub mod position;
pub mod quote;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::require_api_key;
use crate::state::SharedState;

/// Build the full router with middleware.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Market / Feed ─────────────────────────────────────────────────────
        .route("/api/market/price",  get(feed::get_price))
        .route("/api/feed/tick",     post(feed::push_tick))
        // ── Order Ticket ──────────────────────────────────────────────────────
        .route("/api/quote",         post(quote::quote))
        .route(
            "/api/position",
            post(position::open_position)
                .get(position::get_position)
                .delete(position::close_position),
        )
        // ── Monitor ───────────────────────────────────────────────────────────
        .route("/ws/monitor",        get(monitor::ws_monitor))
        .route("/api/monitor/stats", get(monitor::get_stats))
        .route("/api/health",        get(monitor::health_check))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::state::build_state;

    fn app_with(config: AppConfig) -> Router {
        router(build_state(config))
    }

    fn app() -> Router {
        app_with(AppConfig {
            initial_price: 100.0,
            ..AppConfig::default()
        })
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn quote_uses_ticket_defaults() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/quote", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"]["valid"], true);
        assert_eq!(body["quote"]["stake"], 1000.0);
        assert_eq!(body["quote"]["contract"]["direction"], "LONG");
        assert_eq!(body["quote"]["contract"]["risk_level"], 20);
    }

    #[tokio::test]
    async fn full_position_round_trip() {
        let app = app();

        let order = json!({ "direction": "LONG", "risk_level": 0, "stake": 1000 });
        let (status, body) = call(&app, "POST", "/api/position", Some(order.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["position"]["entry_price"], 100.0);

        let (status, body) = call(&app, "POST", "/api/position", Some(order)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "A position is already open");

        // risk 0 → strike 100.2; 100.1 is half way.
        let (status, body) = call(&app, "POST", "/api/feed/tick", Some(json!({ "price": 100.1 }))).await;
        assert_eq!(status, StatusCode::OK);
        let progress = body["valuation"]["progress"].as_f64().unwrap();
        assert!((progress - 50.0).abs() < 1e-6);

        let (_, body) = call(&app, "GET", "/api/position", None).await;
        assert!((body["valuation"]["pnl"].as_f64().unwrap() - 1.0).abs() < 1e-6);

        let (status, body) = call(&app, "DELETE", "/api/position", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["closed"]["final_valuation"]["pnl"].as_f64().unwrap() - 1.0).abs() < 1e-6);

        let (status, body) = call(&app, "DELETE", "/api/position", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No open position");

        let (_, body) = call(&app, "GET", "/api/position", None).await;
        assert_eq!(body["position"], Value::Null);
        assert_eq!(body["valuation"]["current_multiplier"], 1.0);
    }

    #[tokio::test]
    async fn invalid_stake_is_unprocessable() {
        let app = app();
        let (status, body) =
            call(&app, "POST", "/api/position", Some(json!({ "stake": 5 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Minimum stake is $10");
    }

    #[tokio::test]
    async fn malformed_pushed_tick_is_refused() {
        let app = app();
        let (status, _) = call(&app, "POST", "/api/feed/tick", Some(json!({ "price": -5.0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = call(&app, "GET", "/api/market/price", None).await;
        assert_eq!(body["snapshot"]["price"], 100.0);
    }

    #[tokio::test]
    async fn api_key_guards_everything_but_health() {
        let app = app_with(AppConfig {
            api_key: Some("secret".into()),
            ..AppConfig::default()
        });

        let (status, _) = call(&app, "GET", "/api/market/price", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .uri("/api/market/price")
            .header(crate::auth::API_KEY_HEADER, "secret")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stats_count_trades_and_rejections() {
        let app = app();
        call(&app, "POST", "/api/position", Some(json!({}))).await;
        call(&app, "POST", "/api/feed/tick", Some(json!({ "price": 0.0 }))).await;

        let (_, body) = call(&app, "GET", "/api/monitor/stats", None).await;
        assert_eq!(body["stats"]["trade_count"], 1);
        assert_eq!(body["stats"]["rejected_ticks"], 1);
        assert_eq!(body["stats"]["has_position"], true);
    }
}
