//! # Strikeline — structured-trade server
//!
//! ```text
//!  ┌──────────────┐  every TICK_INTERVAL_MS   ┌───────────────────────────┐
//!  │ RandomWalk   │ ─────────────────────────▶│ AppState                  │
//!  │ (simulated)  │                           │ ├─ market   (snapshot)    │
//!  └──────────────┘                           │ ├─ lifecycle (position)   │
//!  ┌──────────────┐  POST /api/feed/tick      │ └─ broadcast_tx ────────┐ │
//!  │ Market feed  │ ─────────────────────────▶└─────────────────────────│─┘
//!  └──────────────┘                                                     │
//!  ┌──────────────┐  POST /api/quote · /api/position                    │
//!  │  Dashboard   │ ◀── ws://host/ws/monitor ───────────────────────────┘
//!  └──────────────┘
//! ```

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use strikeline::config::{AppConfig, FeedMode};
use strikeline::engine::feed::RandomWalkFeed;
use strikeline::engine::ticker::run_price_loop;
use strikeline::routes::router;
use strikeline::state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — CI/prod can use real env vars) ──────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("strikeline=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║        STRIKELINE — Structured Trades         ║
  ║   Pricing · Validation · Live Position PnL    ║
  ╚═══════════════════════════════════════════════╝"#);

    // ── 3. Config + shared state ──────────────────────────────────────────────
    let config = AppConfig::from_env()?;
    let addr = config.bind_addr;
    info!(
        symbol    = %config.symbol,
        price     = config.initial_price,
        balance   = config.available_balance,
        feed_mode = %config.feed_mode,
        "Configuration loaded"
    );
    let state = build_state(config);

    // ── 4. Price feed ─────────────────────────────────────────────────────────
    match state.config.feed_mode {
        FeedMode::Simulated => {
            let feed = RandomWalkFeed::new(
                state.config.initial_price,
                state.config.initial_change_pct,
                state.config.price_step,
            )?;
            tokio::spawn(run_price_loop(state.clone(), feed, state.config.tick_interval));
        }
        FeedMode::External => {
            info!("External feed mode — waiting for POST /api/feed/tick");
        }
    }

    // ── 5. Router ─────────────────────────────────────────────────────────────
    let app = router(state);

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    info!(?addr, "🚀 Strikeline server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
