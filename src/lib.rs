//! # Strikeline — structured-trade pricing and position engine
//!
//! A user picks a direction, a risk level and a stake. The engine derives a
//! strike price, a payout multiplier and a win-probability estimate, then
//! tracks the position's live PnL against a moving price until the user
//! closes it.
//!
//! ```text
//!  Price Source ──tick──▶ ticker::process_tick ──▶ PositionLifecycle::on_price_tick
//!                                  │                          ▲
//!                                  ▼                          │ open / close
//!                            PriceSnapshot        executor::execute_order
//!                                                   ├─ validator::validate_stake
//!                                                   └─ pricing::price_contract
//! ```
//!
//! The engine (`engine`, `models`, `error`) is usable in-process on its own;
//! `routes`, `state` and `auth` serve it over HTTP and WebSocket.

pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod routes;
pub mod state;

pub use engine::executor::{execute_order, preview_order, OrderPreview, OrderRequest};
pub use engine::feed::{PriceSource, RandomWalkFeed, ScriptedFeed};
pub use engine::lifecycle::{PositionLifecycle, PositionState};
pub use engine::pricing::price_contract;
pub use engine::validator::{validate_stake, MAX_STAKE, MIN_STAKE};
pub use error::{LifecycleError, OrderError, PriceError, StakeError};
pub use models::{ClosedPosition, Direction, LiveValuation, Position, PricedContract, RiskLevel};
