//! The pricing-and-position engine.
//!
//! `pricing` and `validator` are pure functions; `lifecycle` owns the single
//! position; `executor` glues them together for order placement; `feed` and
//! `ticker` produce and apply price updates.

pub mod executor;
pub mod feed;
pub mod lifecycle;
pub mod pricing;
pub mod ticker;
pub mod validator;
