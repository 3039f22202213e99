//! # error
//!
//! Error types for the engine and the HTTP layer.
//!
//! The engine errors (`StakeError`, `LifecycleError`, `PriceError`) are plain
//! values whose `Display` text is short enough to show to the user verbatim.
//! Every handler returns `Result<_, AppError>`; Axum's `IntoResponse` impl
//! turns these into `{"ok": false, "error": ...}` bodies so the dashboard
//! always gets a machine-readable response even on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::engine::validator::MIN_STAKE;

// ─── Engine Errors ────────────────────────────────────────────────────────────

/// Why a stake was refused. Checks run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StakeError {
    #[error("Minimum stake is ${min}", min = MIN_STAKE)]
    BelowMinimum,

    #[error("Maximum stake is $99,999")]
    AboveMaximum,

    #[error("Exceeds available balance")]
    InsufficientBalance,
}

/// Illegal transition of the position state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("A position is already open")]
    PositionAlreadyOpen,

    #[error("No open position")]
    NoOpenPosition,
}

/// A price that is not a finite positive number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PriceError {
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
}

/// Everything that can stop an order from opening a position.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OrderError {
    #[error(transparent)]
    Stake(#[from] StakeError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Price(#[from] PriceError),
}

// ─── HTTP Error ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    /// The request payload was syntactically correct but semantically invalid.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested resource (e.g. an open position) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request conflicts with current state (e.g. a second position).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The order was well-formed but refused by validation.
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Stake(e) => AppError::Unprocessable(e.to_string()),
            OrderError::Lifecycle(e) => e.into(),
            OrderError::Price(e) => e.into(),
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::PositionAlreadyOpen => AppError::Conflict(err.to_string()),
            LifecycleError::NoOpenPosition => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<PriceError> for AppError {
    fn from(err: PriceError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {err}"),
            ),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
