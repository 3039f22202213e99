//! # config — read configuration from environment variables
//!
//! | Variable             | Default        | Description                              |
//! |----------------------|----------------|------------------------------------------|
//! | `BIND_ADDR`          | `0.0.0.0:3000` | Address Axum listens on                  |
//! | `SYMBOL`             | `BTCUSD`       | Asset label on snapshots and events      |
//! | `INITIAL_PRICE`      | `64230.50`     | Starting price of the simulated feed     |
//! | `INITIAL_CHANGE_PCT` | `2.45`         | Starting 24h change shown to the user    |
//! | `AVAILABLE_BALANCE`  | `10000`        | Spendable funds stakes are checked against |
//! | `TICK_INTERVAL_MS`   | `2000`         | Price loop cadence                       |
//! | `PRICE_STEP`         | `50`           | Random-walk step width                   |
//! | `FEED_MODE`          | `simulated`    | `simulated` or `external`                |
//! | `API_KEY`            | unset          | Require `X-API-Key` when set             |

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context};

use crate::engine::pricing::ensure_valid_price;

/// Where price ticks come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Built-in random walk on a timer.
    Simulated,
    /// Ticks are pushed to `POST /api/feed/tick`; no timer runs.
    External,
}

impl std::fmt::Display for FeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedMode::Simulated => write!(f, "simulated"),
            FeedMode::External => write!(f, "external"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr:          SocketAddr,
    pub symbol:             String,
    pub initial_price:      f64,
    pub initial_change_pct: f64,
    /// Read-only; nothing in the engine ever debits or credits it.
    pub available_balance:  f64,
    pub tick_interval:      Duration,
    pub price_step:         f64,
    pub feed_mode:          FeedMode,
    /// `None` = dev mode, every request allowed.
    pub api_key:            Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Malformed or non-finite numbers fall back to
    /// defaults; a bad bind address, starting price or feed mode is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let parse_or = |key: &str, default: f64| -> f64 {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(default)
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:3000")?;

        let initial_price = ensure_valid_price(parse_or("INITIAL_PRICE", 64_230.50))
            .context("INITIAL_PRICE must be a finite positive number")?;

        let feed_mode = match lookup("FEED_MODE")
            .unwrap_or_else(|| "simulated".to_string())
            .to_lowercase()
            .as_str()
        {
            "simulated" => FeedMode::Simulated,
            "external" => FeedMode::External,
            other => bail!("Unknown FEED_MODE: '{other}'. Use 'simulated' or 'external'"),
        };

        let tick_interval_ms = lookup("TICK_INTERVAL_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(2_000);

        Ok(Self {
            bind_addr,
            symbol:             lookup("SYMBOL").unwrap_or_else(|| "BTCUSD".to_string()),
            initial_price,
            initial_change_pct: parse_or("INITIAL_CHANGE_PCT", 2.45),
            available_balance:  Some(parse_or("AVAILABLE_BALANCE", 10_000.0))
                .filter(|b| *b >= 0.0)
                .unwrap_or(10_000.0),
            tick_interval:      Duration::from_millis(tick_interval_ms),
            price_step:         parse_or("PRICE_STEP", 50.0),
            feed_mode,
            api_key:            lookup("API_KEY").filter(|k| !k.is_empty()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr:          SocketAddr::from(([0, 0, 0, 0], 3000)),
            symbol:             "BTCUSD".to_string(),
            initial_price:      64_230.50,
            initial_change_pct: 2.45,
            available_balance:  10_000.0,
            tick_interval:      Duration::from_millis(2_000),
            price_step:         50.0,
            feed_mode:          FeedMode::Simulated,
            api_key:            None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]).unwrap();
        let def = AppConfig::default();
        assert_eq!(cfg.bind_addr, def.bind_addr);
        assert_eq!(cfg.initial_price, 64_230.50);
        assert_eq!(cfg.available_balance, 10_000.0);
        assert_eq!(cfg.tick_interval, Duration::from_secs(2));
        assert_eq!(cfg.feed_mode, FeedMode::Simulated);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("AVAILABLE_BALANCE", "2500"),
            ("FEED_MODE", "External"),
            ("TICK_INTERVAL_MS", "500"),
            ("API_KEY", "secret"),
            ("SYMBOL", "ETHUSD"),
        ])
        .unwrap();
        assert_eq!(cfg.available_balance, 2500.0);
        assert_eq!(cfg.feed_mode, FeedMode::External);
        assert_eq!(cfg.tick_interval, Duration::from_millis(500));
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.symbol, "ETHUSD");
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let cfg = config_from(&[("AVAILABLE_BALANCE", "lots"), ("TICK_INTERVAL_MS", "0")]).unwrap();
        assert_eq!(cfg.available_balance, 10_000.0);
        assert_eq!(cfg.tick_interval, Duration::from_millis(2_000));
    }

    #[test]
    fn non_finite_numbers_fall_back() {
        let cfg = config_from(&[
            ("AVAILABLE_BALANCE", "NaN"),
            ("INITIAL_CHANGE_PCT", "inf"),
            ("PRICE_STEP", "-inf"),
        ])
        .unwrap();
        assert_eq!(cfg.available_balance, 10_000.0);
        assert_eq!(cfg.initial_change_pct, 2.45);
        assert_eq!(cfg.price_step, 50.0);
    }

    #[test]
    fn balance_from_env_still_caps_stakes() {
        use crate::engine::validator::validate_stake;
        use crate::error::StakeError;

        let cfg = config_from(&[("AVAILABLE_BALANCE", "NaN")]).unwrap();
        assert_eq!(
            validate_stake(50_000.0, cfg.available_balance),
            Err(StakeError::InsufficientBalance)
        );
    }

    #[test]
    fn negative_balance_falls_back() {
        let cfg = config_from(&[("AVAILABLE_BALANCE", "-500")]).unwrap();
        assert_eq!(cfg.available_balance, 10_000.0);
    }

    #[test]
    fn rejects_bad_start_price_and_feed_mode() {
        assert!(config_from(&[("INITIAL_PRICE", "-1")]).is_err());
        assert!(config_from(&[("FEED_MODE", "carrier-pigeon")]).is_err());
        assert!(config_from(&[("BIND_ADDR", "nowhere")]).is_err());
    }

    #[test]
    fn empty_api_key_means_dev_mode() {
        let cfg = config_from(&[("API_KEY", "")]).unwrap();
        assert!(cfg.api_key.is_none());
    }
}
