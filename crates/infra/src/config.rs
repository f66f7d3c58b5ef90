//! Service configuration from environment variables.
//!
//! | Variable                      | Default                  |
//! |-------------------------------|--------------------------|
//! | `BIND_ADDR`                   | `0.0.0.0:8080`           |
//! | `SESSION_TTL_SECS`            | `180`                    |
//! | `SESSION_SWEEP_INTERVAL_SECS` | `60`                     |
//! | `USE_PERSISTENT_STORES`       | `false`                  |
//! | `DATABASE_URL`                | required when persistent |
//! | `REDIS_URL`                   | `redis://localhost:6379` |
//! | `LOG_FORMAT`                  | `json`                   |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub use pizzeria_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 180;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),
}

/// Connection settings for the persistent backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentConfig {
    pub database_url: String,
    pub redis_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub session_ttl: Duration,
    pub sweep_interval: Duration,
    pub log_format: LogFormat,
    /// `Some` when `USE_PERSISTENT_STORES=true`.
    pub persistent: Option<PersistentConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or("BIND_ADDR", get("BIND_ADDR"), || {
            SocketAddr::from_str(DEFAULT_BIND_ADDR).map_err(|e| e.to_string())
        })?;

        let ttl_secs: u64 = parse_or("SESSION_TTL_SECS", get("SESSION_TTL_SECS"), || {
            Ok(DEFAULT_SESSION_TTL_SECS)
        })?;
        if ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_TTL_SECS",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }

        let sweep_secs: u64 = parse_or(
            "SESSION_SWEEP_INTERVAL_SECS",
            get("SESSION_SWEEP_INTERVAL_SECS"),
            || Ok(DEFAULT_SWEEP_INTERVAL_SECS),
        )?;
        if sweep_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_SWEEP_INTERVAL_SECS",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }

        let log_format = parse_or("LOG_FORMAT", get("LOG_FORMAT"), || Ok(LogFormat::default()))?;

        let use_persistent: bool =
            parse_or("USE_PERSISTENT_STORES", get("USE_PERSISTENT_STORES"), || Ok(false))?;
        let persistent = if use_persistent {
            Some(PersistentConfig {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                redis_url: get("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            })
        } else {
            None
        };

        Ok(Self {
            bind_addr,
            session_ttl: Duration::from_secs(ttl_secs),
            sweep_interval: Duration::from_secs(sweep_secs),
            log_format,
            persistent,
        })
    }
}

fn parse_or<T>(
    var: &'static str,
    raw: Option<String>,
    default: impl FnOnce() -> Result<T, String>,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
        None => default().map_err(|reason| ConfigError::Invalid {
            var,
            value: String::new(),
            reason,
        }),
    }
}
