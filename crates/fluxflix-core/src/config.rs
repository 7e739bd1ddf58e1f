//! Service configuration.
//!
//! All configuration is loaded from environment variables. Every variable
//! is optional; unset variables fall back to the defaults below.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `STORE_BACKEND` | `memory` (`memory` or `dragonfly`) |
//! | `DRAGONFLY_URL` | `redis://localhost:6379` |
//! | `EVENT_INTERVAL_MS` | `1000` |
//! | `SEED_DEMO_DATA` | `true` |
//! | `LOG_FORMAT` | `pretty` (`pretty` or `json`) |

use std::str::FromStr;
use std::time::Duration;

use crate::events::EventStreamConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be used.
    #[error("invalid {name}: {reason}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Which [`MovieStore`](fluxflix_db::MovieStore) backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process store; contents are lost on restart.
    Memory,
    /// `Dragonfly` (Redis-compatible) document store.
    Dragonfly,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "dragonfly" | "redis" => Ok(Self::Dragonfly),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address to bind the HTTP server to.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Store backend selection.
    pub store_backend: StoreBackend,
    /// `Dragonfly` URL, used when `store_backend` is [`StoreBackend::Dragonfly`].
    pub dragonfly_url: String,
    /// Delay between viewing events on each stream.
    pub event_interval: Duration,
    /// Whether to reset the store to the demo titles on startup.
    pub seed_demo_data: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            store_backend: StoreBackend::Memory,
            dragonfly_url: String::from("redis://localhost:6379"),
            event_interval: crate::events::DEFAULT_EVENT_INTERVAL,
            seed_demo_data: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Lets tests supply variables without touching the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let event_interval_ms: u64 = parse_or(&lookup, "EVENT_INTERVAL_MS", 1000)?;
        if event_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "EVENT_INTERVAL_MS",
                reason: "must be at least 1".to_owned(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            store_backend: parse_or(&lookup, "STORE_BACKEND", defaults.store_backend)?,
            dragonfly_url: lookup("DRAGONFLY_URL").unwrap_or(defaults.dragonfly_url),
            event_interval: Duration::from_millis(event_interval_ms),
            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", defaults.seed_demo_data)?,
            log_format: parse_or(&lookup, "LOG_FORMAT", defaults.log_format)?,
        })
    }

    /// Event stream settings derived from this configuration.
    pub const fn event_stream(&self) -> EventStreamConfig {
        EventStreamConfig::new(self.event_interval)
    }
}

/// Parse variable `name` if set, otherwise return `default`.
fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: core::fmt::Display,
{
    lookup(name).map_or(Ok(default), |raw| {
        raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        })
    })
}
