//! Configuration module for opsboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`OPSBOARD_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use opsboard::config::OpsboardConfig;
//!
//! let config = OpsboardConfig::default();
//! assert_eq!(config.server.port, 5000);
//! assert_eq!(config.poll.interval_seconds, 10);
//!
//! let toml = r#"
//! [upstream]
//! base_url = "http://10.0.0.5:5000"
//! "#;
//! let config: OpsboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.upstream.base_url, "http://10.0.0.5:5000");
//! ```

pub mod error;
pub mod logging;
pub mod poll;
pub mod server;
pub mod upstream;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use poll::PollConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard front server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpsboardConfig {
    /// Front server bind settings
    pub server: ServerConfig,
    /// Monitoring API the dashboard reads from
    pub upstream: UpstreamConfig,
    /// Background poll timer
    pub poll: PollConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl OpsboardConfig {
    /// Load configuration from a TOML file
    ///
    /// `None` yields the defaults. A path that does not exist is an error;
    /// callers that treat the file as optional check first.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(p) = path else {
            return Ok(Self::default());
        };
        if !p.exists() {
            return Err(ConfigError::NotFound(p.to_path_buf()));
        }
        let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
            path: p.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: p.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("OPSBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("OPSBOARD_HOST") {
            self.server.host = host;
        }

        if let Ok(url) = std::env::var("OPSBOARD_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Ok(interval) = std::env::var("OPSBOARD_POLL_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.poll.interval_seconds = secs;
            }
        }

        if let Ok(level) = std::env::var("OPSBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("OPSBOARD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "server.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        let url = self.upstream.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::invalid("upstream.base_url", "URL cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "upstream.base_url",
                format!("'{}' must start with http:// or https://", url),
            ));
        }
        if self.upstream.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "upstream.timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        if self.poll.interval_seconds == 0 {
            return Err(ConfigError::invalid(
                "poll.interval_seconds",
                "interval must be non-zero",
            ));
        }
        if self.poll.repl_error_hours == 0 {
            return Err(ConfigError::invalid(
                "poll.repl_error_hours",
                "look-back window must be non-zero",
            ));
        }

        if let Some((field, level)) = self.logging.invalid_level() {
            return Err(ConfigError::invalid(
                &field,
                format!("unknown level '{}'", level),
            ));
        }

        Ok(())
    }
}

/// Serializes tests that read or write `OPSBOARD_*` environment variables.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
