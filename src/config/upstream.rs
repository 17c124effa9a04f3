//! Monitoring backend connection settings

use serde::{Deserialize, Serialize};

/// Where the monitoring API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the monitoring API, without a trailing `/api`
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl UpstreamConfig {
    /// Base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_defaults() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_normalized_base_url_strips_slashes() {
        let config = UpstreamConfig {
            base_url: "http://ops.internal:5000//".to_string(),
            timeout_seconds: 10,
        };
        assert_eq!(config.normalized_base_url(), "http://ops.internal:5000");
    }
}
