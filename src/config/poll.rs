//! Configuration for the status poller.

use serde::{Deserialize, Serialize};

/// Timer and look-back settings for the background poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Whether the background poller runs at all
    pub enabled: bool,
    /// Seconds between poll cycles
    pub interval_seconds: u64,
    /// Look-back window for skipped replication errors
    pub repl_error_hours: u32,
    /// How long the refreshing indicator stays on after a cycle finishes
    pub refresh_linger_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 10,
            repl_error_hours: 24,
            refresh_linger_ms: 500,
        }
    }
}
