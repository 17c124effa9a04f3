//! Typed payloads returned by the monitoring API.
//!
//! Every document is transient: the poller replaces it wholesale on each
//! successful fetch and never merges it with a previous copy.

pub mod de;

use de::{delay_or_unknown, lenient_f64, null_as_default};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel the backend uses when a slave cannot report its delay.
pub const UNKNOWN_DELAY: i64 = -1;

fn unknown_delay() -> i64 {
    UNKNOWN_DELAY
}

/// Aggregate document from `GET /api/data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    /// Server-side collection time, already formatted for display
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    pub inference: Vec<Node>,
    /// Physical servers keyed by IP
    pub servers: BTreeMap<String, Server>,
    pub alerts: Vec<Alert>,
}

/// An inference endpoint as checked by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// `"ready"` when healthy; anything else (`"tcp_ok"`, `"http_503"`, `"offline"`) is not
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Probe round trip in milliseconds
    #[serde(deserialize_with = "lenient_f64")]
    pub latency: f64,
}

impl Node {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

/// Host metrics for one physical server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub cpu: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub mem: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub disk: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: String,
}

impl Server {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    /// `"crit"` for critical; any other value is a warning
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
}

impl Alert {
    pub fn is_critical(&self) -> bool {
        self.kind == "crit"
    }
}

/// Master/slave view from `GET /api/check_db`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbTopology {
    pub master: MasterInfo,
    pub slaves: Vec<SlaveInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub connected: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub conn_curr: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub conn_max: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub qps: i64,
    /// Current binlog file
    pub file: Option<String>,
    /// Current binlog position
    pub pos: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaveInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    /// `Slave_IO_Running`
    #[serde(deserialize_with = "null_as_default")]
    pub io: String,
    /// `Slave_SQL_Running`
    #[serde(deserialize_with = "null_as_default")]
    pub sql: String,
    /// Seconds behind master, [`UNKNOWN_DELAY`] when not reported
    #[serde(default = "unknown_delay", deserialize_with = "delay_or_unknown")]
    pub delay: i64,
    pub error: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub connected: bool,
    pub file: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub read_pos: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub exec_pos: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub gtid: String,
}

impl Default for SlaveInfo {
    fn default() -> Self {
        Self {
            ip: String::new(),
            io: String::new(),
            sql: String::new(),
            delay: UNKNOWN_DELAY,
            error: None,
            connected: false,
            file: None,
            read_pos: 0,
            exec_pos: 0,
            gtid: String::new(),
        }
    }
}

impl SlaveInfo {
    /// Both replication threads must literally report `"Yes"`.
    pub fn is_replicating(&self) -> bool {
        self.io == "Yes" && self.sql == "Yes"
    }
}

/// Skipped replication errors from `GET /api/repl/errors?hours=N`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplErrorReport {
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    pub errors: Vec<ReplError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplError {
    #[serde(deserialize_with = "null_as_default")]
    pub error_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slave_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub master_log_file: String,
    #[serde(deserialize_with = "null_as_default")]
    pub master_log_pos: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub error_msg: String,
}

/// Per-host deep metrics from `GET /api/db_details/{ip}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbDetails {
    pub innodb: Option<InnoDbStats>,
    pub slow_queries: Vec<SlowQuery>,
    pub tables: Vec<TableSize>,
    /// Lock waits and long sleepers, passed through untouched
    pub locks: Vec<serde_json::Value>,
    /// Set by the backend when the host is unknown or unreachable
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnoDbStats {
    pub buffer_pool_mb: Option<f64>,
    pub hit_rate: Option<String>,
}

impl InnoDbStats {
    pub fn is_empty(&self) -> bool {
        self.buffer_pool_mb.is_none() && self.hit_rate.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowQuery {
    pub sql_text: Option<String>,
    /// Execution time in seconds
    #[serde(deserialize_with = "lenient_f64")]
    pub time: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rows_sent: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub rows_examined: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSize {
    #[serde(deserialize_with = "null_as_default")]
    pub db: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tb: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub size_mb: f64,
}
