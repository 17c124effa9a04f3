//! Shared fixtures for opsboard integration tests.
//!
//! Payloads mirror what the monitoring API actually sends, including the
//! loose spots: decimals as strings, `null` delays and missing optionals.

#![allow(dead_code)]

use opsboard::api::{create_router, AppState};
use opsboard::client::OpsClient;
use opsboard::config::{OpsboardConfig, PollConfig, UpstreamConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Payloads
// =============================================================================

pub fn status_json() -> Value {
    json!({
        "time": "2026-10-16 09:30:00",
        "inference": [
            {"name": "sglang-a", "url": "http://10.0.0.11:30000", "status": "ready", "latency": 12.4},
            {"name": "sglang-b", "url": "http://10.0.0.12:30000", "status": "http_502", "latency": 0}
        ],
        "servers": {
            "10.0.0.31": {"ip": "10.0.0.31", "status": "online", "cpu": 91.2, "mem": "55.0", "disk": 40, "uptime": "12 days"},
            "10.0.0.32": {"ip": "10.0.0.32", "status": "offline", "cpu": null, "mem": null, "disk": null, "uptime": ""}
        },
        "alerts": [
            {"type": "crit", "msg": "Inference node sglang-b unreachable"},
            {"type": "warn", "msg": "CPU high on 10.0.0.31"}
        ]
    })
}

pub fn healthy_status_json() -> Value {
    json!({"time": "2026-10-16 09:40:00", "inference": [], "servers": {}, "alerts": []})
}

pub fn repl_errors_json() -> Value {
    json!({
        "count": 1,
        "errors": [{
            "error_time": "2026-10-16T03:12:09",
            "slave_ip": "10.0.0.21",
            "error_code": 1062,
            "master_log_file": "mysql-bin.000042",
            "master_log_pos": 98765,
            "error_msg": "Duplicate entry '42' for key 'PRIMARY'"
        }]
    })
}

pub fn topology_json() -> Value {
    json!({
        "master": {
            "ip": "10.0.0.20", "connected": true, "conn_curr": 37, "conn_max": 1000,
            "qps": 420, "file": "mysql-bin.000042", "pos": 98765
        },
        "slaves": [
            {"ip": "10.0.0.21", "io": "Yes", "sql": "Yes", "delay": 0, "error": null},
            {"ip": "10.0.0.22", "io": "Yes", "sql": "No", "delay": null, "error": "Error 'Duplicate entry' on query. Default database: 'shop'."}
        ]
    })
}

pub fn details_json() -> Value {
    json!({
        "innodb": {"buffer_pool_mb": 4096, "hit_rate": "99.87%"},
        "slow_queries": [
            {"sql_text": "SELECT * FROM orders WHERE note LIKE '%x%'", "time": "3.1415926", "rows_sent": 12, "rows_examined": 900000}
        ],
        "tables": [{"db": "shop", "tb": "orders", "size_mb": "2048.456"}],
        "locks": []
    })
}

// =============================================================================
// Mock upstream
// =============================================================================

/// Mount every upstream endpoint with its happy-path payload.
pub async fn mount_happy_upstream(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_json()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/repl/errors"))
        .and(query_param("hours", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repl_errors_json()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/check_db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(topology_json()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/db_details/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_json()))
        .mount(server)
        .await;
}

// =============================================================================
// State builders
// =============================================================================

pub fn config_for(base_url: &str) -> OpsboardConfig {
    OpsboardConfig {
        upstream: UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
        },
        poll: PollConfig {
            refresh_linger_ms: 0,
            ..PollConfig::default()
        },
        ..OpsboardConfig::default()
    }
}

pub fn client_for(base_url: &str) -> OpsClient {
    OpsClient::new(&config_for(base_url).upstream).unwrap()
}

pub fn state_for(base_url: &str) -> Arc<AppState> {
    let config = Arc::new(config_for(base_url));
    let upstream = Arc::new(OpsClient::new(&config.upstream).unwrap());
    Arc::new(AppState::new(config, upstream))
}

pub fn router_for(base_url: &str) -> (axum::Router, Arc<AppState>) {
    let state = state_for(base_url);
    (create_router(Arc::clone(&state)), state)
}

/// Read a response body as UTF-8.
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
