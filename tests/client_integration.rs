//! Integration tests for the upstream client against a mock monitoring API.

mod common;

use common::*;
use opsboard::client::{FetchError, OpsClient, Upstream};
use opsboard::config::UpstreamConfig;
use opsboard::status::UNKNOWN_DELAY;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_status_snapshot_decodes_loose_payload() {
    let server = MockServer::start().await;
    mount_happy_upstream(&server).await;

    let snapshot = client_for(&server.uri()).status_snapshot().await.unwrap();

    assert_eq!(snapshot.time, "2026-10-16 09:30:00");
    assert_eq!(snapshot.inference.len(), 2);
    assert!(snapshot.inference[0].is_ready());
    assert_eq!(snapshot.servers["10.0.0.31"].mem, 55.0);
    assert_eq!(snapshot.servers["10.0.0.32"].cpu, 0.0);
    assert!(snapshot.alerts[0].is_critical());
}

#[tokio::test]
async fn test_repl_errors_sends_hours() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repl/errors"))
        .and(query_param("hours", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repl_errors_json()))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server.uri()).repl_errors(6).await.unwrap();

    assert_eq!(report.count, 1);
    assert_eq!(report.errors[0].error_code, 1062);
}

#[tokio::test]
async fn test_check_db_null_delay_is_unknown() {
    let server = MockServer::start().await;
    mount_happy_upstream(&server).await;

    let topology = client_for(&server.uri()).check_db().await.unwrap();

    assert_eq!(topology.master.qps, 420);
    assert_eq!(topology.slaves[0].delay, 0);
    assert_eq!(topology.slaves[1].delay, UNKNOWN_DELAY);
    assert!(!topology.slaves[1].is_replicating());
}

#[tokio::test]
async fn test_db_details_uses_host_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/db_details/10.0.0.21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_json()))
        .expect(1)
        .mount(&server)
        .await;

    let details = client_for(&server.uri()).db_details("10.0.0.21").await.unwrap();

    assert!((details.tables[0].size_mb - 2048.456).abs() < 1e-9);
    assert!((details.slow_queries[0].time - 3.1415926).abs() < 1e-9);
}

#[tokio::test]
async fn test_db_details_error_field_is_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/db_details/10.9.9.9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "Unknown Host"})),
        )
        .mount(&server)
        .await;

    let details = client_for(&server.uri()).db_details("10.9.9.9").await.unwrap();

    assert_eq!(details.error.as_deref(), Some("Unknown Host"));
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).status_snapshot().await.unwrap_err();

    assert!(matches!(err, FetchError::HttpStatus(503)));
}

#[tokio::test]
async fn test_undecodable_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).status_snapshot().await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/check_db"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(topology_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = OpsClient::new(&UpstreamConfig {
        base_url: server.uri(),
        timeout_seconds: 1,
    })
    .unwrap();

    let err = client.check_db().await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout(1)));
}

#[tokio::test]
async fn test_unreachable_upstream_is_connection_error() {
    // Port 9 (discard) is not expected to be listening.
    let err = client_for("http://127.0.0.1:9")
        .status_snapshot()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::ConnectionFailed(_) | FetchError::Timeout(_)
    ));
}
