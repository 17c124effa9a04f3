//! # Metrics
//!
//! Prometheus export for the front server, served at `GET /metrics`.
//!
//! **Counters:**
//! - `opsboard_upstream_requests_total{endpoint, outcome}` - Upstream fetches
//! - `opsboard_poll_cycles_total{result}` - Poll cycles by outcome
//!
//! **Histograms:**
//! - `opsboard_upstream_latency_seconds{endpoint}` - Upstream fetch duration
//!
//! **Gauges:**
//! - `opsboard_ws_clients` - Connected browsers
//! - `opsboard_last_poll_success{document}` - 1 when the last fetch of that document succeeded
//! - `opsboard_uptime_seconds` - Seconds since startup

use crate::api::AppState;
use crate::page::Page;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;

pub struct MetricsCollector {
    page: Arc<Page>,
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(page: Arc<Page>, start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            page,
            start_time,
            prometheus_handle,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Refresh gauges derived from page state.
    pub fn update_page_gauges(&self) {
        metrics::gauge!("opsboard_uptime_seconds").set(self.uptime_seconds() as f64);

        if let Some(outcome) = self.page.last_poll() {
            let flag = |ok: bool| if ok { 1.0 } else { 0.0 };
            metrics::gauge!("opsboard_last_poll_success", "document" => "status")
                .set(flag(outcome.snapshot_ok));
            metrics::gauge!("opsboard_last_poll_success", "document" => "repl_errors")
                .set(flag(outcome.repl_errors_ok));
        }
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.update_page_gauges();
        self.prometheus_handle.render()
    }
}

/// Install the global Prometheus recorder with latency buckets sized for a
/// LAN monitoring API.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

    let latency_buckets = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("opsboard_upstream_latency_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Handler for GET /metrics (Prometheus text format).
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics.render_metrics(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PollOutcome;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_collector_uptime_starts_near_zero() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let collector = MetricsCollector::new(Arc::new(Page::new()), Instant::now(), handle);
        assert!(collector.uptime_seconds() < 1);
    }

    #[test]
    fn test_page_gauges_follow_last_poll() {
        let page = Arc::new(Page::new());
        page.record_poll(PollOutcome {
            finished_at: chrono::Utc::now(),
            snapshot_ok: true,
            repl_errors_ok: false,
        });
        // A local recorder keeps this independent of whichever test installed the global one.
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let collector = MetricsCollector::new(page, Instant::now(), handle.clone());

        metrics::with_local_recorder(&recorder, || collector.update_page_gauges());
        let text = handle.render();

        assert!(text.contains(r#"opsboard_last_poll_success{document="status"} 1"#));
        assert!(text.contains(r#"opsboard_last_poll_success{document="repl_errors"} 0"#));
        assert!(text.contains("opsboard_uptime_seconds"));
    }

    #[test]
    fn test_no_poll_gauges_before_first_cycle() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let collector = MetricsCollector::new(Arc::new(Page::new()), Instant::now(), handle.clone());

        metrics::with_local_recorder(&recorder, || collector.update_page_gauges());

        assert!(!handle.render().contains("opsboard_last_poll_success"));
    }
}
