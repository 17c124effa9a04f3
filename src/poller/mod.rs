//! Background poller that keeps the page in sync with the monitoring API.
//!
//! One cycle runs at startup and then on every tick. A cycle issues two
//! independent requests: the aggregate snapshot and the replication error
//! report. Each one renders its own containers on success and logs and
//! leaves the previous markup in place on failure. There is no retry; the
//! next tick is the only recovery.
//!
//! Ticks do not wait for the previous cycle. A slow cycle can overlap the
//! next one, and whichever response completes last owns the containers.


use crate::client::Upstream;
use crate::config::PollConfig;
use crate::page::{Page, PollOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// What a single cycle managed to refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub snapshot_ok: bool,
    pub repl_errors_ok: bool,
}

/// Periodically fetches status and renders it into the page.
#[derive(Clone)]
pub struct Poller {
    upstream: Arc<dyn Upstream>,
    page: Arc<Page>,
    config: PollConfig,
}

impl Poller {
    pub fn new(upstream: Arc<dyn Upstream>, page: Arc<Page>, config: PollConfig) -> Self {
        Self {
            upstream,
            page,
            config,
        }
    }

    /// Run one poll cycle and wait for both requests to settle.
    pub async fn run_cycle(&self) -> CycleReport {
        let start = Instant::now();
        self.page.begin_refresh();

        let (snapshot_ok, repl_errors_ok) =
            tokio::join!(self.refresh_snapshot(start), self.refresh_repl_errors(start));

        self.page.record_poll(PollOutcome {
            finished_at: chrono::Utc::now(),
            snapshot_ok,
            repl_errors_ok,
        });
        self.finish_refresh();

        let result = match (snapshot_ok, repl_errors_ok) {
            (true, true) => "success",
            (false, false) => "failure",
            _ => "partial",
        };
        metrics::counter!("opsboard_poll_cycles_total", "result" => result).increment(1);

        tracing::debug!(
            snapshot_ok,
            repl_errors_ok,
            duration_ms = start.elapsed().as_millis() as u64,
            "Poll cycle completed"
        );

        CycleReport {
            snapshot_ok,
            repl_errors_ok,
        }
    }

    async fn refresh_snapshot(&self, start: Instant) -> bool {
        match self.upstream.status_snapshot().await {
            Ok(snapshot) => {
                self.page.render_snapshot(&snapshot);
                true
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = crate::client::STATUS_PATH,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Status poll failed, keeping previous view"
                );
                false
            }
        }
    }

    async fn refresh_repl_errors(&self, start: Instant) -> bool {
        let hours = self.config.repl_error_hours;
        match self.upstream.repl_errors(hours).await {
            Ok(report) => {
                self.page.render_repl_errors(&report, hours);
                true
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = crate::client::REPL_ERRORS_PATH,
                    hours,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Replication error poll failed, keeping previous view"
                );
                false
            }
        }
    }

    /// Drop the refresh indicator after the configured linger.
    fn finish_refresh(&self) {
        let linger = self.config.refresh_linger_ms;
        if linger == 0 {
            self.page.end_refresh();
            return;
        }
        let page = Arc::clone(&self.page);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(linger)).await;
            page.end_refresh();
        });
    }

    /// Start the poller background task.
    /// Returns a JoinHandle that resolves when the poller stops.
    pub fn start(self, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.config.interval_seconds));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                interval_seconds = self.config.interval_seconds,
                repl_error_hours = self.config.repl_error_hours,
                "Poller started"
            );

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Poller shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let poller = self.clone();
                        tokio::spawn(async move {
                            poller.run_cycle().await;
                        });
                    }
                }
            }
        })
    }
}
