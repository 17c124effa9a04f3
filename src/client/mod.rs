//! HTTP client for the monitoring API.
//!
//! The [`Upstream`] trait is the seam the poller and the on-demand actions
//! depend on; [`OpsClient`] is the reqwest implementation. Each call is a
//! single GET with no retry. Callers decide whether a failure is logged or
//! shown inline.

mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use error::FetchError;

use crate::config::UpstreamConfig;
use crate::status::{DbDetails, DbTopology, ReplErrorReport, StatusSnapshot};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

pub const STATUS_PATH: &str = "/api/data";
pub const REPL_ERRORS_PATH: &str = "/api/repl/errors";
pub const CHECK_DB_PATH: &str = "/api/check_db";
pub const DB_DETAILS_PATH: &str = "/api/db_details";

/// Read-only view of the monitoring API.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// `GET /api/data`
    async fn status_snapshot(&self) -> Result<StatusSnapshot, FetchError>;

    /// `GET /api/repl/errors?hours={hours}`
    async fn repl_errors(&self, hours: u32) -> Result<ReplErrorReport, FetchError>;

    /// `GET /api/check_db`
    async fn check_db(&self) -> Result<DbTopology, FetchError>;

    /// `GET /api/db_details/{ip}`; an `error` field in the body is returned as data.
    async fn db_details(&self, ip: &str) -> Result<DbDetails, FetchError>;
}

/// reqwest-backed [`Upstream`].
#[derive(Debug, Clone)]
pub struct OpsClient {
    client: reqwest::Client,
    base_url: Url,
    timeout_seconds: u64,
}

impl OpsClient {
    /// Create a client with a pooled reqwest client and the configured timeout.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Self::with_client(config, client)
    }

    /// Create a client around an existing reqwest client (for testing).
    pub fn with_client(config: &UpstreamConfig, client: reqwest::Client) -> Result<Self, FetchError> {
        let base_url = Url::parse(config.normalized_base_url())
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            client,
            base_url,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
    ) -> Result<T, FetchError> {
        let start = Instant::now();
        let result = self.send_and_decode(url).await;
        let elapsed = start.elapsed();

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!("opsboard_upstream_requests_total",
            "endpoint" => endpoint,
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("opsboard_upstream_latency_seconds", "endpoint" => endpoint)
            .record(elapsed.as_secs_f64());

        tracing::debug!(
            endpoint,
            outcome,
            duration_ms = elapsed.as_millis() as u64,
            "Upstream request finished"
        );
        result
    }

    async fn send_and_decode<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify_error(e, self.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify_error(e, self.timeout_seconds))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Classify reqwest error into FetchError.
    fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(timeout_seconds)
        } else {
            FetchError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Upstream for OpsClient {
    async fn status_snapshot(&self) -> Result<StatusSnapshot, FetchError> {
        let url = self.endpoint(&["api", "data"])?;
        self.get_json(STATUS_PATH, url).await
    }

    async fn repl_errors(&self, hours: u32) -> Result<ReplErrorReport, FetchError> {
        let mut url = self.endpoint(&["api", "repl", "errors"])?;
        url.query_pairs_mut()
            .append_pair("hours", &hours.to_string());
        self.get_json(REPL_ERRORS_PATH, url).await
    }

    async fn check_db(&self) -> Result<DbTopology, FetchError> {
        let url = self.endpoint(&["api", "check_db"])?;
        self.get_json(CHECK_DB_PATH, url).await
    }

    async fn db_details(&self, ip: &str) -> Result<DbDetails, FetchError> {
        let url = self.endpoint(&["api", "db_details", ip])?;
        self.get_json(DB_DETAILS_PATH, url).await
    }
}
