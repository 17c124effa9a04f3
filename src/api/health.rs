//! Health check endpoint handler.

use crate::api::AppState;
use crate::page::PollOutcome;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `starting` before the first poll, `healthy` when both documents
    /// refreshed, `degraded` otherwise
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub upstream: String,
    pub view: String,
    pub last_poll: Option<PollOutcome>,
}

pub(crate) fn poll_status(last_poll: Option<&PollOutcome>) -> &'static str {
    match last_poll {
        None => "starting",
        Some(p) if p.snapshot_ok && p.repl_errors_ok => "healthy",
        Some(_) => "degraded",
    }
}

/// GET /health - The front server always answers; upstream trouble shows as `degraded`.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let last_poll = state.page.last_poll();

    Json(HealthResponse {
        status: poll_status(last_poll.as_ref()).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        upstream: state.config.upstream.base_url.clone(),
        view: state.page.view_state().current,
        last_poll,
    })
}
