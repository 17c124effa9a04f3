//! Error responses for dashboard endpoints.

use crate::client::FetchError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The monitoring API could not serve an on-demand request
    #[error("upstream request failed: {0}")]
    Upstream(#[from] FetchError),

    /// The embedded page template is missing or not UTF-8
    #[error("dashboard template unavailable: {0}")]
    Template(String),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Upstream(FetchError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            DashboardError::Upstream(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let kind = match &self {
            DashboardError::Upstream(e) => e.kind(),
            DashboardError::Template(_) => "template",
        };
        let body = json!({
            "error": {
                "message": self.to_string(),
                "kind": kind,
            }
        });
        (self.status_code(), Json(body)).into_response()
    }
}
