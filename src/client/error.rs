//! Error types for upstream fetches.

use thiserror::Error;

/// Errors that can occur while fetching from the monitoring API.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// Body was not the expected JSON shape
    #[error("invalid response: {0}")]
    Decode(String),

    /// Upstream answered with an `error` field instead of data
    #[error("{0}")]
    Upstream(String),

    /// Base URL or path could not be turned into a request URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "timeout",
            FetchError::ConnectionFailed(_) => "connection",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::Decode(_) => "decode",
            FetchError::Upstream(_) => "upstream",
            FetchError::InvalidUrl(_) => "invalid_url",
            FetchError::Client(_) => "client",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(FetchError::Timeout(10).to_string(), "request timeout after 10s");
        assert_eq!(FetchError::HttpStatus(502).to_string(), "HTTP 502");
        assert_eq!(
            FetchError::Upstream("Unknown Host".to_string()).to_string(),
            "Unknown Host"
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FetchError::Decode("x".into()).kind(), "decode");
        assert_eq!(FetchError::ConnectionFailed("x".into()).kind(), "connection");
    }
}
