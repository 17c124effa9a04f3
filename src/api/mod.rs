//! # Front Server
//!
//! HTTP surface of the dashboard: the page itself, the JSON and action
//! endpoints the page calls, the WebSocket update stream and the
//! operational endpoints.
//!
//! ## Endpoints
//!
//! - `GET /` - Full page with current fragments injected
//! - `GET /fragments` - JSON map of every container, label and panel
//! - `POST /view/{name}` - Switch the visible panel
//! - `POST /actions/check-db` - Run the on-demand database check
//! - `GET /details/{ip}` - Run a drilldown and return the overlay body
//! - `POST /details/close` - Close the overlay
//! - `GET /ws` - Stream of page updates
//! - `GET /assets/{path}` - Embedded static assets
//! - `GET /health` - Front server health with last poll outcome
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use opsboard::api::{create_router, AppState};
//! use opsboard::client::OpsClient;
//! use opsboard::config::OpsboardConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(OpsboardConfig::default());
//! let upstream = Arc::new(OpsClient::new(&config.upstream)?);
//! let state = Arc::new(AppState::new(config, upstream));
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod health;

pub use health::HealthResponse;

use crate::client::Upstream;
use crate::config::OpsboardConfig;
use crate::dashboard;
use crate::dbcheck::DbCheck;
use crate::drilldown::Drilldown;
use crate::metrics::MetricsCollector;
use crate::page::Page;
use crate::poller::Poller;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Action endpoints take no body worth more than this.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<OpsboardConfig>,
    pub upstream: Arc<dyn Upstream>,
    pub page: Arc<Page>,
    pub drilldown: Arc<Drilldown>,
    pub dbcheck: Arc<DbCheck>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Create state around a fresh page.
    pub fn new(config: Arc<OpsboardConfig>, upstream: Arc<dyn Upstream>) -> Self {
        let page = Arc::new(Page::new());
        let start_time = Instant::now();

        // Tests build many states in one process; only the first can own the global recorder.
        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            PrometheusBuilder::new().build_recorder().handle()
        });
        let metrics = Arc::new(MetricsCollector::new(
            Arc::clone(&page),
            start_time,
            prometheus_handle,
        ));

        Self {
            drilldown: Arc::new(Drilldown::new(Arc::clone(&upstream), Arc::clone(&page))),
            dbcheck: Arc::new(DbCheck::new(Arc::clone(&upstream), Arc::clone(&page))),
            config,
            upstream,
            page,
            start_time,
            metrics,
        }
    }

    /// Poller bound to this state's page and upstream.
    pub fn poller(&self) -> Poller {
        Poller::new(
            Arc::clone(&self.upstream),
            Arc::clone(&self.page),
            self.config.poll.clone(),
        )
    }
}

/// Create the front server router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/", get(dashboard::dashboard_handler))
        .route("/fragments", get(dashboard::fragments_handler))
        .route("/view/:name", post(dashboard::view_handler))
        .route("/actions/check-db", post(dashboard::check_db_handler))
        .route("/details/close", post(dashboard::close_details_handler))
        .route("/details/:ip", get(dashboard::details_handler))
        .route("/ws", get(dashboard::websocket_handler))
        .route("/assets/*path", get(dashboard::assets_handler))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
