//! On-demand database topology check.
//!
//! The topology is never polled. A check swaps the check button to a busy
//! label, fetches the master and slave status, renders both containers and
//! leaves the button reading "Re-check". A failed check puts the button back
//! to the label it had before the click and leaves the topology containers
//! untouched.
//!
//! The button is shared by every browser, so checks run one at a time. A
//! click that arrives while a check is in flight waits for it and then runs
//! its own.

use crate::client::{FetchError, Upstream};
use crate::page::{ids, Page};
use crate::status::DbTopology;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Button markup before the first check.
pub const CHECK_LABEL: &str =
    r#"<i class="fa-solid fa-magnifying-glass me-2"></i> Check database"#;

pub const BUSY_LABEL: &str = r#"<span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>Checking..."#;

pub const RECHECK_LABEL: &str = r#"<i class="fa-solid fa-rotate-right me-2"></i> Re-check"#;

pub const CHECK_BUTTON_CLASS: &str = "btn btn-primary btn-sm";
pub const RECHECK_BUTTON_CLASS: &str = "btn btn-outline-primary btn-sm";

pub struct DbCheck {
    upstream: Arc<dyn Upstream>,
    page: Arc<Page>,
    in_flight: Mutex<()>,
    /// Set once any check has rendered a topology.
    succeeded: AtomicBool,
}

impl DbCheck {
    pub fn new(upstream: Arc<dyn Upstream>, page: Arc<Page>) -> Self {
        Self {
            upstream,
            page,
            in_flight: Mutex::new(()),
            succeeded: AtomicBool::new(false),
        }
    }

    /// Fetch the topology and render it, or restore the button on failure.
    pub async fn run(&self) -> Result<DbTopology, FetchError> {
        let _guard = self.in_flight.lock().await;
        self.page
            .set_html(ids::CHECK_DB_BUTTON, BUSY_LABEL.to_string());

        match self.upstream.check_db().await {
            Ok(topology) => {
                self.page.render_topology(&topology);
                self.succeeded.store(true, Ordering::SeqCst);
                self.show_idle_button();
                tracing::info!(
                    master = %topology.master.ip,
                    slaves = topology.slaves.len(),
                    "Database check completed"
                );
                Ok(topology)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Database check failed");
                self.show_idle_button();
                Err(e)
            }
        }
    }

    fn show_idle_button(&self) {
        let (label, class) = if self.succeeded.load(Ordering::SeqCst) {
            (RECHECK_LABEL, RECHECK_BUTTON_CLASS)
        } else {
            (CHECK_LABEL, CHECK_BUTTON_CLASS)
        };
        self.page.set_html(ids::CHECK_DB_BUTTON, label.to_string());
        self.page.set_class(ids::CHECK_DB_BUTTON, class);
    }
}
