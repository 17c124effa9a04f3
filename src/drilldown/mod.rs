//! Per-host database drilldown shown in the detail overlay.
//!
//! A drilldown opens the overlay, shows a loading placeholder in the overlay
//! body, fetches the host's deep metrics and replaces the placeholder with
//! either the detail sections or an inline error box. Nothing is retried.

use crate::client::Upstream;
use crate::page::{ids, Page};
use crate::render;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// Lifecycle of the most recent drilldown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailState {
    #[default]
    Idle,
    Loading { ip: String },
    Loaded { ip: String },
    Errored { ip: String, message: String },
}

impl DetailState {
    pub fn ip(&self) -> Option<&str> {
        match self {
            DetailState::Idle => None,
            DetailState::Loading { ip }
            | DetailState::Loaded { ip }
            | DetailState::Errored { ip, .. } => Some(ip),
        }
    }
}

pub struct Drilldown {
    upstream: Arc<dyn Upstream>,
    page: Arc<Page>,
    state: RwLock<DetailState>,
}

impl Drilldown {
    pub fn new(upstream: Arc<dyn Upstream>, page: Arc<Page>) -> Self {
        Self {
            upstream,
            page,
            state: RwLock::new(DetailState::Idle),
        }
    }

    pub fn state(&self) -> DetailState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: DetailState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Open the overlay for `ip` and fill it with that host's details.
    pub async fn show(&self, ip: &str) -> DetailState {
        self.page.set_overlay(true);
        self.page
            .set_html(ids::DETAIL_BODY, render::render_details_loading());
        self.set_state(DetailState::Loading { ip: ip.to_string() });

        let next = match self.upstream.db_details(ip).await {
            Ok(details) => {
                self.page
                    .set_html(ids::DETAIL_BODY, render::render_details(&details));
                match details.error {
                    Some(message) => DetailState::Errored {
                        ip: ip.to_string(),
                        message,
                    },
                    None => DetailState::Loaded { ip: ip.to_string() },
                }
            }
            Err(e) => {
                tracing::warn!(ip, error = %e, "Detail fetch failed");
                let message = format!("Failed to load: {}", e);
                self.page
                    .set_html(ids::DETAIL_BODY, render::render_details_error(&message));
                DetailState::Errored {
                    ip: ip.to_string(),
                    message,
                }
            }
        };

        self.set_state(next.clone());
        next
    }

    /// Hide the overlay. The last body stays in place until the next drilldown.
    pub fn close(&self) {
        self.page.set_overlay(false);
        self.set_state(DetailState::Idle);
    }
}
