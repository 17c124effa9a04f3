//! Type definitions for page state and the updates pushed to browsers

use crate::view::ViewState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One mutation of the page, pushed over the WebSocket as it happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageUpdate {
    /// Replace an element's inner HTML
    Html { id: String, html: String },
    /// Replace an element's text content
    Text { id: String, text: String },
    /// Replace an element's class list
    Class { id: String, class: String },
    /// Active view changed
    View { state: ViewState },
    /// Refresh indicator toggled
    Refreshing { active: bool },
    /// Detail overlay opened or closed
    Overlay { open: bool },
}

/// Outcome of the most recent poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOutcome {
    pub finished_at: DateTime<Utc>,
    pub snapshot_ok: bool,
    pub repl_errors_ok: bool,
}

/// Full page state, for first paint and `GET /fragments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub html: BTreeMap<String, String>,
    pub text: BTreeMap<String, String>,
    pub classes: BTreeMap<String, String>,
    pub view: ViewState,
    pub panels: BTreeMap<String, bool>,
    pub refreshing: bool,
    pub overlay_open: bool,
    pub last_poll: Option<PollOutcome>,
}
