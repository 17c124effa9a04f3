//! View switching for the dashboard panels.
//!
//! Exactly one of a fixed set of panels is visible at a time. Switching to a
//! name outside that set only changes the title (to [`FALLBACK_TITLE`]) and
//! the recorded current name; panel visibility and menu highlight are left
//! as they were.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used for any view name outside the closed table.
pub const FALLBACK_TITLE: &str = "Monitoring Dashboard";

/// View shown when the page first loads.
pub const DEFAULT_VIEW: &str = "overview";

/// The fixed set of dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Overview,
    Inference,
    Database,
    Servers,
}

impl View {
    pub const ALL: [View; 4] = [View::Overview, View::Inference, View::Database, View::Servers];

    /// Look up a registered view by name (case-sensitive).
    pub fn from_name(name: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Inference => "inference",
            View::Database => "database",
            View::Servers => "servers",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Overview => "System Overview",
            View::Inference => "Inference Cluster (SGLang)",
            View::Database => "Database Topology (MySQL)",
            View::Servers => "Physical Nodes (Zabbix)",
        }
    }

    /// DOM id of the panel container.
    pub fn panel_id(self) -> String {
        format!("view-{}", self.name())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a switch, as reported to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Last requested name, registered or not
    pub current: String,
    /// Panel currently shown (also the highlighted menu entry)
    pub visible: Option<View>,
    pub title: String,
}

/// Tracks the current view. Last call wins; there are no transition rules.
#[derive(Debug, Clone)]
pub struct ViewController {
    current: String,
    visible: Option<View>,
    title: String,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    /// Nothing visible yet; call [`switch`](Self::switch) with [`DEFAULT_VIEW`] at startup.
    pub fn new() -> Self {
        Self {
            current: String::new(),
            visible: None,
            title: FALLBACK_TITLE.to_string(),
        }
    }

    pub fn switch(&mut self, name: &str) -> ViewState {
        tracing::debug!(view = name, "Switching view");
        self.current = name.to_string();

        match View::from_name(name) {
            Some(view) => {
                self.visible = Some(view);
                self.title = view.title().to_string();
            }
            None => {
                self.title = FALLBACK_TITLE.to_string();
            }
        }

        self.state()
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            current: self.current.clone(),
            visible: self.visible,
            title: self.title.clone(),
        }
    }

    pub fn visible(&self) -> Option<View> {
        self.visible
    }

    /// `(panel id, shown)` for every registered panel.
    pub fn panel_visibility(&self) -> Vec<(String, bool)> {
        View::ALL
            .into_iter()
            .map(|v| (v.panel_id(), self.visible == Some(v)))
            .collect()
    }
}
