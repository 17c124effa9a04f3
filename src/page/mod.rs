//! In-memory model of the dashboard page.
//!
//! The page is the server-side stand-in for the browser DOM: a set of
//! containers keyed by element id (see [`ids`]) plus the view, refresh
//! indicator and overlay state. Each write fully replaces the target's
//! previous value and is broadcast to connected browsers as a
//! [`PageUpdate`]. Nothing is merged or diffed; the latest write wins.

pub mod ids;
pub mod types;

pub use types::{PageSnapshot, PageUpdate, PollOutcome};

use crate::render;
use crate::status::{DbTopology, ReplErrorReport, StatusSnapshot};
use crate::view::{ViewController, ViewState};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

/// Buffered updates per subscriber before a slow browser starts lagging.
const UPDATE_CHANNEL_CAPACITY: usize = 256;

pub struct Page {
    html: DashMap<String, String>,
    text: DashMap<String, String>,
    classes: DashMap<String, String>,
    view: RwLock<ViewController>,
    refreshes_in_flight: AtomicUsize,
    overlay_open: AtomicBool,
    last_poll: RwLock<Option<PollOutcome>>,
    updates: broadcast::Sender<PageUpdate>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            html: DashMap::new(),
            text: DashMap::new(),
            classes: DashMap::new(),
            view: RwLock::new(ViewController::new()),
            refreshes_in_flight: AtomicUsize::new(0),
            overlay_open: AtomicBool::new(false),
            last_poll: RwLock::new(None),
            updates,
        }
    }

    /// Receive every subsequent page mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<PageUpdate> {
        self.updates.subscribe()
    }

    fn publish(&self, update: PageUpdate) {
        // No receivers just means no browser is connected.
        let _ = self.updates.send(update);
    }

    pub fn set_html(&self, id: &str, html: String) {
        self.html.insert(id.to_string(), html.clone());
        self.publish(PageUpdate::Html {
            id: id.to_string(),
            html,
        });
    }

    pub fn set_text(&self, id: &str, text: String) {
        self.text.insert(id.to_string(), text.clone());
        self.publish(PageUpdate::Text {
            id: id.to_string(),
            text,
        });
    }

    pub fn set_class(&self, id: &str, class: &str) {
        self.classes.insert(id.to_string(), class.to_string());
        self.publish(PageUpdate::Class {
            id: id.to_string(),
            class: class.to_string(),
        });
    }

    pub fn html(&self, id: &str) -> Option<String> {
        self.html.get(id).map(|v| v.value().clone())
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.text.get(id).map(|v| v.value().clone())
    }

    pub fn class(&self, id: &str) -> Option<String> {
        self.classes.get(id).map(|v| v.value().clone())
    }

    /// Switch the visible panel and update the title label.
    pub fn switch_view(&self, name: &str) -> ViewState {
        let state = self
            .view
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .switch(name);
        self.set_text(ids::PAGE_TITLE, state.title.clone());
        self.publish(PageUpdate::View {
            state: state.clone(),
        });
        state
    }

    pub fn view_state(&self) -> ViewState {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    /// Mark a refresh as started. The indicator stays on until every started
    /// refresh has been ended.
    pub fn begin_refresh(&self) {
        if self.refreshes_in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.publish(PageUpdate::Refreshing { active: true });
        }
    }

    pub fn end_refresh(&self) {
        let previous = self
            .refreshes_in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .unwrap_or(0);
        if previous == 1 {
            self.publish(PageUpdate::Refreshing { active: false });
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshes_in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn set_overlay(&self, open: bool) {
        self.overlay_open.store(open, Ordering::SeqCst);
        self.publish(PageUpdate::Overlay { open });
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open.load(Ordering::SeqCst)
    }

    pub fn record_poll(&self, outcome: PollOutcome) {
        *self
            .last_poll
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(outcome);
    }

    pub fn last_poll(&self) -> Option<PollOutcome> {
        self.last_poll
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Render every snapshot-driven container: timestamp, overview, inference grid, server table.
    pub fn render_snapshot(&self, snapshot: &StatusSnapshot) {
        self.set_text(ids::LAST_UPDATE, format!("Updated: {}", snapshot.time));

        let overview = render::render_overview(snapshot);
        self.set_text(ids::STAT_INFERENCE, overview.inference_count.to_string());
        self.set_text(ids::STAT_SERVERS, overview.server_count.to_string());
        self.set_text(ids::STAT_ALERTS, overview.alert_count.to_string());
        self.set_class(ids::STAT_ALERTS, overview.alert_count_class);
        self.set_html(ids::OVERVIEW_ALERTS, overview.alerts_html);

        self.set_html(
            ids::INFERENCE_GRID,
            render::render_inference_grid(&snapshot.inference),
        );
        self.set_text(
            ids::INFERENCE_COUNT_BADGE,
            snapshot.inference.len().to_string(),
        );

        self.set_html(
            ids::SERVER_TBODY,
            render::render_server_rows(&snapshot.servers),
        );
    }

    pub fn render_repl_errors(&self, report: &ReplErrorReport, hours: u32) {
        self.set_html(ids::REPL_ERRORS, render::render_repl_errors(report, hours));
    }

    pub fn render_topology(&self, topology: &DbTopology) {
        self.set_html(ids::DB_MASTER, render::render_master(&topology.master));
        self.set_html(ids::DB_SLAVES, render::render_slaves(&topology.slaves));
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let collect = |map: &DashMap<String, String>| -> BTreeMap<String, String> {
            map.iter()
                .map(|e| (e.key().clone(), e.value().clone()))
                .collect()
        };
        let view = self.view.read().unwrap_or_else(PoisonError::into_inner);

        PageSnapshot {
            html: collect(&self.html),
            text: collect(&self.text),
            classes: collect(&self.classes),
            view: view.state(),
            panels: view.panel_visibility().into_iter().collect(),
            refreshing: self.is_refreshing(),
            overlay_open: self.is_overlay_open(),
            last_poll: self.last_poll(),
        }
    }
}
