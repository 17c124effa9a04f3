//! Scriptable in-process [`Upstream`] for unit tests.
//!
//! Each endpoint returns its configured result. Snapshot and topology calls
//! can also be queued with a delay, which lets tests hold a request open
//! under `tokio::time::pause` and overlap it with another one.

use super::{FetchError, Upstream};
use crate::status::{DbDetails, DbTopology, ReplErrorReport, StatusSnapshot};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type Scripted<T> = Mutex<VecDeque<(Duration, Result<T, FetchError>)>>;

/// Returns whatever result was last configured for each endpoint.
pub struct FakeUpstream {
    pub snapshot: Mutex<Result<StatusSnapshot, FetchError>>,
    pub repl_errors: Mutex<Result<ReplErrorReport, FetchError>>,
    pub topology: Mutex<Result<DbTopology, FetchError>>,
    pub details: Mutex<Result<DbDetails, FetchError>>,
    pub snapshot_script: Scripted<StatusSnapshot>,
    pub topology_script: Scripted<DbTopology>,
    pub snapshot_calls: AtomicUsize,
    pub topology_calls: AtomicUsize,
    pub last_hours: AtomicUsize,
    pub last_details_ip: Mutex<Option<String>>,
}

impl Default for FakeUpstream {
    fn default() -> Self {
        Self {
            snapshot: Mutex::new(Ok(StatusSnapshot::default())),
            repl_errors: Mutex::new(Ok(ReplErrorReport::default())),
            topology: Mutex::new(Ok(DbTopology::default())),
            details: Mutex::new(Ok(DbDetails::default())),
            snapshot_script: Mutex::new(VecDeque::new()),
            topology_script: Mutex::new(VecDeque::new()),
            snapshot_calls: AtomicUsize::new(0),
            topology_calls: AtomicUsize::new(0),
            last_hours: AtomicUsize::new(0),
            last_details_ip: Mutex::new(None),
        }
    }
}

impl FakeUpstream {
    pub fn set_snapshot(&self, result: Result<StatusSnapshot, FetchError>) {
        *self.snapshot.lock().unwrap() = result;
    }

    pub fn set_repl_errors(&self, result: Result<ReplErrorReport, FetchError>) {
        *self.repl_errors.lock().unwrap() = result;
    }

    pub fn set_topology(&self, result: Result<DbTopology, FetchError>) {
        *self.topology.lock().unwrap() = result;
    }

    pub fn set_details(&self, result: Result<DbDetails, FetchError>) {
        *self.details.lock().unwrap() = result;
    }

    /// Queue a snapshot response that resolves after `delay`.
    pub fn push_snapshot(&self, delay: Duration, result: Result<StatusSnapshot, FetchError>) {
        self.snapshot_script.lock().unwrap().push_back((delay, result));
    }

    /// Queue a topology response that resolves after `delay`.
    pub fn push_topology(&self, delay: Duration, result: Result<DbTopology, FetchError>) {
        self.topology_script.lock().unwrap().push_back((delay, result));
    }
}

async fn next_scripted<T: Clone>(
    script: &Scripted<T>,
    fallback: &Mutex<Result<T, FetchError>>,
) -> Result<T, FetchError> {
    let next = script.lock().unwrap().pop_front();
    match next {
        Some((delay, result)) => {
            tokio::time::sleep(delay).await;
            result
        }
        None => {
            let result = fallback.lock().unwrap().clone();
            result
        }
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn status_snapshot(&self) -> Result<StatusSnapshot, FetchError> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        next_scripted(&self.snapshot_script, &self.snapshot).await
    }

    async fn repl_errors(&self, hours: u32) -> Result<ReplErrorReport, FetchError> {
        self.last_hours.store(hours as usize, Ordering::SeqCst);
        self.repl_errors.lock().unwrap().clone()
    }

    async fn check_db(&self) -> Result<DbTopology, FetchError> {
        self.topology_calls.fetch_add(1, Ordering::SeqCst);
        next_scripted(&self.topology_script, &self.topology).await
    }

    async fn db_details(&self, ip: &str) -> Result<DbDetails, FetchError> {
        *self.last_details_ip.lock().unwrap() = Some(ip.to_string());
        self.details.lock().unwrap().clone()
    }
}
