//! Session-scoped state for the plugin engine

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// State that outlives any single render of the registry but dies with
/// the session: the first-run flag, cached probe results, and the
/// cancellation token every update batch is tied to.
///
/// Owned by the host context that constructs the service; nothing here
/// is persisted.
pub struct SessionState {
    checked_for_updates: AtomicBool,
    latest_revisions: DashMap<String, String>,
    drift: DashMap<String, bool>,
    last_checked: Mutex<Option<DateTime<Utc>>>,
    cancel: CancellationToken,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            checked_for_updates: AtomicBool::new(false),
            latest_revisions: DashMap::new(),
            drift: DashMap::new(),
            last_checked: Mutex::new(None),
            cancel: CancellationToken::new(),
        }
    }

    /// First-run gate for the automatic update check. Returns true
    /// exactly once per session.
    pub fn begin_initial_check(&self) -> bool {
        !self.checked_for_updates.swap(true, Ordering::SeqCst)
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Tear down the session. In-flight probes settle, but their
    /// results are discarded instead of applied.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Record one settled probe in the session caches.
    pub fn note_probe(&self, name: &str, revision: Option<&str>, needs_update: bool) {
        if let Some(revision) = revision {
            self.latest_revisions
                .insert(name.to_string(), revision.to_string());
        }
        self.drift.insert(name.to_string(), needs_update);
    }

    pub fn latest_revision(&self, name: &str) -> Option<String> {
        self.latest_revisions.get(name).map(|entry| entry.clone())
    }

    pub fn needs_update(&self, name: &str) -> Option<bool> {
        self.drift.get(name).map(|entry| *entry)
    }

    pub fn mark_checked_now(&self) {
        *self.last_checked.lock() = Some(Utc::now());
    }

    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        *self.last_checked.lock()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
