//! Concurrent update-check batches
//!
//! One batch fans out one probe per remote-linked record, waits for
//! every probe to settle, and folds the outcomes back into the record
//! list. Individual probe failures never abort the batch.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::{CometError, CometResult};
use crate::registry::PluginRecord;
use crate::session::SessionState;
use crate::status::StatusSink;
use crate::store::MetadataStore;
use crate::update::probe::{ProbeFailure, ProbeOutcome, SourceProbe};

/// Result of one settled update batch
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// The record list with fresh probe results folded in
    pub records: Vec<PluginRecord>,
    /// OR over all final `needs_update` values
    pub any_needs_update: bool,
    /// Per-plugin probe failures collected for diagnostics
    pub failures: Vec<ProbeFailure>,
}

/// Fans probes out over the remote-linked records of a registry
/// snapshot and aggregates once everything has settled.
pub struct UpdateCoordinator {
    store: Arc<dyn MetadataStore>,
    probe: Arc<dyn SourceProbe>,
    session: Arc<SessionState>,
    probe_permits: Arc<Semaphore>,
}

impl UpdateCoordinator {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        probe: Arc<dyn SourceProbe>,
        session: Arc<SessionState>,
        max_concurrent_probes: usize,
    ) -> Self {
        Self {
            store,
            probe,
            session,
            probe_permits: Arc::new(Semaphore::new(max_concurrent_probes.max(1))),
        }
    }

    /// Run one update batch over `records`.
    ///
    /// Returns `Ok(None)` when the session was torn down while the
    /// batch was in flight: results are discarded and nothing is
    /// mutated. Probe failures are contained per record; only an
    /// unreadable metadata store fails the whole batch. The loading
    /// signal is cleared on every exit path.
    pub async fn check_updates(
        &self,
        records: Vec<PluginRecord>,
        sink: &dyn StatusSink,
    ) -> CometResult<Option<UpdateOutcome>> {
        sink.loading_changed(true, Some("Checking for updates..."));
        let result = self.run_batch(records).await;
        sink.loading_changed(false, None);

        if let Ok(Some(outcome)) = &result {
            sink.update_check(outcome.any_needs_update, Some(false));
        }

        result
    }

    async fn run_batch(
        &self,
        mut records: Vec<PluginRecord>,
    ) -> CometResult<Option<UpdateOutcome>> {
        let batch_id = Uuid::new_v4();
        let token = self.session.cancellation_token();

        let candidates: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_probe_candidate())
            .map(|(idx, _)| idx)
            .collect();

        // One store snapshot per batch; a plugin's folder may have been
        // renamed since the records were reconciled. Skipped entirely
        // when nothing is probeable.
        let snapshot = if candidates.is_empty() {
            Vec::new()
        } else {
            self.store.get().await?.unwrap_or_default()
        };

        let mut tasks: JoinSet<(usize, CometResult<ProbeOutcome>)> = JoinSet::new();

        for idx in candidates {
            let record = &records[idx];
            let folder = snapshot
                .iter()
                .find(|meta| meta.name == record.name)
                .map(|meta| meta.folder_name.clone())
                .unwrap_or_else(|| record.local_folder.clone());

            let probe = Arc::clone(&self.probe);
            let permits = Arc::clone(&self.probe_permits);
            tasks.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return (idx, Err(CometError::Internal(e.to_string()))),
                };
                (idx, probe.probe(&folder).await)
            });
        }

        let spawned = tasks.len();
        debug!(batch = %batch_id, probes = spawned, "Update batch started");

        // Wait for every probe to settle; never fail fast.
        let mut results: Vec<(usize, CometResult<ProbeOutcome>)> = Vec::with_capacity(spawned);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(settled) => results.push(settled),
                Err(e) => {
                    // A panicked probe task is contained like any other
                    // per-probe failure
                    error!(batch = %batch_id, error = %e, "Probe task aborted");
                }
            }
        }

        if token.is_cancelled() {
            info!(batch = %batch_id, "Session torn down; discarding update batch");
            return Ok(None);
        }

        let mut failures = Vec::new();
        for (idx, result) in results {
            let record = &mut records[idx];
            match result {
                Ok(outcome) => {
                    record.needs_update = Some(outcome.needs_update);
                    record.revision = outcome.current_revision.clone();
                    self.session.note_probe(
                        &record.name,
                        outcome.current_revision.as_deref(),
                        outcome.needs_update,
                    );
                }
                Err(e) => {
                    error!(plugin = %record.name, error = %e, "Failed to check updates");
                    failures.push(ProbeFailure {
                        plugin: record.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let any_needs_update = records.iter().any(|r| r.needs_update == Some(true));
        self.session.mark_checked_now();

        info!(
            batch = %batch_id,
            probes = spawned,
            failures = failures.len(),
            any_needs_update,
            "Update batch settled"
        );

        Ok(Some(UpdateOutcome {
            records,
            any_needs_update,
            failures,
        }))
    }
}
