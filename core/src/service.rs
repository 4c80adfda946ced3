//! Plugin service
//!
//! Owns the reconciliation inputs, the published registry, and the
//! update coordinator for one host session.

use std::sync::Arc;

use tracing::{info, warn};

use crate::Config;
use crate::builtin::BuiltinCatalog;
use crate::error::CometResult;
use crate::registry::{PluginRecord, RegistryHandle, reconcile};
use crate::scan::PluginScanner;
use crate::session::SessionState;
use crate::status::StatusSink;
use crate::store::MetadataStore;
use crate::update::{SourceProbe, UpdateCoordinator};

pub struct PluginService {
    store: Arc<dyn MetadataStore>,
    scanner: Arc<dyn PluginScanner>,
    builtins: Arc<BuiltinCatalog>,
    registry: Arc<RegistryHandle>,
    session: Arc<SessionState>,
    coordinator: UpdateCoordinator,
    initial_update_check: bool,
}

impl PluginService {
    pub fn new(
        config: &Config,
        store: Arc<dyn MetadataStore>,
        scanner: Arc<dyn PluginScanner>,
        builtins: Arc<BuiltinCatalog>,
        probe: Arc<dyn SourceProbe>,
    ) -> Self {
        let session = Arc::new(SessionState::new());
        let coordinator = UpdateCoordinator::new(
            Arc::clone(&store),
            probe,
            Arc::clone(&session),
            config.max_concurrent_probes,
        );

        Self {
            store,
            scanner,
            builtins,
            registry: Arc::new(RegistryHandle::new()),
            session,
            coordinator,
            initial_update_check: config.initial_update_check,
        }
    }

    /// The published registry; readers observe whole lists only.
    pub fn registry(&self) -> Arc<RegistryHandle> {
        Arc::clone(&self.registry)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Rebuild the merged registry from stored metadata, a live scan,
    /// and the builtin catalog, then publish it.
    ///
    /// The first successful load of a session also runs one update
    /// check; later loads only re-reconcile. A failed scan aborts the
    /// pass and leaves the previously published registry as it was.
    pub async fn load(&self, sink: &dyn StatusSink) -> CometResult<Vec<PluginRecord>> {
        sink.loading_changed(true, Some("Loading plugins..."));
        let result = self.load_inner(sink).await;
        sink.loading_changed(false, None);
        result
    }

    async fn load_inner(&self, sink: &dyn StatusSink) -> CometResult<Vec<PluginRecord>> {
        let scanned = self.scanner.list().await?;

        let stored = match self.store.get().await {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                // The registry can still be built from scan + builtins
                warn!(error = %e, "Metadata store unreadable; treating as empty");
                Vec::new()
            }
        };

        let records = reconcile(&stored, &scanned, &self.builtins.by_name());
        info!(
            stored = stored.len(),
            scanned = scanned.len(),
            merged = records.len(),
            "Reconciled plugin registry"
        );

        self.registry.replace(records.clone());

        if self.initial_update_check && self.session.begin_initial_check() {
            if let Some(outcome) = self.coordinator.check_updates(records, sink).await? {
                self.registry.replace(outcome.records.clone());
                return Ok(outcome.records);
            }
            // Session torn down mid-batch; the pre-check list stands
            return Ok(self.registry.snapshot());
        }

        Ok(records)
    }

    /// Explicit re-run of the update check over the current registry.
    /// Returns whether any plugin reported drift.
    pub async fn check_for_updates(&self, sink: &dyn StatusSink) -> CometResult<bool> {
        let records = self.registry.snapshot();
        match self.coordinator.check_updates(records, sink).await? {
            Some(outcome) => {
                self.registry.replace(outcome.records);
                Ok(outcome.any_needs_update)
            }
            None => Ok(false),
        }
    }

    /// Tear down the session. In-flight probes settle; their results
    /// are dropped instead of applied.
    pub fn shutdown(&self) {
        self.session.cancel();
    }
}
