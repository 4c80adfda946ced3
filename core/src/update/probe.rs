//! Upstream drift probes

use async_trait::async_trait;

use crate::error::CometResult;

/// Outcome of one successful upstream probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Whether a newer upstream revision exists
    pub needs_update: bool,
    /// Revision identifier the probe observed, when it could compute one
    pub current_revision: Option<String>,
}

/// One failed probe, kept for diagnostics. Never fatal for the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub plugin: String,
    pub reason: String,
}

/// Checks whether a locally installed plugin has drifted from its
/// upstream source.
///
/// Implementations must be safe to call concurrently for distinct
/// folders and must not retry internally; the coordinator issues
/// exactly one probe per record per batch.
#[async_trait]
pub trait SourceProbe: Send + Sync {
    async fn probe(&self, folder: &str) -> CometResult<ProbeOutcome>;
}
