//! Update-check coordination

pub mod coordinator;
pub mod probe;

pub use coordinator::{UpdateCoordinator, UpdateOutcome};
pub use probe::{ProbeFailure, ProbeOutcome, SourceProbe};
