//! The merged plugin registry: record model, reconciliation, and the
//! published record list.

pub mod reconcile;
pub mod record;

pub use reconcile::reconcile;
pub use record::{Origin, PluginRecord, RecordState};

use parking_lot::RwLock;

/// The currently published record list.
///
/// Readers always observe a complete list; a reconciliation or update
/// pass lands as one swap, never as a sequence of in-place edits.
#[derive(Default)]
pub struct RegistryHandle {
    records: RwLock<Vec<PluginRecord>>,
}

impl RegistryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<PluginRecord> {
        self.records.read().clone()
    }

    pub fn replace(&self, records: Vec<PluginRecord>) {
        *self.records.write() = records;
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[cfg(test)]
mod tests;
