//! Three-source registry merge

use std::collections::{BTreeMap, HashMap};

use crate::builtin::BuiltinPluginInfo;
use crate::registry::record::{Origin, PluginRecord, RecordState};
use crate::scan::ScannedPluginEntry;
use crate::store::StoredPluginMeta;

/// Merge stored metadata, scanned directories, and the builtin catalog
/// into one deduplicated record list.
///
/// Precedence: a stored record is authoritative over a bare directory
/// observation with the same name. Builtins only annotate records that
/// already exist. Output order is stable: stored entries first in store
/// order, then newly discovered scan entries in scan order.
pub fn reconcile(
    stored: &[StoredPluginMeta],
    scanned: &[ScannedPluginEntry],
    builtins: &BTreeMap<String, BuiltinPluginInfo>,
) -> Vec<PluginRecord> {
    let mut records: Vec<PluginRecord> = Vec::with_capacity(stored.len() + scanned.len());
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for meta in stored {
        if by_name.contains_key(&meta.name) {
            // Duplicate store entry; the first occurrence wins
            continue;
        }
        by_name.insert(meta.name.clone(), records.len());
        records.push(PluginRecord {
            name: meta.name.clone(),
            local_folder: meta.folder_name.clone(),
            origin: meta.origin,
            upstream_link: meta.upstream_link.clone(),
            revision: meta.revision.clone(),
            state: RecordState::Confirmed,
            needs_update: None,
        });
    }

    for entry in scanned {
        if by_name.contains_key(&entry.plugin_name) {
            continue;
        }
        by_name.insert(entry.plugin_name.clone(), records.len());
        records.push(PluginRecord {
            name: entry.plugin_name.clone(),
            local_folder: entry.folder_name.clone(),
            origin: Origin::LocalDirectory,
            upstream_link: None,
            revision: None,
            state: RecordState::Partial,
            needs_update: None,
        });
    }

    // A builtin with no installed record is not externally managed and
    // stays out of the registry.
    for info in builtins.values() {
        if let Some(&idx) = by_name.get(&info.name) {
            records[idx].describe(info.description.clone());
        }
    }

    records
}
