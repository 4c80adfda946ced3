use pretty_assertions::assert_eq;

use crate::registry::record::{Origin, PluginRecord, RecordState};
use crate::registry::RegistryHandle;

fn record(name: &str) -> PluginRecord {
    PluginRecord {
        name: name.to_string(),
        local_folder: format!("{name}-dir"),
        origin: Origin::LocalDirectory,
        upstream_link: None,
        revision: None,
        state: RecordState::Partial,
        needs_update: None,
    }
}

#[test]
fn replace_swaps_the_whole_list() {
    let handle = RegistryHandle::new();
    assert!(handle.is_empty());

    handle.replace(vec![record("A"), record("B")]);
    assert_eq!(handle.len(), 2);

    handle.replace(vec![record("C")]);
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "C");
}

#[test]
fn snapshots_are_detached_from_later_replacements() {
    let handle = RegistryHandle::new();
    handle.replace(vec![record("A")]);

    let before = handle.snapshot();
    handle.replace(Vec::new());

    assert_eq!(before.len(), 1);
    assert!(handle.is_empty());
}
