//! Catalog of plugins compiled into the host

use std::collections::BTreeMap;

use parking_lot::RwLock;

/// Name and description of one compiled-in plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinPluginInfo {
    pub name: String,
    /// Human-readable description shown next to matching records
    pub description: String,
}

impl BuiltinPluginInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Registry of the plugins built into the host binary.
///
/// Always available, no failure mode; the host registers its compiled-in
/// set at startup and the catalog is read-only afterwards.
pub struct BuiltinCatalog {
    plugins: RwLock<BTreeMap<String, BuiltinPluginInfo>>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a compiled-in plugin
    pub fn register(&self, info: BuiltinPluginInfo) {
        self.plugins.write().insert(info.name.clone(), info);
    }

    /// Get a builtin by name
    pub fn get(&self, name: &str) -> Option<BuiltinPluginInfo> {
        self.plugins.read().get(name).cloned()
    }

    /// List all compiled-in plugins
    pub fn values(&self) -> Vec<BuiltinPluginInfo> {
        self.plugins.read().values().cloned().collect()
    }

    /// Snapshot keyed by name, the shape reconciliation consumes
    pub fn by_name(&self) -> BTreeMap<String, BuiltinPluginInfo> {
        self.plugins.read().clone()
    }

    pub fn count(&self) -> usize {
        self.plugins.read().len()
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(catalog.count(), 0);

        catalog.register(BuiltinPluginInfo::new("command-palette", "Quick command access"));
        catalog.register(BuiltinPluginInfo::new("spell-check", "Inline spell checking"));

        assert_eq!(catalog.count(), 2);
        assert_eq!(
            catalog.get("spell-check").map(|info| info.description),
            Some("Inline spell checking".to_string())
        );
        assert!(catalog.get("missing").is_none());

        let by_name = catalog.by_name();
        assert!(by_name.contains_key("command-palette"));
        assert_eq!(catalog.values().len(), 2);
    }

    #[test]
    fn re_registering_replaces_the_entry() {
        let catalog = BuiltinCatalog::new();
        catalog.register(BuiltinPluginInfo::new("spell-check", "Old description"));
        catalog.register(BuiltinPluginInfo::new("spell-check", "New description"));

        assert_eq!(catalog.count(), 1);
        assert_eq!(
            catalog.get("spell-check").map(|info| info.description),
            Some("New description".to_string())
        );
    }
}
