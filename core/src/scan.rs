//! Filesystem discovery of installed plugin directories

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CometError, CometResult};

/// A plugin directory found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedPluginEntry {
    /// Name the plugin declares in its manifest
    pub plugin_name: String,
    /// Directory name under the plugins root
    pub folder_name: String,
}

/// Source of "which plugin directories exist right now".
///
/// A failure here aborts the whole reconciliation pass; no registry can
/// be built without the live listing.
#[async_trait]
pub trait PluginScanner: Send + Sync {
    async fn list(&self) -> CometResult<Vec<ScannedPluginEntry>>;
}

/// The manifest every installed plugin directory carries
#[derive(Debug, Deserialize)]
struct PluginManifest {
    name: String,
}

/// Scans the immediate subdirectories of the plugins root for plugin
/// manifests.
pub struct DirectoryScanner {
    plugins_dir: PathBuf,
}

impl DirectoryScanner {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
        }
    }

    fn read_manifest(dir: &Path) -> CometResult<PluginManifest> {
        let manifest_path = dir.join("plugin.json");
        let raw = std::fs::read_to_string(&manifest_path)?;
        serde_json::from_str(&raw)
            .map_err(|e| CometError::Serialization(format!("{}: {e}", manifest_path.display())))
    }
}

#[async_trait]
impl PluginScanner for DirectoryScanner {
    async fn list(&self) -> CometResult<Vec<ScannedPluginEntry>> {
        if !self.plugins_dir.exists() {
            // Fresh install; nothing on disk yet
            return Ok(Vec::new());
        }

        let mut dir = tokio::fs::read_dir(&self.plugins_dir)
            .await
            .map_err(|e| CometError::Scan(format!("{}: {e}", self.plugins_dir.display())))?;

        let mut entries = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| CometError::Scan(format!("{}: {e}", self.plugins_dir.display())))?
        {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let folder_name = entry.file_name().to_string_lossy().into_owned();
            match Self::read_manifest(&path) {
                Ok(manifest) => {
                    debug!(plugin = %manifest.name, folder = %folder_name, "Found plugin directory");
                    entries.push(ScannedPluginEntry {
                        plugin_name: manifest.name,
                        folder_name,
                    });
                }
                Err(e) => {
                    warn!(folder = %folder_name, error = %e, "Skipping plugin directory without a readable manifest");
                }
            }
        }

        // Directory iteration order is OS-dependent
        entries.sort_by(|a, b| a.folder_name.cmp(&b.folder_name));

        Ok(entries)
    }
}
