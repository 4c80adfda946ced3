//! JSON-file metadata store

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CometError, CometResult};
use crate::store::{MetadataStore, StoredPluginMeta};

/// Metadata store backed by a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetadataStore for JsonFileStore {
    async fn get(&self) -> CometResult<Option<Vec<StoredPluginMeta>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CometError::Store(format!("{}: {e}", self.path.display())))?;

        let entries: Vec<StoredPluginMeta> = serde_json::from_str(&raw)
            .map_err(|e| CometError::Store(format!("{}: {e}", self.path.display())))?;

        debug!(count = entries.len(), path = %self.path.display(), "Read stored plugin metadata");
        Ok(Some(entries))
    }
}
