//! Persisted plugin metadata

pub mod json;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CometResult;
use crate::registry::Origin;

pub use json::JsonFileStore;

/// Last-known metadata for a previously installed plugin.
///
/// The persisted layout uses camelCase keys; entries written before the
/// origin field existed deserialize with `Origin::Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPluginMeta {
    pub name: String,
    pub folder_name: String,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

/// Durable name-to-metadata mapping, read at startup.
///
/// The engine never writes it; installation flows own the write side.
/// `Ok(None)` means nothing has been persisted yet and is not an error.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn get(&self) -> CometResult<Option<Vec<StoredPluginMeta>>>;
}
