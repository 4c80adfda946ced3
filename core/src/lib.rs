//! Comet plugin engine
//!
//! Reconciles three sources of truth about installed plugins (stored
//! metadata, a live plugins-directory scan, and the set compiled into
//! the host) into one registry, then checks remote-linked plugins for
//! upstream drift without blocking the caller.

pub mod builtin;
pub mod error;
pub mod registry;
pub mod scan;
pub mod service;
pub mod session;
pub mod status;
pub mod store;
pub mod update;

#[cfg(test)]
mod test_support;

pub use error::{CometError, CometResult};
pub use registry::{Origin, PluginRecord, RecordState, RegistryHandle};
pub use service::PluginService;
pub use status::{NullSink, StatusSink};

use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for host state
    pub data_dir: String,
    /// Directory holding installed plugin folders
    pub plugins_dir: String,
    /// Metadata store file, relative to `data_dir` unless absolute
    pub store_file: String,
    /// Cap on concurrently running update probes
    pub max_concurrent_probes: usize,
    /// Run the automatic update check on the first load of a session
    pub initial_update_check: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./comet_data".to_string(),
            plugins_dir: "./comet_data/plugins".to_string(),
            store_file: "plugins.json".to_string(),
            max_concurrent_probes: 8,
            initial_update_check: true,
        }
    }
}

impl Config {
    pub fn plugins_path(&self) -> PathBuf {
        PathBuf::from(&self.plugins_dir)
    }

    pub fn store_path(&self) -> PathBuf {
        let file = PathBuf::from(&self.store_file);
        if file.is_absolute() {
            file
        } else {
            PathBuf::from(&self.data_dir).join(file)
        }
    }
}
