//! Unified plugin records

use serde::{Deserialize, Serialize};

/// How a plugin arrived on the system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Built into the host binary
    Compiled,
    /// Installed from a remote repository link
    RemoteLink,
    /// A bare directory dropped into the plugins folder
    LocalDirectory,
    #[default]
    Unknown,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Compiled => write!(f, "compiled"),
            Origin::RemoteLink => write!(f, "remote link"),
            Origin::LocalDirectory => write!(f, "local directory"),
            Origin::Unknown => write!(f, "unknown"),
        }
    }
}

/// How far a record has been cross-referenced against the other sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordState {
    /// Known only from a directory scan
    Partial,
    /// Seeded from stored metadata, description pending
    Confirmed,
    /// Matched against the builtin catalog
    Described(String),
}

/// The unified description of one plugin after merge.
///
/// Records are rebuilt on every reconciliation pass; the only identity
/// that survives across passes is `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRecord {
    /// Unique key across the whole registry
    pub name: String,
    /// Directory identifier under the plugins root
    pub local_folder: String,
    pub origin: Origin,
    /// Present only for `Origin::RemoteLink`
    pub upstream_link: Option<String>,
    /// Last known revision identifier; absent until a probe succeeds
    pub revision: Option<String>,
    pub state: RecordState,
    /// `None` until a probe completes for this record
    pub needs_update: Option<bool>,
}

impl PluginRecord {
    pub fn is_partial(&self) -> bool {
        matches!(self.state, RecordState::Partial)
    }

    pub fn description(&self) -> Option<&str> {
        match &self.state {
            RecordState::Described(description) => Some(description),
            _ => None,
        }
    }

    /// Attach the description from the builtin catalog. Clearing the
    /// partial flag and setting the description is one transition.
    pub fn describe(&mut self, description: impl Into<String>) {
        self.state = RecordState::Described(description.into());
    }

    /// Only remote-linked records are eligible for upstream probing.
    pub fn is_probe_candidate(&self) -> bool {
        self.origin == Origin::RemoteLink
    }
}
