//! Scripted collaborator fakes shared by the engine tests

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{CometError, CometResult};
use crate::scan::{PluginScanner, ScannedPluginEntry};
use crate::status::StatusSink;
use crate::store::{MetadataStore, StoredPluginMeta};
use crate::update::probe::{ProbeOutcome, SourceProbe};

#[derive(Debug, Clone)]
pub enum ProbeScript {
    Succeed {
        needs_update: bool,
        revision: Option<&'static str>,
    },
    Fail(&'static str),
}

/// Probe that answers from a per-folder script and records every call
pub struct ScriptedProbe {
    scripts: Mutex<HashMap<String, ProbeScript>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(self, folder: &str, script: ProbeScript) -> Self {
        self.script(folder, script);
        self
    }

    pub fn script(&self, folder: &str, script: ProbeScript) {
        self.scripts.lock().insert(folder.to_string(), script);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl SourceProbe for ScriptedProbe {
    async fn probe(&self, folder: &str) -> CometResult<ProbeOutcome> {
        self.calls.lock().push(folder.to_string());
        let script = self.scripts.lock().get(folder).cloned();
        match script {
            Some(ProbeScript::Succeed {
                needs_update,
                revision,
            }) => Ok(ProbeOutcome {
                needs_update,
                current_revision: revision.map(String::from),
            }),
            Some(ProbeScript::Fail(reason)) => Err(CometError::Probe(reason.to_string())),
            None => Err(CometError::Probe(format!("no script for folder {folder}"))),
        }
    }
}

pub enum StoreScript {
    Entries(Vec<StoredPluginMeta>),
    Empty,
    Unreadable,
}

pub struct ScriptedStore {
    script: Mutex<StoreScript>,
}

impl ScriptedStore {
    pub fn new(script: StoreScript) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }

    pub fn set(&self, script: StoreScript) {
        *self.script.lock() = script;
    }
}

#[async_trait]
impl MetadataStore for ScriptedStore {
    async fn get(&self) -> CometResult<Option<Vec<StoredPluginMeta>>> {
        match &*self.script.lock() {
            StoreScript::Entries(entries) => Ok(Some(entries.clone())),
            StoreScript::Empty => Ok(None),
            StoreScript::Unreadable => Err(CometError::Store("scripted store failure".to_string())),
        }
    }
}

pub enum ScanScript {
    Entries(Vec<ScannedPluginEntry>),
    Fail,
}

pub struct ScriptedScanner {
    script: Mutex<ScanScript>,
}

impl ScriptedScanner {
    pub fn new(script: ScanScript) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }

    pub fn set(&self, script: ScanScript) {
        *self.script.lock() = script;
    }
}

#[async_trait]
impl PluginScanner for ScriptedScanner {
    async fn list(&self) -> CometResult<Vec<ScannedPluginEntry>> {
        match &*self.script.lock() {
            ScanScript::Entries(entries) => Ok(entries.clone()),
            ScanScript::Fail => Err(CometError::Scan("scripted scan failure".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Loading(bool, Option<String>),
    UpdateCheck(bool, Option<bool>),
}

/// Sink that records every signal for later assertions
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }
}

impl StatusSink for RecordingSink {
    fn loading_changed(&self, loading: bool, label: Option<&str>) {
        self.events
            .lock()
            .push(SinkEvent::Loading(loading, label.map(String::from)));
    }

    fn update_check(&self, has_updates: bool, checking: Option<bool>) {
        self.events
            .lock()
            .push(SinkEvent::UpdateCheck(has_updates, checking));
    }
}
