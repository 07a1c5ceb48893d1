//! Common test utilities for scenario tests.
//!
//! This module provides:
//! - `ScriptedSource`: in-memory deployment catalog with switchable outage
//! - `FlakySink`: in-memory file store that can fail N times per path
//! - `Workspace`: temp state dir with a real JSON ledger and staging dir

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use tempfile::TempDir;

use deployment_sync::domain::entities::DeploymentSummary;
use deployment_sync::domain::ports::{
    ArtifactSink, DeploymentSource, SinkError, SinkResult, SourceError, SourceResult,
};
use deployment_sync::infrastructure::{JsonLedgerRepository, LocalStaging};
use deployment_sync::{RemoteNaming, SyncUseCase};

pub const REMOTE_DIR: &str = "/SAPRI Deployment Data";

/// Catalog and payloads served from memory
#[derive(Default)]
pub struct ScriptedSource {
    catalog: RefCell<Vec<DeploymentSummary>>,
    down: Cell<bool>,
    fetches: RefCell<Vec<String>>,
}

impl ScriptedSource {
    pub fn with_catalog(entries: &[(&str, i64)]) -> Self {
        let source = Self::default();
        source.publish(entries);
        source
    }

    /// Replace the whole catalog
    pub fn publish(&self, entries: &[(&str, i64)]) {
        *self.catalog.borrow_mut() = entries
            .iter()
            .map(|(id, freshness)| DeploymentSummary::new(*id, *freshness))
            .collect();
    }

    pub fn set_down(&self, down: bool) {
        self.down.set(down);
    }

    pub fn fetch_count(&self, id: &str) -> usize {
        self.fetches.borrow().iter().filter(|f| *f == id).count()
    }

    pub fn payload(id: &str) -> Vec<u8> {
        format!("PK archive for {}", id).into_bytes()
    }
}

impl DeploymentSource for ScriptedSource {
    fn list_deployments(&self) -> SourceResult<Vec<DeploymentSummary>> {
        if self.down.get() {
            return Err(SourceError::Transport("connection refused".into()));
        }
        Ok(self.catalog.borrow().clone())
    }

    fn fetch_artifact(&self, deployment_id: &str) -> SourceResult<Vec<u8>> {
        self.fetches.borrow_mut().push(deployment_id.to_string());
        if self.down.get() {
            return Err(SourceError::Transport("connection refused".into()));
        }
        Ok(Self::payload(deployment_id))
    }
}

/// File store that records uploads and can be told to fail
#[derive(Default)]
pub struct FlakySink {
    down: Cell<bool>,
    failures_left: RefCell<HashMap<String, u32>>,
    stored: RefCell<BTreeMap<String, Vec<u8>>>,
    attempts: Cell<usize>,
}

impl FlakySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&self, down: bool) {
        self.down.set(down);
    }

    /// Reject the next `times` uploads to `remote_path`
    pub fn fail_times(&self, remote_path: &str, times: u32) {
        self.failures_left
            .borrow_mut()
            .insert(remote_path.to_string(), times);
    }

    pub fn stored(&self) -> BTreeMap<String, Vec<u8>> {
        self.stored.borrow().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl ArtifactSink for FlakySink {
    fn store(&self, remote_path: &str, bytes: &[u8]) -> SinkResult<()> {
        self.attempts.set(self.attempts.get() + 1);
        if self.down.get() {
            return Err(SinkError::Rejected {
                status: 503,
                body: "Service Unavailable".into(),
            });
        }
        if let Some(left) = self.failures_left.borrow_mut().get_mut(remote_path) {
            if *left > 0 {
                *left -= 1;
                return Err(SinkError::Transport("connection reset by peer".into()));
            }
        }
        self.stored
            .borrow_mut()
            .insert(remote_path.to_string(), bytes.to_vec());
        Ok(())
    }
}

pub type ScenarioUseCase<'a> =
    SyncUseCase<&'a ScriptedSource, &'a FlakySink, JsonLedgerRepository, LocalStaging>;

/// Isolated state directory shared by consecutive runs
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.path().join("deployment_info.json")
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn staged_file(&self, id: &str) -> PathBuf {
        self.staging_dir().join(format!("{}.zip", id))
    }

    pub fn ledger_json(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.ledger_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// A fresh use case over the same on-disk state, like a new process would build
    pub fn use_case<'a>(&self, source: &'a ScriptedSource, sink: &'a FlakySink) -> ScenarioUseCase<'a> {
        SyncUseCase::new(
            source,
            sink,
            JsonLedgerRepository::new(self.ledger_path()),
            LocalStaging::new(self.staging_dir(), "zip"),
            RemoteNaming::new(REMOTE_DIR, "zip"),
        )
    }
}

pub fn remote(id: &str) -> String {
    format!("{}/{}.zip", REMOTE_DIR, id)
}
