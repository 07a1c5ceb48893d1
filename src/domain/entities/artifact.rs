//! Staged artifact entity
//!
//! A downloaded deployment payload that has been durably written to local
//! staging and is waiting to be transferred to the remote store.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// A locally staged deployment artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    deployment_id: String,
    local_path: PathBuf,
    size: u64,
    hash: Option<ContentHash>,
}

impl StagedArtifact {
    pub fn new(deployment_id: impl Into<String>, local_path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            local_path: local_path.into(),
            size,
            hash: None,
        }
    }

    pub fn with_hash(mut self, hash: ContentHash) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn deployment_id(&self) -> &str {
        &self.deployment_id
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Size in bytes at staging time
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content hash, when the artifact was staged in this run
    ///
    /// Leftovers picked up from a previous run are not re-hashed.
    pub fn hash(&self) -> Option<&ContentHash> {
        self.hash.as_ref()
    }
}
