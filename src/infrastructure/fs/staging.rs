//! Local Staging Directory
//!
//! Implements the StagingArea port on a plain directory: one file per
//! deployment, named `<id>.<ext>`.

use std::path::{Path, PathBuf};

use crate::domain::entities::StagedArtifact;
use crate::domain::ports::{StagingArea, StagingError, StagingResult};
use crate::domain::value_objects::ContentHash;

use super::atomic::atomic_write;

/// Directory-backed staging area
#[derive(Debug, Clone)]
pub struct LocalStaging {
    dir: PathBuf,
    extension: String,
}

impl LocalStaging {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Id encoded in a staged file name, if the name is one of ours
    fn id_from_path(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        validate_id(stem).ok()?;
        Some(stem.to_string())
    }
}

/// Reject ids that would escape the staging directory or hide the file
fn validate_id(deployment_id: &str) -> StagingResult<()> {
    let unsafe_char = |c: char| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control();
    if deployment_id.is_empty()
        || deployment_id.starts_with('.')
        || deployment_id.chars().any(unsafe_char)
    {
        return Err(StagingError::InvalidId(deployment_id.to_string()));
    }
    Ok(())
}

impl StagingArea for LocalStaging {
    fn path_for(&self, deployment_id: &str) -> StagingResult<PathBuf> {
        validate_id(deployment_id)?;
        Ok(self
            .dir
            .join(format!("{}.{}", deployment_id, self.extension)))
    }

    fn stage(&self, deployment_id: &str, bytes: &[u8]) -> StagingResult<StagedArtifact> {
        let path = self.path_for(deployment_id)?;
        atomic_write(&path, bytes).map_err(|e| StagingError::from_io(&path, e))?;

        Ok(
            StagedArtifact::new(deployment_id, path, bytes.len() as u64)
                .with_hash(ContentHash::from_bytes(bytes)),
        )
    }

    fn read(&self, artifact: &StagedArtifact) -> StagingResult<Vec<u8>> {
        std::fs::read(artifact.local_path())
            .map_err(|e| StagingError::from_io(artifact.local_path(), e))
    }

    fn remove(&self, artifact: &StagedArtifact) -> StagingResult<()> {
        match std::fs::remove_file(artifact.local_path()) {
            Ok(()) => Ok(()),
            // Already gone is as good as removed
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StagingError::from_io(artifact.local_path(), e)),
        }
    }

    fn leftovers(&self) -> StagingResult<Vec<StagedArtifact>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StagingError::from_io(&self.dir, e)),
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StagingError::from_io(&self.dir, e))?;
            let path = entry.path();
            let Some(id) = self.id_from_path(&path) else {
                continue;
            };
            let metadata = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            found.push(StagedArtifact::new(id, path, metadata.len()));
        }

        found.sort_by(|a, b| a.deployment_id().cmp(b.deployment_id()));
        Ok(found)
    }
}
