//! StagingArea port - local storage for fetched artifacts
//!
//! One file per deployment id under a deterministic name. Staging the same
//! id twice replaces the earlier file; a failed stage leaves it untouched.

use std::path::PathBuf;

use crate::domain::entities::StagedArtifact;

/// Result type for staging operations
pub type StagingResult<T> = Result<T, StagingError>;

/// Staging errors
#[derive(Debug)]
pub enum StagingError {
    /// The staged file does not exist (any more)
    NotFound(PathBuf),
    /// Id can't be turned into a safe file name
    InvalidId(String),
    /// Any other I/O failure
    Io { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for StagingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StagingError::NotFound(path) => write!(f, "staged file not found: {}", path.display()),
            StagingError::InvalidId(id) => {
                write!(f, "deployment id '{}' is not a valid file name", id)
            }
            StagingError::Io { path, source } => {
                write!(f, "I/O error at {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StagingError {}

impl StagingError {
    /// Map an io::Error on `path`, keeping NotFound distinguishable
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            StagingError::NotFound(path)
        } else {
            StagingError::Io { path, source }
        }
    }
}

/// Local staging storage
pub trait StagingArea {
    /// Local path `deployment_id` would be staged at; fails for unsafe ids
    fn path_for(&self, deployment_id: &str) -> StagingResult<PathBuf>;

    /// Durably write `bytes` as the staged artifact for `deployment_id`
    fn stage(&self, deployment_id: &str, bytes: &[u8]) -> StagingResult<StagedArtifact>;

    /// Read a staged artifact back for upload
    fn read(&self, artifact: &StagedArtifact) -> StagingResult<Vec<u8>>;

    /// Delete a staged artifact (after a confirmed upload)
    fn remove(&self, artifact: &StagedArtifact) -> StagingResult<()>;

    /// Artifacts still on disk from earlier runs, in id order
    fn leftovers(&self) -> StagingResult<Vec<StagedArtifact>>;
}

impl<T: StagingArea + ?Sized> StagingArea for &T {
    fn path_for(&self, deployment_id: &str) -> StagingResult<PathBuf> {
        (**self).path_for(deployment_id)
    }

    fn stage(&self, deployment_id: &str, bytes: &[u8]) -> StagingResult<StagedArtifact> {
        (**self).stage(deployment_id, bytes)
    }

    fn read(&self, artifact: &StagedArtifact) -> StagingResult<Vec<u8>> {
        (**self).read(artifact)
    }

    fn remove(&self, artifact: &StagedArtifact) -> StagingResult<()> {
        (**self).remove(artifact)
    }

    fn leftovers(&self) -> StagingResult<Vec<StagedArtifact>> {
        (**self).leftovers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_io_keeps_not_found() {
        let err = StagingError::from_io(
            "/tmp/x.zip",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, StagingError::NotFound(_)));

        let err = StagingError::from_io(
            "/tmp/x.zip",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, StagingError::Io { .. }));
    }
}
