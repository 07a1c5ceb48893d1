//! Fetch Executor
//!
//! Downloads one deployment through the `DeploymentSource` and stages the
//! bytes locally. The caller must not advance the ledger or enqueue an
//! upload for an id whose fetch returned an error.

use thiserror::Error;

use crate::domain::entities::StagedArtifact;
use crate::domain::ports::{DeploymentSource, SourceError, StagingArea, StagingError};

/// Per-item fetch failure
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, non-success status, or an empty payload
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),

    /// Bytes arrived but could not be staged; any earlier staged copy is intact
    #[error("local write failed: {0}")]
    LocalWriteFailed(#[source] StagingError),
}

/// Downloads and stages single deployments
pub struct FetchExecutor<'a, S, G>
where
    S: DeploymentSource,
    G: StagingArea,
{
    source: &'a S,
    staging: &'a G,
}

impl<'a, S, G> FetchExecutor<'a, S, G>
where
    S: DeploymentSource,
    G: StagingArea,
{
    pub fn new(source: &'a S, staging: &'a G) -> Self {
        Self { source, staging }
    }

    /// Fetch `deployment_id` and stage it under its deterministic local path
    ///
    /// Ids staging can't name are refused before anything is downloaded.
    pub fn fetch(&self, deployment_id: &str) -> Result<StagedArtifact, FetchError> {
        self.staging
            .path_for(deployment_id)
            .map_err(FetchError::LocalWriteFailed)?;

        let bytes = self
            .source
            .fetch_artifact(deployment_id)
            .map_err(FetchError::SourceUnavailable)?;

        if bytes.is_empty() {
            return Err(FetchError::SourceUnavailable(SourceError::InvalidResponse(
                format!("empty payload for deployment {}", deployment_id),
            )));
        }

        self.staging
            .stage(deployment_id, &bytes)
            .map_err(FetchError::LocalWriteFailed)
    }
}
