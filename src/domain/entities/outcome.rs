//! Transfer outcome - per-item result of draining the transfer queue

use std::fmt;
use std::path::PathBuf;

/// Why an upload attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferFailure {
    /// Sink unreachable or responded with a non-success status
    RemoteUnavailable(String),
    /// Staged file disappeared between enqueue and upload
    LocalArtifactMissing(PathBuf),
    /// Staged file exists but could not be read this time
    LocalReadFailed(String),
}

impl TransferFailure {
    /// Permanent failures are not attempted again within the same drain
    pub fn is_permanent(&self) -> bool {
        matches!(self, TransferFailure::LocalArtifactMissing(_))
    }

    /// Stable machine-readable kind (used in NDJSON events)
    pub fn kind(&self) -> &'static str {
        match self {
            TransferFailure::RemoteUnavailable(_) => "remote_unavailable",
            TransferFailure::LocalArtifactMissing(_) => "local_artifact_missing",
            TransferFailure::LocalReadFailed(_) => "local_read_failed",
        }
    }
}

impl fmt::Display for TransferFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferFailure::RemoteUnavailable(msg) => write!(f, "remote unavailable: {}", msg),
            TransferFailure::LocalArtifactMissing(path) => {
                write!(f, "staged artifact missing: {}", path.display())
            }
            TransferFailure::LocalReadFailed(msg) => {
                write!(f, "staged artifact unreadable: {}", msg)
            }
        }
    }
}

/// Final result for one artifact after a drain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub deployment_id: String,
    pub succeeded: bool,
    pub attempts: u32,
    /// Last failure reason; `None` when `succeeded`
    pub failure: Option<TransferFailure>,
}

impl TransferOutcome {
    pub fn success(deployment_id: impl Into<String>, attempts: u32) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            succeeded: true,
            attempts,
            failure: None,
        }
    }

    pub fn failure(deployment_id: impl Into<String>, attempts: u32, reason: TransferFailure) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            succeeded: false,
            attempts,
            failure: Some(reason),
        }
    }
}
