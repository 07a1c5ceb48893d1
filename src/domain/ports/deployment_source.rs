//! DeploymentSource port - the remote catalog/content API
//!
//! Lists deployments with their freshness markers and fetches the raw
//! payload of a single deployment. Authentication is the adapter's concern.

use crate::domain::entities::DeploymentSummary;

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Deployment source errors
///
/// Every variant maps to `SourceUnavailable` in the crate-level taxonomy;
/// the split only exists for clearer log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Connection, TLS, or timeout failure
    Transport(String),
    /// Service answered with a non-success status
    Status { code: u16, body: String },
    /// Service answered but the payload could not be understood
    InvalidResponse(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Transport(msg) => write!(f, "transport error: {}", msg),
            SourceError::Status { code, body } if body.is_empty() => {
                write!(f, "HTTP status {}", code)
            }
            SourceError::Status { code, body } => write!(f, "HTTP status {}: {}", code, body),
            SourceError::InvalidResponse(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<SourceError> for crate::error::SyncError {
    fn from(err: SourceError) -> Self {
        crate::error::SyncError::SourceUnavailable {
            message: err.to_string(),
        }
    }
}

/// Remote catalog of deployments
pub trait DeploymentSource {
    /// List every deployment currently visible to our credentials
    fn list_deployments(&self) -> SourceResult<Vec<DeploymentSummary>>;

    /// Fetch the raw artifact bytes for one deployment
    fn fetch_artifact(&self, deployment_id: &str) -> SourceResult<Vec<u8>>;
}

impl<T: DeploymentSource + ?Sized> DeploymentSource for &T {
    fn list_deployments(&self) -> SourceResult<Vec<DeploymentSummary>> {
        (**self).list_deployments()
    }

    fn fetch_artifact(&self, deployment_id: &str) -> SourceResult<Vec<u8>> {
        (**self).fetch_artifact(deployment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_omits_empty_body() {
        let err = SourceError::Status {
            code: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP status 503");
    }

    #[test]
    fn converts_to_source_unavailable() {
        let err: crate::error::SyncError = SourceError::Transport("refused".into()).into();
        assert!(matches!(
            err,
            crate::error::SyncError::SourceUnavailable { .. }
        ));
    }
}
