//! Deployment summary as listed by the remote catalog

/// One catalog entry: a deployment id and its freshness marker.
///
/// Freshness is opaque apart from ordering; the telemetry API reports the
/// deployment's last update time in epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    pub id: String,
    pub freshness: i64,
}

impl DeploymentSummary {
    pub fn new(id: impl Into<String>, freshness: i64) -> Self {
        Self {
            id: id.into(),
            freshness,
        }
    }
}
