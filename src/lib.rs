//! deployment-sync - telemetry deployment mirroring
//!
//! Lists the deployment catalog of a remote telemetry service, works out
//! which deployments are new or were updated since the last run, downloads
//! those, records their freshness in a local ledger and forwards the
//! downloaded archives to a WebDAV file store with bounded retries.
//!
//! The crate is layered the usual way:
//!
//! - `domain` - entities, the reconciler and the ports (traits)
//! - `application` - the sync run that sequences the ports
//! - `infrastructure` - HTTP, WebDAV, filesystem and event-sink adapters
//! - `presentation` - CLI definition, dependency wiring, output rendering

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{preview, RunSummary, SyncOptions, SyncUseCase};
pub use config::Config;
pub use domain::entities::{DeploymentSummary, Ledger, StagedArtifact, TransferOutcome};
pub use domain::services::{FetchPlan, Reconciler, RemoteNaming};
pub use error::{SyncError, SyncResult};
