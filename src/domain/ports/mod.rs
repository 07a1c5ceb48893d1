//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_sink;
pub mod deployment_source;
pub mod ledger_repository;
pub mod staging_area;
pub mod sync_events;

pub use artifact_sink::{ArtifactSink, SinkError, SinkResult};
pub use deployment_source::{DeploymentSource, SourceError, SourceResult};
pub use ledger_repository::{LedgerError, LedgerRepository, LedgerResult};
pub use staging_area::{StagingArea, StagingError, StagingResult};
pub use sync_events::{NoopEventSink, SyncEvent, SyncEventSink};
