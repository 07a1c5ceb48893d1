//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Staging directory, atomic writes, run lock
//! - `repositories/` - Ledger and name-mapping files
//! - `http/` - Telemetry API source and WebDAV sink
//! - `events/` - Sync event sinks (tracing, NDJSON)

pub mod events;
pub mod fs;
pub mod http;
pub mod repositories;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::{LocalStaging, RunLock};
pub use http::{RequestSigner, WebDavSink, WildlifeApiSource};
pub use repositories::{load_friendly_names, JsonLedgerRepository};
