//! Sync Event Port
//!
//! Provides an observable interface for sync runs.
//! Enables log output, NDJSON event streams, and test assertions.

use std::path::PathBuf;

/// Event emitted during a sync run
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// Run started
    Started { ledger_entries: usize },

    /// Ledger couldn't be loaded; continuing with an empty one
    LedgerDegraded { error: String },

    /// Catalog listing failed; the run stops here
    CatalogUnavailable { error: String },

    /// Catalog listed
    CatalogListed { count: usize },

    /// Reconciliation finished
    Planned { to_fetch: usize, up_to_date: usize },

    /// Deployment downloaded and staged
    Fetched {
        deployment_id: String,
        path: PathBuf,
        size: u64,
        hash: String,
        previous: Option<i64>,
        freshness: i64,
    },

    /// Download or staging failed; ledger not advanced for this id
    FetchFailed { deployment_id: String, error: String },

    /// Merged ledger written
    LedgerSaved { entries: usize },

    /// Merged ledger could not be written; previous ledger stays in place
    LedgerSaveFailed { error: String },

    /// Staging directory could not be listed; leftovers wait for the next run
    StagingScanFailed { error: String },

    /// Staged artifact from an earlier run re-enqueued for upload
    CarriedOver { deployment_id: String, path: PathBuf },

    /// Upload confirmed by the sink
    Uploaded {
        deployment_id: String,
        remote_path: String,
        round: u32,
    },

    /// Upload attempt failed
    UploadFailed {
        deployment_id: String,
        round: u32,
        error: String,
        permanent: bool,
    },

    /// Transfer round finished
    RoundCompleted { round: u32, pending: usize },

    /// Local copy removed after upload
    StagedRemoved { deployment_id: String },

    /// Local copy could not be removed
    CleanupFailed { deployment_id: String, error: String },

    /// Run completed
    Completed {
        fetched: usize,
        fetch_failed: usize,
        transferred: usize,
        transfer_failed: usize,
    },
}

/// Trait for receiving sync events
///
/// Implementations:
/// - TracingEventSink: structured log records
/// - JsonEventSink: NDJSON event stream for automation
/// - NoopEventSink: silent operation
pub trait SyncEventSink: Send + Sync {
    /// Handle a sync event
    fn on_event(&self, event: SyncEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SyncEventSink for NoopEventSink {
    fn on_event(&self, _event: SyncEvent) {}
}
