//! Error types for deployment-sync
//!
//! Uses `thiserror` for library errors. Each port has its own narrow error
//! enum (see `domain::ports`); `SyncError` is the crate-level taxonomy that
//! the sync driver and the CLI speak.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Main error type for deployment-sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Remote catalog/content API unreachable or rejected the request
    #[error("deployment source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// Remote file store unreachable or rejected the request
    #[error("artifact sink unavailable: {message}")]
    SinkUnavailable { message: String },

    /// Disk read/write/rename failure
    #[error("local I/O failure at {path}: {message}")]
    LocalIoFailure { path: PathBuf, message: String },

    /// Persisted ledger unreadable or corrupt
    #[error("malformed ledger at {path}: {message}")]
    MalformedLedger { path: PathBuf, message: String },

    /// Staged file vanished before upload
    #[error("staged artifact missing: {path}")]
    LocalArtifactMissing { path: PathBuf },

    /// Configuration could not be loaded or is incomplete
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Another run holds the run lock
    #[error("another sync run is in progress (lock held at {path})")]
    RunInProgress { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
