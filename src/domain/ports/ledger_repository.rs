//! LedgerRepository port - abstraction for freshness ledger persistence
//!
//! The repository owns exactly one ledger location, fixed at construction.
//! Implementations must replace the whole snapshot on save so that a reader
//! never observes a half-written ledger.

use std::path::PathBuf;

use crate::domain::entities::Ledger;

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger persistence errors
///
/// Both variants are recoverable: on load the caller degrades to an empty
/// ledger, on save the previous on-disk ledger stays authoritative.
#[derive(Debug)]
pub enum LedgerError {
    /// The persisted ledger exists but can't be parsed
    Malformed { path: PathBuf, message: String },
    /// Read, write, or rename failed
    Io { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::Malformed { path, message } => {
                write!(f, "malformed ledger at {}: {}", path.display(), message)
            }
            LedgerError::Io { path, source } => {
                write!(f, "ledger I/O error at {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Io { source, .. } => Some(source),
            LedgerError::Malformed { .. } => None,
        }
    }
}

impl From<LedgerError> for crate::error::SyncError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Malformed { path, message } => {
                crate::error::SyncError::MalformedLedger { path, message }
            }
            LedgerError::Io { path, source } => crate::error::SyncError::LocalIoFailure {
                path,
                message: source.to_string(),
            },
        }
    }
}

/// Abstract repository for the freshness ledger
pub trait LedgerRepository {
    /// Load the persisted ledger
    ///
    /// A missing ledger is bootstrapped as an empty one (and persisted), so
    /// repeated loads before any save keep returning the same empty ledger.
    fn load(&self) -> LedgerResult<Ledger>;

    /// Atomically replace the persisted ledger with `ledger`
    fn save(&self, ledger: &Ledger) -> LedgerResult<()>;
}

impl<T: LedgerRepository + ?Sized> LedgerRepository for &T {
    fn load(&self) -> LedgerResult<Ledger> {
        (**self).load()
    }

    fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        (**self).save(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_error_display() {
        let err = LedgerError::Malformed {
            path: PathBuf::from("state/deployment_info.json"),
            message: "expected value at line 1".to_string(),
        };
        assert!(err.to_string().contains("deployment_info.json"));
        assert!(err.to_string().contains("expected value"));
    }
}
