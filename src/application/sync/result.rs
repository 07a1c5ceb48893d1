//! Run Summary
//!
//! Structured result of one sync run, returned to the CLI layer.

use chrono::{DateTime, Utc};

use crate::domain::entities::TransferOutcome;

/// What happened to the ledger at the end of the fetch phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerWrite {
    /// Nothing was fetched, so nothing was written
    Unchanged,
    /// Merged snapshot persisted
    Saved { entries: usize },
    /// Save failed; the previous on-disk ledger is still authoritative
    Failed { error: String },
}

/// A deployment whose download or staging failed this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub deployment_id: String,
    pub error: String,
}

/// Summary of a sync run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Catalog entries listed by the source
    pub listed: usize,
    /// Catalog entries already up to date
    pub skipped: usize,
    /// Deployments downloaded and staged
    pub fetched: Vec<String>,
    pub fetch_failures: Vec<FetchFailure>,
    /// Leftover staged files re-enqueued from earlier runs
    pub carried_over: Vec<String>,
    /// The ledger couldn't be loaded and the run started from an empty one
    pub ledger_degraded: bool,
    pub ledger_write: LedgerWrite,
    pub outcomes: Vec<TransferOutcome>,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            listed: 0,
            skipped: 0,
            fetched: Vec::new(),
            fetch_failures: Vec::new(),
            carried_over: Vec::new(),
            ledger_degraded: false,
            ledger_write: LedgerWrite::Unchanged,
            outcomes: Vec::new(),
        }
    }

    pub fn transferred(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn transfer_failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded).count()
    }

    /// Nothing failed anywhere in the run
    pub fn is_clean(&self) -> bool {
        self.fetch_failures.is_empty()
            && self.transfer_failed() == 0
            && !self.ledger_degraded
            && !matches!(self.ledger_write, LedgerWrite::Failed { .. })
    }

    pub fn has_changes(&self) -> bool {
        !self.fetched.is_empty() || self.transferred() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_is_clean() {
        let summary = RunSummary::new(Utc::now());
        assert!(summary.is_clean());
        assert!(!summary.has_changes());
    }

    #[test]
    fn failed_transfer_makes_summary_unclean() {
        let mut summary = RunSummary::new(Utc::now());
        summary.outcomes.push(TransferOutcome::success("A", 1));
        summary.outcomes.push(TransferOutcome::failure(
            "B",
            5,
            crate::domain::entities::TransferFailure::RemoteUnavailable("503".into()),
        ));
        assert_eq!(summary.transferred(), 1);
        assert_eq!(summary.transfer_failed(), 1);
        assert!(!summary.is_clean());
    }
}
