//! Sync Use Case Module
//!
//! One run of the reconciliation-and-transfer engine.

mod options;
mod preview;
mod result;
mod use_case;


pub use options::SyncOptions;
pub use preview::preview;
pub use result::{FetchFailure, LedgerWrite, RunSummary};
pub use use_case::SyncUseCase;
