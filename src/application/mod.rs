//! Application Layer
//!
//! Components that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain reconciliation rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `FetchExecutor` - Download one deployment and stage it locally
//! - `TransferQueue` - Bounded-round upload of staged artifacts
//! - `SyncUseCase` - One full run (list, reconcile, fetch, save ledger, drain)

pub mod fetch;
pub mod sync;
pub mod transfer;

pub use fetch::{FetchError, FetchExecutor};
pub use sync::{preview, FetchFailure, LedgerWrite, RunSummary, SyncOptions, SyncUseCase};
pub use transfer::{PendingTransfer, RoundResult, TransferQueue};
