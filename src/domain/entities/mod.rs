//! Domain Entities
//!
//! Core objects of the reconciliation engine.

mod artifact;
mod deployment;
mod ledger;
mod outcome;

pub use artifact::StagedArtifact;
pub use deployment::DeploymentSummary;
pub use ledger::Ledger;
pub use outcome::{TransferFailure, TransferOutcome};
