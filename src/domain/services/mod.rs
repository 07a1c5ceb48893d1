//! Domain Services
//!
//! Stateless services containing pure business logic.

mod reconciler;
mod remote_naming;

pub use reconciler::{plan, FetchPlan, FetchReason, PlannedFetch, Reconciler};
pub use remote_naming::RemoteNaming;
