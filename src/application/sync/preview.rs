//! Read-only reconciliation
//!
//! Lists the catalog and plans against the current ledger without touching
//! staging, the ledger file, or the sink. Needs no sink credentials.

use crate::domain::ports::{DeploymentSource, LedgerRepository};
use crate::domain::services::{FetchPlan, Reconciler};
use crate::error::SyncResult;

/// Plan what the next run would fetch.
///
/// An unreadable ledger plans against an empty one, like a real run would.
pub fn preview<S, L>(source: &S, ledger_repo: &L) -> SyncResult<FetchPlan>
where
    S: DeploymentSource,
    L: LedgerRepository,
{
    let ledger = match ledger_repo.load() {
        Ok(ledger) => ledger,
        Err(err) => {
            tracing::warn!(error = %err, "ledger unreadable, planning against an empty ledger");
            Default::default()
        }
    };
    let catalog = source.list_deployments()?;
    Ok(Reconciler::plan(&catalog, &ledger))
}
