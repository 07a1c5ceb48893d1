//! Tracing Event Sink
//!
//! Renders sync events as structured `tracing` records. This is the
//! default sink for unattended (cron) runs.

use crate::domain::ports::{SyncEvent, SyncEventSink};

/// Event sink that logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl SyncEventSink for TracingEventSink {
    fn on_event(&self, event: SyncEvent) {
        match event {
            SyncEvent::Started { ledger_entries } => {
                tracing::info!(ledger_entries, "sync run started");
            }
            SyncEvent::LedgerDegraded { error } => {
                tracing::warn!(%error, "ledger unreadable, starting from an empty ledger");
            }
            SyncEvent::CatalogUnavailable { error } => {
                tracing::error!(%error, "cannot list deployments");
            }
            SyncEvent::CatalogListed { count } => {
                tracing::info!(count, "listed deployments");
            }
            SyncEvent::Planned {
                to_fetch,
                up_to_date,
            } => {
                tracing::info!(to_fetch, up_to_date, "reconciled catalog against ledger");
            }
            SyncEvent::Fetched {
                deployment_id,
                path,
                size,
                hash,
                previous,
                freshness,
            } => match previous {
                Some(previous) => tracing::info!(
                    %deployment_id,
                    path = %path.display(),
                    size,
                    %hash,
                    previous,
                    freshness,
                    "downloaded updated deployment"
                ),
                None => tracing::info!(
                    %deployment_id,
                    path = %path.display(),
                    size,
                    %hash,
                    freshness,
                    "downloaded new deployment"
                ),
            },
            SyncEvent::FetchFailed {
                deployment_id,
                error,
            } => {
                tracing::warn!(%deployment_id, %error, "download failed");
            }
            SyncEvent::LedgerSaved { entries } => {
                tracing::info!(entries, "ledger saved");
            }
            SyncEvent::LedgerSaveFailed { error } => {
                tracing::error!(%error, "ledger save failed, previous ledger kept");
            }
            SyncEvent::StagingScanFailed { error } => {
                tracing::warn!(%error, "cannot scan staging directory for leftovers");
            }
            SyncEvent::CarriedOver {
                deployment_id,
                path,
            } => {
                tracing::info!(
                    %deployment_id,
                    path = %path.display(),
                    "re-enqueued artifact from an earlier run"
                );
            }
            SyncEvent::Uploaded {
                deployment_id,
                remote_path,
                round,
            } => {
                tracing::info!(%deployment_id, %remote_path, round, "uploaded");
            }
            SyncEvent::UploadFailed {
                deployment_id,
                round,
                error,
                permanent,
            } => {
                tracing::warn!(%deployment_id, round, permanent, %error, "upload failed");
            }
            SyncEvent::RoundCompleted { round, pending } => {
                tracing::debug!(round, pending, "transfer round complete");
            }
            SyncEvent::StagedRemoved { deployment_id } => {
                tracing::debug!(%deployment_id, "removed staged copy");
            }
            SyncEvent::CleanupFailed {
                deployment_id,
                error,
            } => {
                tracing::warn!(%deployment_id, %error, "cannot remove staged copy");
            }
            SyncEvent::Completed {
                fetched,
                fetch_failed,
                transferred,
                transfer_failed,
            } => {
                if fetch_failed == 0 && transfer_failed == 0 {
                    tracing::info!(fetched, transferred, "sync run complete");
                } else {
                    tracing::warn!(
                        fetched,
                        fetch_failed,
                        transferred,
                        transfer_failed,
                        "sync run complete with failures"
                    );
                }
            }
        }
    }
}
