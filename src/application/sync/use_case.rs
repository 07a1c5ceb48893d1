//! Sync Use Case
//!
//! Orchestrates one sync run:
//! 1. Load the freshness ledger (degrade to empty on failure)
//! 2. List the remote catalog (abort the run on failure)
//! 3. Reconcile catalog against ledger
//! 4. Fetch and stage each planned deployment
//! 5. Save the merged ledger once
//! 6. Drain staged artifacts (plus leftovers from earlier runs) to the sink
//! 7. Remove local copies of confirmed uploads
//!
//! All business decisions live in the domain services and in the fetch and
//! transfer components; this type only sequences them.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::application::fetch::FetchExecutor;
use crate::application::transfer::TransferQueue;
use crate::domain::entities::{Ledger, StagedArtifact, TransferOutcome};
use crate::domain::ports::{
    ArtifactSink, DeploymentSource, LedgerRepository, NoopEventSink, StagingArea, SyncEvent,
    SyncEventSink,
};
use crate::domain::services::{FetchPlan, Reconciler, RemoteNaming};
use crate::error::SyncResult;

use super::options::SyncOptions;
use super::preview::preview;
use super::result::{FetchFailure, LedgerWrite, RunSummary};

/// Sync use case - one reconcile-fetch-transfer pass
///
/// Parameterized by its ports so tests can swap in in-memory fakes.
pub struct SyncUseCase<S, K, L, G>
where
    S: DeploymentSource,
    K: ArtifactSink,
    L: LedgerRepository,
    G: StagingArea,
{
    source: S,
    sink: K,
    ledger_repo: L,
    staging: G,
    naming: RemoteNaming,
}

impl<S, K, L, G> SyncUseCase<S, K, L, G>
where
    S: DeploymentSource,
    K: ArtifactSink,
    L: LedgerRepository,
    G: StagingArea,
{
    pub fn new(source: S, sink: K, ledger_repo: L, staging: G, naming: RemoteNaming) -> Self {
        Self {
            source,
            sink,
            ledger_repo,
            staging,
            naming,
        }
    }

    /// Execute one run silently
    pub fn run(&self, options: &SyncOptions) -> SyncResult<RunSummary> {
        self.run_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute one run, reporting progress to `events`
    ///
    /// Only a failed catalog listing returns `Err`, and it does so before
    /// anything is fetched or written. Every other failure is contained
    /// and reported in the returned summary.
    pub fn run_with_events(
        &self,
        options: &SyncOptions,
        events: Arc<dyn SyncEventSink>,
    ) -> SyncResult<RunSummary> {
        let mut summary = RunSummary::new(Utc::now());

        let ledger = self.load_ledger(&mut summary, events.as_ref());
        events.on_event(SyncEvent::Started {
            ledger_entries: ledger.len(),
        });

        let catalog = match self.source.list_deployments() {
            Ok(catalog) => catalog,
            Err(err) => {
                events.on_event(SyncEvent::CatalogUnavailable {
                    error: err.to_string(),
                });
                return Err(err.into());
            }
        };
        summary.listed = catalog.len();
        events.on_event(SyncEvent::CatalogListed {
            count: catalog.len(),
        });

        let plan = Reconciler::plan(&catalog, &ledger);
        summary.skipped = plan.up_to_date;
        events.on_event(SyncEvent::Planned {
            to_fetch: plan.len(),
            up_to_date: plan.up_to_date,
        });

        // Collected before fetching: a re-fetch overwrites the same file.
        let leftovers = if options.carry_over {
            self.collect_leftovers(events.as_ref())
        } else {
            Vec::new()
        };

        let (staged, updates) = self.fetch_planned(&plan, &mut summary, events.as_ref());

        if !updates.is_empty() {
            let merged = ledger.merged(updates);
            summary.ledger_write = match self.ledger_repo.save(&merged) {
                Ok(()) => {
                    events.on_event(SyncEvent::LedgerSaved {
                        entries: merged.len(),
                    });
                    LedgerWrite::Saved {
                        entries: merged.len(),
                    }
                }
                Err(err) => {
                    events.on_event(SyncEvent::LedgerSaveFailed {
                        error: err.to_string(),
                    });
                    LedgerWrite::Failed {
                        error: err.to_string(),
                    }
                }
            };
        }

        let mut pending = staged;
        let staged_ids: HashSet<String> = pending
            .iter()
            .map(|a| a.deployment_id().to_string())
            .collect();
        for leftover in leftovers {
            if staged_ids.contains(leftover.deployment_id()) {
                continue;
            }
            events.on_event(SyncEvent::CarriedOver {
                deployment_id: leftover.deployment_id().to_string(),
                path: leftover.local_path().to_path_buf(),
            });
            summary
                .carried_over
                .push(leftover.deployment_id().to_string());
            pending.push(leftover);
        }

        let queue = TransferQueue::new(&self.sink, &self.staging, &self.naming, events.as_ref())
            .with_round_delay(options.round_delay);
        let outcomes = queue.drain(pending.clone(), options.max_rounds);

        if options.cleanup_uploaded {
            self.remove_uploaded(&pending, &outcomes, events.as_ref());
        }

        summary.outcomes = outcomes;
        summary.finished_at = Utc::now();
        events.on_event(SyncEvent::Completed {
            fetched: summary.fetched.len(),
            fetch_failed: summary.fetch_failures.len(),
            transferred: summary.transferred(),
            transfer_failed: summary.transfer_failed(),
        });

        Ok(summary)
    }

    /// Reconcile without fetching, writing, or uploading anything
    pub fn preview(&self) -> SyncResult<FetchPlan> {
        preview(&self.source, &self.ledger_repo)
    }

    fn load_ledger(&self, summary: &mut RunSummary, events: &dyn SyncEventSink) -> Ledger {
        match self.ledger_repo.load() {
            Ok(ledger) => ledger,
            Err(err) => {
                summary.ledger_degraded = true;
                events.on_event(SyncEvent::LedgerDegraded {
                    error: err.to_string(),
                });
                Ledger::new()
            }
        }
    }

    fn collect_leftovers(&self, events: &dyn SyncEventSink) -> Vec<StagedArtifact> {
        match self.staging.leftovers() {
            Ok(leftovers) => leftovers,
            Err(err) => {
                // Not fatal: leftovers are picked up again next run.
                events.on_event(SyncEvent::StagingScanFailed {
                    error: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Fetch every planned id; only successfully staged ids produce ledger updates
    fn fetch_planned(
        &self,
        plan: &FetchPlan,
        summary: &mut RunSummary,
        events: &dyn SyncEventSink,
    ) -> (Vec<StagedArtifact>, Vec<(String, i64)>) {
        let executor = FetchExecutor::new(&self.source, &self.staging);
        let mut staged = Vec::new();
        let mut updates = Vec::new();

        for planned in &plan.fetches {
            match executor.fetch(&planned.deployment_id) {
                Ok(artifact) => {
                    events.on_event(SyncEvent::Fetched {
                        deployment_id: planned.deployment_id.clone(),
                        path: artifact.local_path().to_path_buf(),
                        size: artifact.size(),
                        hash: artifact
                            .hash()
                            .map(|h| h.short().to_string())
                            .unwrap_or_default(),
                        previous: planned.previous(),
                        freshness: planned.freshness,
                    });
                    summary.fetched.push(planned.deployment_id.clone());
                    updates.push((planned.deployment_id.clone(), planned.freshness));
                    staged.push(artifact);
                }
                Err(err) => {
                    events.on_event(SyncEvent::FetchFailed {
                        deployment_id: planned.deployment_id.clone(),
                        error: err.to_string(),
                    });
                    summary.fetch_failures.push(FetchFailure {
                        deployment_id: planned.deployment_id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        (staged, updates)
    }

    fn remove_uploaded(
        &self,
        pending: &[StagedArtifact],
        outcomes: &[TransferOutcome],
        events: &dyn SyncEventSink,
    ) {
        let uploaded: HashSet<&str> = outcomes
            .iter()
            .filter(|o| o.succeeded)
            .map(|o| o.deployment_id.as_str())
            .collect();

        for artifact in pending
            .iter()
            .filter(|a| uploaded.contains(a.deployment_id()))
        {
            match self.staging.remove(artifact) {
                Ok(()) => events.on_event(SyncEvent::StagedRemoved {
                    deployment_id: artifact.deployment_id().to_string(),
                }),
                Err(err) => events.on_event(SyncEvent::CleanupFailed {
                    deployment_id: artifact.deployment_id().to_string(),
                    error: err.to_string(),
                }),
            }
        }
    }
}
