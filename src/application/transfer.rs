//! Transfer Queue
//!
//! Drains a batch of staged artifacts into the `ArtifactSink` in bounded
//! rounds. Every pending item is attempted once per round, so one item that
//! keeps failing can't hold up the rest of the batch.
//!
//! A round is two-phase: all attempts resolve first, then the pending list
//! is rebuilt from the results. The list being iterated is never mutated.
//!
//! The queue never deletes staged files; cleanup is the caller's decision.

use std::time::Duration;

use crate::domain::entities::{StagedArtifact, TransferFailure, TransferOutcome};
use crate::domain::ports::{ArtifactSink, StagingArea, StagingError, SyncEvent, SyncEventSink};
use crate::domain::services::RemoteNaming;

/// An artifact still waiting for a confirmed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransfer {
    pub artifact: StagedArtifact,
    pub attempts: u32,
    pub last_failure: Option<TransferFailure>,
}

impl PendingTransfer {
    pub fn new(artifact: StagedArtifact) -> Self {
        Self {
            artifact,
            attempts: 0,
            last_failure: None,
        }
    }

    fn into_failed_outcome(self) -> TransferOutcome {
        let reason = self.last_failure.unwrap_or_else(|| {
            TransferFailure::RemoteUnavailable("no transfer round was run".to_string())
        });
        TransferOutcome::failure(self.artifact.deployment_id(), self.attempts, reason)
    }
}

/// Result of a single round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundResult {
    /// Items that reached a final state this round (success or permanent failure)
    pub completed: Vec<TransferOutcome>,
    /// Items to try again next round
    pub pending: Vec<PendingTransfer>,
}

/// Bounded-round upload loop
pub struct TransferQueue<'a, K, G>
where
    K: ArtifactSink,
    G: StagingArea,
{
    sink: &'a K,
    staging: &'a G,
    naming: &'a RemoteNaming,
    events: &'a dyn SyncEventSink,
    round_delay: Duration,
}

impl<'a, K, G> TransferQueue<'a, K, G>
where
    K: ArtifactSink,
    G: StagingArea,
{
    pub fn new(
        sink: &'a K,
        staging: &'a G,
        naming: &'a RemoteNaming,
        events: &'a dyn SyncEventSink,
    ) -> Self {
        Self {
            sink,
            staging,
            naming,
            events,
            round_delay: Duration::ZERO,
        }
    }

    /// Pause between rounds; does not affect pass/fail classification
    pub fn with_round_delay(mut self, delay: Duration) -> Self {
        self.round_delay = delay;
        self
    }

    /// Drain `pending` in up to `max_rounds` rounds.
    ///
    /// Returns exactly one outcome per input artifact. Items still pending
    /// after the last round are reported as failed with their attempt count.
    pub fn drain(&self, pending: Vec<StagedArtifact>, max_rounds: u32) -> Vec<TransferOutcome> {
        let mut pending: Vec<PendingTransfer> =
            pending.into_iter().map(PendingTransfer::new).collect();
        let mut outcomes = Vec::with_capacity(pending.len());

        for round in 1..=max_rounds {
            if pending.is_empty() {
                break;
            }
            if round > 1 && !self.round_delay.is_zero() {
                std::thread::sleep(self.round_delay);
            }

            let result = self.run_round(pending, round);
            outcomes.extend(result.completed);
            pending = result.pending;

            self.events.on_event(SyncEvent::RoundCompleted {
                round,
                pending: pending.len(),
            });
        }

        outcomes.extend(pending.into_iter().map(PendingTransfer::into_failed_outcome));
        outcomes
    }

    /// Attempt every pending item once, then partition by result
    pub fn run_round(&self, pending: Vec<PendingTransfer>, round: u32) -> RoundResult {
        let attempts: Vec<Result<(), TransferFailure>> = pending
            .iter()
            .map(|item| self.attempt(&item.artifact, round))
            .collect();

        let mut result = RoundResult::default();
        for (mut item, attempt) in pending.into_iter().zip(attempts) {
            item.attempts += 1;
            match attempt {
                Ok(()) => result.completed.push(TransferOutcome::success(
                    item.artifact.deployment_id(),
                    item.attempts,
                )),
                Err(failure) if failure.is_permanent() => result.completed.push(
                    TransferOutcome::failure(item.artifact.deployment_id(), item.attempts, failure),
                ),
                Err(failure) => {
                    item.last_failure = Some(failure);
                    result.pending.push(item);
                }
            }
        }
        result
    }

    fn attempt(&self, artifact: &StagedArtifact, round: u32) -> Result<(), TransferFailure> {
        let deployment_id = artifact.deployment_id();
        let remote_path = self.naming.remote_path(deployment_id);

        let outcome = match self.staging.read(artifact) {
            Ok(bytes) => self
                .sink
                .store(&remote_path, &bytes)
                .map_err(|e| TransferFailure::RemoteUnavailable(e.to_string())),
            Err(StagingError::NotFound(path)) => Err(TransferFailure::LocalArtifactMissing(path)),
            Err(e) => Err(TransferFailure::LocalReadFailed(e.to_string())),
        };

        match &outcome {
            Ok(()) => self.events.on_event(SyncEvent::Uploaded {
                deployment_id: deployment_id.to_string(),
                remote_path,
                round,
            }),
            Err(failure) => self.events.on_event(SyncEvent::UploadFailed {
                deployment_id: deployment_id.to_string(),
                round,
                error: failure.to_string(),
                permanent: failure.is_permanent(),
            }),
        }
        outcome
    }
}
