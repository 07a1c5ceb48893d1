//! Sync Options
//!
//! Per-run knobs for the sync use case.

use std::time::Duration;

/// Options for one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Upload rounds per run (each pending item gets one attempt per round)
    pub max_rounds: u32,
    /// Pause between transfer rounds
    pub round_delay: Duration,
    /// Re-enqueue staged files left over from earlier runs
    pub carry_over: bool,
    /// Delete the local staged copy after a confirmed upload
    pub cleanup_uploaded: bool,
}

impl SyncOptions {
    pub fn new() -> Self {
        Self {
            max_rounds: 5,
            round_delay: Duration::ZERO,
            carry_over: true,
            cleanup_uploaded: true,
        }
    }

    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_round_delay(mut self, delay: Duration) -> Self {
        self.round_delay = delay;
        self
    }

    pub fn with_carry_over(mut self, enabled: bool) -> Self {
        self.carry_over = enabled;
        self
    }

    pub fn with_cleanup_uploaded(mut self, enabled: bool) -> Self {
        self.cleanup_uploaded = enabled;
        self
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::new()
    }
}
