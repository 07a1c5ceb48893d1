//! Run lock
//!
//! Advisory exclusive lock held for the duration of a sync run so two
//! overlapping invocations can't race on the ledger and staging directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{SyncError, SyncResult};

/// Name of the lock file inside the state directory
pub const LOCK_FILE_NAME: &str = ".sync.lock";

/// Held lock; released on drop
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Try to take the lock in `state_dir` without blocking
    pub fn acquire(state_dir: &Path) -> SyncResult<Self> {
        fs::create_dir_all(state_dir).map_err(|e| SyncError::LocalIoFailure {
            path: state_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let path = state_dir.join(LOCK_FILE_NAME);
        let file = File::create(&path).map_err(|e| SyncError::LocalIoFailure {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if file.try_lock_exclusive().is_err() {
            return Err(SyncError::RunInProgress { path });
        }

        tracing::debug!(path = %path.display(), "acquired run lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
