//! File System Implementations
//!
//! Local staging directory, atomic file replacement, and the run lock.

mod atomic;
mod run_lock;
mod staging;

pub use atomic::atomic_write;
#[cfg(test)]
pub(crate) use atomic::write_temp;
pub use run_lock::{RunLock, LOCK_FILE_NAME};
pub use staging::LocalStaging;
