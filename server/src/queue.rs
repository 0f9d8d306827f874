//! Durable Update Queue
//!
//! Append-only JSONL log of received updates. Each update is serialized to a
//! single compact JSON line, so the log stays independently parseable line by
//! line. Appends are serialized across processes with an exclusive advisory
//! lock on a dedicated lock file, leaving the log itself free for the agent
//! loop to read without contention. This module never reads, truncates, or
//! rotates the log; consumption is entirely the agent loop's business.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use nix::fcntl::{Flock, FlockArg};
use thiserror::Error;

/// Failure while appending to the queue log.
///
/// This is the one fatal condition in the receive path: an update that could
/// not be appended must not be acknowledged as received.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Failed to open queue lock file: {0}")]
    LockOpen(std::io::Error),

    #[error("Failed to acquire queue lock: {0}")]
    LockAcquire(nix::errno::Errno),

    #[error("Failed to append to queue log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize update: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only queue backed by a JSONL log and an advisory lock file.
#[derive(Debug)]
pub struct UpdateQueue {
    log_path: PathBuf,
    lock_path: Option<PathBuf>,
}

impl UpdateQueue {
    /// Create a queue over the given log file.
    ///
    /// With `lock_path` set to `None`, appends are unlocked; that is only
    /// safe for single-writer deployments.
    #[must_use]
    pub const fn new(log_path: PathBuf, lock_path: Option<PathBuf>) -> Self {
        Self {
            log_path,
            lock_path,
        }
    }

    /// Path of the queue log file.
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append one update as a single JSON line.
    ///
    /// The lock is held only across open-write-release; it is released on
    /// every exit path by the guard's drop, including errors.
    pub fn append(&self, update: &serde_json::Value) -> Result<(), QueueError> {
        let mut line = serde_json::to_string(update)?;
        line.push('\n');

        let _guard = match &self.lock_path {
            Some(path) => Some(acquire_lock(path)?),
            None => None,
        };

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        log.write_all(line.as_bytes())?;

        Ok(())
    }
}

/// Take the exclusive advisory lock, blocking until it is granted.
///
/// The lock file carries no data; it exists solely as the lock handle.
fn acquire_lock(path: &Path) -> Result<Flock<File>, QueueError> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(QueueError::LockOpen)?;

    Flock::lock(file, FlockArg::LockExclusive).map_err(|(_, errno)| QueueError::LockAcquire(errno))
}
