//! Cancellation Signal
//!
//! Two-step, best-effort interruption of whatever the agent loop is doing:
//! drop a sentinel file whose mere presence requests cancellation, then
//! SIGTERM the agent process named by an externally written pid file. The
//! agent loop consumes and clears the sentinel; this module only ever
//! creates it. Either step can fail without consequence, since the target
//! process is not under this server's management.

use std::fs;
use std::path::PathBuf;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{debug, info};

/// Best-effort cancellation toward the external agent process.
#[derive(Debug)]
pub struct CancelSignal {
    sentinel_path: PathBuf,
    pid_path: Option<PathBuf>,
}

impl CancelSignal {
    /// Create a cancellation signal.
    ///
    /// With `pid_path` set to `None` only the sentinel step runs.
    #[must_use]
    pub const fn new(sentinel_path: PathBuf, pid_path: Option<PathBuf>) -> Self {
        Self {
            sentinel_path,
            pid_path,
        }
    }

    /// Request cancellation. Never fails.
    ///
    /// Re-triggering while a request is already pending is a no-op in
    /// effect: the sentinel is simply truncated again.
    pub fn trigger(&self) {
        if let Err(e) = fs::File::create(&self.sentinel_path) {
            debug!(path = %self.sentinel_path.display(), error = %e, "Cancel sentinel write failed");
        } else {
            info!(path = %self.sentinel_path.display(), "Cancellation requested");
        }

        self.terminate_agent();
    }

    /// SIGTERM the agent process, if its pid file names one.
    fn terminate_agent(&self) {
        let Some(pid_path) = &self.pid_path else {
            return;
        };

        let pid = match fs::read_to_string(pid_path) {
            Ok(contents) => match contents.trim().parse::<i32>() {
                Ok(pid) => pid,
                Err(e) => {
                    debug!(path = %pid_path.display(), error = %e, "Pid file unparsable");
                    return;
                }
            },
            Err(e) => {
                debug!(path = %pid_path.display(), error = %e, "Pid file unreadable");
                return;
            }
        };

        match kill(Pid::from_raw(pid), Signal::SIGTERM) {
            Ok(()) => info!(pid, "Sent SIGTERM to agent process"),
            // ESRCH (no such process) and EPERM are expected when the agent
            // is not running or not ours to signal.
            Err(e) => debug!(pid, error = %e, "SIGTERM not delivered"),
        }
    }
}
