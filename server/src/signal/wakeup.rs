//! Wakeup Pipe
//!
//! Writes a single byte into a named pipe to tell the agent loop that new
//! queue data exists. The open is non-blocking: with no reader on the other
//! end the kernel refuses it with `ENXIO` immediately, which is exactly the
//! behavior wanted on a request thread. The agent loop must also poll the
//! queue log on its own schedule; wakeup delivery is lossy by design.

use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;

use tracing::debug;

/// Best-effort wakeup channel over a pre-created FIFO.
#[derive(Debug)]
pub struct WakeupPipe {
    fifo_path: PathBuf,
}

impl WakeupPipe {
    /// Create a wakeup channel over the FIFO at `fifo_path`.
    ///
    /// The FIFO itself is deployment tooling's responsibility; it is not
    /// created here.
    #[must_use]
    pub const fn new(fifo_path: PathBuf) -> Self {
        Self { fifo_path }
    }

    /// Nudge the reader, if any. Never fails.
    ///
    /// A missing FIFO, an absent reader, or a full pipe buffer all leave the
    /// system in a valid state: the data is already durable in the queue log.
    pub fn notify(&self) {
        let result = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&self.fifo_path)
            .and_then(|mut fifo| fifo.write_all(b"\n"));

        if let Err(e) = result {
            debug!(path = %self.fifo_path.display(), error = %e, "Wakeup notify skipped");
        }
    }
}
