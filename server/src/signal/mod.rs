//! Best-Effort Signaling
//!
//! Out-of-band channels toward the agent loop: a FIFO nudge that new queue
//! data exists, and a sentinel-file-plus-SIGTERM cancellation request. Both
//! are optimizations layered on the durable queue; neither operation can
//! fail observably, and the agent loop must stay correct if a signal is
//! lost.

pub mod cancel;
pub mod wakeup;

pub use cancel::CancelSignal;
pub use wakeup::WakeupPipe;
