//! Events emitted by the core
//!
//! The ticker thread never touches display state directly; it sends these
//! over an mpsc channel and the foreground loop drains them each frame.

use crate::engine::Phase;

/// Core-to-UI event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// Remaining time moved (once per second while running)
    Tick { phase: Phase, remaining_secs: u64 },
    /// A phase finished, naturally or by skip. `next` is the candidate
    /// phase awaiting user confirmation; `None` ends the session.
    PhaseCompleted { phase: Phase, next: Option<Phase> },
    /// The record reached disk
    SaveSucceeded,
    /// The record could not be written; in-memory progress is retained
    SaveFailed { reason: String },
}
