//! Display-ready projection of the timer state
//!
//! The only contact point between the core and the rendering layer: a
//! cheap snapshot taken under the state lock, plus pure formatting.

use studyclock_core::format;

use crate::engine::{EngineState, Phase};
use crate::settings::TimerMode;

/// Point-in-time view of the timer, safe to hold across frames
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub state: EngineState,
    pub remaining_secs: u64,
    pub duration_secs: u64,
    pub mode: TimerMode,
    /// A completed phase is waiting for the user to confirm the next one
    pub awaiting_confirm: bool,
    pub pending_next: Option<Phase>,
}

impl TimerSnapshot {
    /// Remaining time as MM:SS
    pub fn clock(&self) -> String {
        format::clock(self.remaining_secs)
    }

    /// Fraction of the phase already elapsed, in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        let elapsed = self.duration_secs.saturating_sub(self.remaining_secs);
        (elapsed as f64 / self.duration_secs as f64).clamp(0.0, 1.0)
    }

    pub fn status_label(&self) -> &'static str {
        match self.state {
            EngineState::Idle => "Idle",
            EngineState::Running => "Running",
            EngineState::Paused => "Paused",
            EngineState::Completed => "Completed",
        }
    }
}
