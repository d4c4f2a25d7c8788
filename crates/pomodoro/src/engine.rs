//! Countdown engine
//!
//! A pure state machine: Idle -> Running -> (Paused | Completed). It knows
//! nothing about threads, clocks or persistence; callers deliver elapsed
//! time through [`TimerEngine::tick`] and get back whether the phase
//! finished. Exactly one completion is reported per phase, whether the
//! countdown expired naturally or was skipped.

use serde::{Deserialize, Serialize};

/// One timed segment of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
    RevisionStudy,
}

impl Phase {
    /// Display label, e.g. for the session header
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
            Phase::RevisionStudy => "Revision",
        }
    }

    /// True for the break phases of Pomodoro mode
    pub fn is_break(&self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }
}

/// Lifecycle of the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Countdown for the current phase
#[derive(Debug, Clone)]
pub struct TimerEngine {
    phase: Phase,
    duration_secs: u64,
    remaining_secs: u64,
    state: EngineState,
}

impl TimerEngine {
    /// Create an idle engine armed with the given phase and duration
    pub fn new(phase: Phase, duration_secs: u64) -> Self {
        Self {
            phase,
            duration_secs,
            remaining_secs: duration_secs,
            state: EngineState::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Idle/Paused -> Running. Returns whether the engine started; a call
    /// while already Running or Completed is a no-op.
    pub fn start(&mut self) -> bool {
        match self.state {
            EngineState::Idle | EngineState::Paused => {
                self.state = EngineState::Running;
                true
            }
            EngineState::Running | EngineState::Completed => false,
        }
    }

    /// Running -> Paused; remaining time is frozen. No-op otherwise.
    pub fn pause(&mut self) {
        if self.state == EngineState::Running {
            self.state = EngineState::Paused;
        }
    }

    /// Any state -> Idle with the full configured duration restored.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.state = EngineState::Idle;
    }

    /// Re-arm the engine for a different phase (Idle, full duration).
    pub fn set_phase(&mut self, phase: Phase, duration_secs: u64) {
        self.phase = phase;
        self.duration_secs = duration_secs;
        self.reset();
    }

    /// Shrink the configured duration in place, e.g. after a settings
    /// change. Keeps the invariant remaining <= duration.
    pub fn set_duration(&mut self, duration_secs: u64) {
        self.duration_secs = duration_secs;
        if self.state == EngineState::Running {
            self.remaining_secs = self.remaining_secs.min(duration_secs);
        } else {
            self.remaining_secs = duration_secs;
        }
    }

    /// Deliver `elapsed_secs` of elapsed time. Only counts while Running.
    /// Returns true exactly when this tick completed the phase.
    pub fn tick(&mut self, elapsed_secs: u64) -> bool {
        if self.state != EngineState::Running {
            return false;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(elapsed_secs);
        if self.remaining_secs == 0 {
            self.state = EngineState::Completed;
            return true;
        }
        false
    }

    /// Force the phase to complete immediately. Returns true when a
    /// completion was produced; a phase that already completed stays put.
    pub fn skip(&mut self) -> bool {
        if self.state == EngineState::Completed {
            return false;
        }
        self.remaining_secs = 0;
        self.state = EngineState::Completed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_countdown_emits_one_completion() {
        // For any positive duration D, D one-second ticks reach exactly 0
        // and complete exactly once.
        for duration in [1u64, 5, 60, 1500] {
            let mut engine = TimerEngine::new(Phase::Work, duration);
            assert!(engine.start());

            let mut completions = 0;
            for _ in 0..duration {
                if engine.tick(1) {
                    completions += 1;
                }
            }

            assert_eq!(engine.remaining_secs(), 0);
            assert_eq!(engine.state(), EngineState::Completed);
            assert_eq!(completions, 1);

            // Further ticks are ignored after completion
            assert!(!engine.tick(1));
        }
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut engine = TimerEngine::new(Phase::Work, 60);
        engine.start();
        engine.tick(10);

        engine.pause();
        let frozen = engine.remaining_secs();
        engine.pause();

        assert_eq!(engine.state(), EngineState::Paused);
        assert_eq!(engine.remaining_secs(), frozen);

        // Ticks do not count while paused
        assert!(!engine.tick(5));
        assert_eq!(engine.remaining_secs(), frozen);
    }

    #[test]
    fn test_start_resumes_from_pause() {
        let mut engine = TimerEngine::new(Phase::Work, 60);
        engine.start();
        engine.tick(20);
        engine.pause();

        assert!(engine.start());
        assert_eq!(engine.remaining_secs(), 40);

        // Starting while already running is a no-op
        assert!(!engine.start());
    }

    #[test]
    fn test_reset_restores_full_duration() {
        let mut engine = TimerEngine::new(Phase::ShortBreak, 300);
        engine.start();
        engine.tick(120);
        engine.reset();

        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.remaining_secs(), 300);

        // Reset also clears a completion
        engine.start();
        engine.tick(300);
        assert_eq!(engine.state(), EngineState::Completed);
        engine.reset();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.remaining_secs(), 300);
    }

    #[test]
    fn test_skip_completes_once() {
        let mut engine = TimerEngine::new(Phase::Work, 60);
        engine.start();
        engine.tick(5);

        assert!(engine.skip());
        assert_eq!(engine.state(), EngineState::Completed);
        assert_eq!(engine.remaining_secs(), 0);

        // Skipping an already-completed phase emits nothing
        assert!(!engine.skip());
    }

    #[test]
    fn test_skip_works_from_idle() {
        // A manual skip before starting still moves the session forward
        let mut engine = TimerEngine::new(Phase::ShortBreak, 300);
        assert!(engine.skip());
        assert_eq!(engine.state(), EngineState::Completed);
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut engine = TimerEngine::new(Phase::Work, 3);
        engine.start();
        assert!(engine.tick(10));
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn test_set_duration_clamps_remaining_while_running() {
        let mut engine = TimerEngine::new(Phase::Work, 600);
        engine.start();
        engine.tick(60);
        engine.set_duration(120);
        assert_eq!(engine.duration_secs(), 120);
        assert!(engine.remaining_secs() <= 120);

        // While idle, the new duration is taken wholesale
        let mut engine = TimerEngine::new(Phase::Work, 600);
        engine.set_duration(120);
        assert_eq!(engine.remaining_secs(), 120);
    }
}
