//! Session sequencing
//!
//! Decides what comes after a completed phase. In Pomodoro mode the order
//! is Work -> break -> Work -> ..., with a long break replacing the short
//! one after every Nth completed work cycle. Revision mode is a single
//! phase; its completion ends the session and never touches the record.

use crate::engine::Phase;
use crate::record::SessionRecord;
use crate::settings::{TimerMode, TimerSettings};

/// Phase-transition policy and work-cycle accounting
#[derive(Debug, Clone, Default)]
pub struct SessionSequencer {
    cycles_completed: u32,
}

impl SessionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed work cycles in the current run
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// The phase that would follow `phase`, without applying anything.
    /// `None` means the session ends (Revision mode).
    pub fn peek_next(&self, phase: Phase, settings: &TimerSettings) -> Option<Phase> {
        if settings.mode == TimerMode::Revision {
            return None;
        }

        match phase {
            Phase::Work => {
                if (self.cycles_completed + 1) % settings.cycles_before_long_break == 0 {
                    Some(Phase::LongBreak)
                } else {
                    Some(Phase::ShortBreak)
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Some(Phase::Work),
            // Revision phase outside revision mode has no successor
            Phase::RevisionStudy => None,
        }
    }

    /// Apply a phase completion: log it, advance the cycle count and
    /// return the next-phase candidate. Revision completions leave the
    /// record untouched.
    pub fn complete(
        &mut self,
        phase: Phase,
        settings: &TimerSettings,
        record: &mut SessionRecord,
    ) -> Option<Phase> {
        if settings.mode == TimerMode::Revision {
            return None;
        }

        let next = self.peek_next(phase, settings);
        record.log_completion(phase, settings.phase_minutes(phase));
        if phase == Phase::Work {
            self.cycles_completed += 1;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_break_every_fourth_cycle() {
        let settings = TimerSettings::default();
        let mut sequencer = SessionSequencer::new();
        let mut record = SessionRecord::default();

        let mut breaks = Vec::new();
        for _ in 0..4 {
            let next = sequencer
                .complete(Phase::Work, &settings, &mut record)
                .unwrap();
            breaks.push(next);
            // Finish the break to return to work
            assert_eq!(
                sequencer.complete(next, &settings, &mut record),
                Some(Phase::Work)
            );
        }

        assert_eq!(
            breaks,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak
            ]
        );
        assert_eq!(sequencer.cycles_completed(), 4);
    }

    #[test]
    fn test_work_completion_updates_record() {
        let settings = TimerSettings::default();
        let mut sequencer = SessionSequencer::new();
        let mut record = SessionRecord::default();

        let next = sequencer.complete(Phase::Work, &settings, &mut record);
        assert_eq!(next, Some(Phase::ShortBreak));
        assert_eq!(record.total_sessions, 1);
        assert_eq!(record.total_minutes, 25);
    }

    #[test]
    fn test_break_completion_does_not_count_work() {
        let settings = TimerSettings::default();
        let mut sequencer = SessionSequencer::new();
        let mut record = SessionRecord::default();

        // Skipping or finishing a break must never move the totals
        sequencer.complete(Phase::ShortBreak, &settings, &mut record);
        sequencer.complete(Phase::LongBreak, &settings, &mut record);

        assert_eq!(record.total_sessions, 0);
        assert_eq!(record.total_minutes, 0);
        assert_eq!(sequencer.cycles_completed(), 0);
        assert_eq!(record.history.len(), 2);
    }

    #[test]
    fn test_revision_has_no_successor_and_no_record() {
        let settings = TimerSettings {
            mode: TimerMode::Revision,
            ..Default::default()
        };
        let mut sequencer = SessionSequencer::new();
        let mut record = SessionRecord::default();

        let next = sequencer.complete(Phase::RevisionStudy, &settings, &mut record);
        assert_eq!(next, None);
        assert_eq!(record, SessionRecord::default());
    }

    #[test]
    fn test_custom_cycle_count() {
        let settings = TimerSettings {
            cycles_before_long_break: 2,
            ..Default::default()
        };
        let mut sequencer = SessionSequencer::new();
        let mut record = SessionRecord::default();

        assert_eq!(
            sequencer.complete(Phase::Work, &settings, &mut record),
            Some(Phase::ShortBreak)
        );
        assert_eq!(
            sequencer.complete(Phase::Work, &settings, &mut record),
            Some(Phase::LongBreak)
        );
    }
}
