//! Persisted session record
//!
//! The single flat document written to disk: cumulative totals, the
//! completion history and the settings in effect when it was last saved.
//! Totals only move forward; nothing here deletes history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Phase;
use crate::settings::TimerSettings;

/// One completed phase in the history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub phase: Phase,
    /// Configured phase length in minutes
    pub minutes: u32,
    pub completed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(phase: Phase, minutes: u32) -> Self {
        Self {
            phase,
            minutes,
            completed_at: Utc::now(),
        }
    }
}

/// Cumulative statistics and settings, persisted as one JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Completed work sessions, all time
    #[serde(default)]
    pub total_sessions: u32,
    /// Minutes of completed work sessions, all time
    #[serde(default)]
    pub total_minutes: u64,
    /// Every completed phase, oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub settings: TimerSettings,
    #[serde(default)]
    pub last_saved: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Append a completed phase to the history; only Work completions
    /// move the totals.
    pub fn log_completion(&mut self, phase: Phase, minutes: u32) {
        self.history.push(HistoryEntry::new(phase, minutes));
        if phase == Phase::Work {
            self.total_sessions += 1;
            self.total_minutes += minutes as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_completion_moves_totals() {
        let mut record = SessionRecord::default();
        record.log_completion(Phase::Work, 25);

        assert_eq!(record.total_sessions, 1);
        assert_eq!(record.total_minutes, 25);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].phase, Phase::Work);
    }

    #[test]
    fn test_break_completion_only_logged() {
        let mut record = SessionRecord::default();
        record.log_completion(Phase::ShortBreak, 5);
        record.log_completion(Phase::LongBreak, 15);

        assert_eq!(record.total_sessions, 0);
        assert_eq!(record.total_minutes, 0);
        assert_eq!(record.history.len(), 2);
    }

    #[test]
    fn test_record_json_round_trip() {
        let mut record = SessionRecord::default();
        record.log_completion(Phase::Work, 25);
        record.log_completion(Phase::ShortBreak, 5);
        record.last_saved = Some(Utc::now());

        let json = serde_json::to_string_pretty(&record).unwrap();
        let parsed: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_empty_document_is_default_record() {
        let parsed: SessionRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, SessionRecord::default());
    }
}
