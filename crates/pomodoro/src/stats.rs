//! Statistics aggregation
//!
//! Read-only projection of the persisted record into summary figures for
//! the statistics view. Recomputed on demand; owns nothing.

use crate::engine::Phase;
use crate::record::{HistoryEntry, SessionRecord};

/// Aggregated session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Completed work sessions
    pub sessions_completed: u32,
    /// Minutes of completed work
    pub total_minutes: u64,
    /// Average work session length in minutes
    pub average_minutes: u32,
    /// Completed phases of any kind, breaks included
    pub phases_logged: u32,
}

impl SessionSummary {
    /// Compute summary figures from a record
    pub fn from_record(record: &SessionRecord) -> Self {
        let average_minutes = if record.total_sessions > 0 {
            (record.total_minutes / record.total_sessions as u64) as u32
        } else {
            0
        };

        Self {
            sessions_completed: record.total_sessions,
            total_minutes: record.total_minutes,
            average_minutes,
            phases_logged: record.history.len() as u32,
        }
    }

    /// Total work time as (hours, minutes)
    pub fn total_time(&self) -> (u64, u64) {
        (self.total_minutes / 60, self.total_minutes % 60)
    }
}

/// The most recent `n` history entries, newest first
pub fn recent_history(record: &SessionRecord, n: usize) -> Vec<&HistoryEntry> {
    record.history.iter().rev().take(n).collect()
}

/// Work sessions only, for the history view filter
pub fn work_history(record: &SessionRecord) -> Vec<&HistoryEntry> {
    record
        .history
        .iter()
        .filter(|e| e.phase == Phase::Work)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(work: u32, breaks: u32) -> SessionRecord {
        let mut record = SessionRecord::default();
        for _ in 0..work {
            record.log_completion(Phase::Work, 25);
        }
        for _ in 0..breaks {
            record.log_completion(Phase::ShortBreak, 5);
        }
        record
    }

    #[test]
    fn test_empty_summary() {
        let summary = SessionSummary::from_record(&SessionRecord::default());
        assert_eq!(summary, SessionSummary::default());
    }

    #[test]
    fn test_summary_figures() {
        let summary = SessionSummary::from_record(&record_with(4, 3));
        assert_eq!(summary.sessions_completed, 4);
        assert_eq!(summary.total_minutes, 100);
        assert_eq!(summary.average_minutes, 25);
        assert_eq!(summary.phases_logged, 7);
    }

    #[test]
    fn test_total_time_split() {
        let mut record = SessionRecord::default();
        for _ in 0..5 {
            record.log_completion(Phase::Work, 27);
        }
        let summary = SessionSummary::from_record(&record);
        assert_eq!(summary.total_time(), (2, 15));
    }

    #[test]
    fn test_recent_history_newest_first() {
        let record = record_with(2, 1);
        let recent = recent_history(&record, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].phase, Phase::ShortBreak);
        assert_eq!(recent[1].phase, Phase::Work);
    }

    #[test]
    fn test_work_history_filters_breaks() {
        let record = record_with(2, 3);
        assert_eq!(work_history(&record).len(), 2);
    }
}
