//! Timer configuration
//!
//! Durations are stored in whole minutes; the engine works in seconds.
//! Invalid values are rejected when a settings change is applied, never
//! at tick time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Phase;

/// Errors raised when applying a settings change
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be at least 1 minute")]
    ZeroDuration(&'static str),

    #[error("cycles before long break must be at least 1")]
    ZeroCycles,
}

/// Which kind of study session the timer runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Work/break alternation with a long break every Nth cycle
    Pomodoro,
    /// A single uninterrupted study block, no break phases
    Revision,
}

impl TimerMode {
    /// The phase a fresh session in this mode begins with
    pub fn first_phase(&self) -> Phase {
        match self {
            TimerMode::Pomodoro => Phase::Work,
            TimerMode::Revision => Phase::RevisionStudy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Pomodoro",
            TimerMode::Revision => "Revision",
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Pomodoro
    }
}

/// Timer durations and sequencing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Work phase length in minutes
    #[serde(default = "default_work")]
    pub work_minutes: u32,
    /// Short break length in minutes
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break length in minutes
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Revision block length in minutes
    #[serde(default = "default_revision")]
    pub revision_minutes: u32,
    /// Completed work cycles before a long break
    #[serde(default = "default_cycles")]
    pub cycles_before_long_break: u32,
    #[serde(default)]
    pub mode: TimerMode,
}

fn default_work() -> u32 {
    25
}

fn default_short_break() -> u32 {
    5
}

fn default_long_break() -> u32 {
    15
}

fn default_revision() -> u32 {
    60
}

fn default_cycles() -> u32 {
    4
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            revision_minutes: default_revision(),
            cycles_before_long_break: default_cycles(),
            mode: TimerMode::default(),
        }
    }
}

impl TimerSettings {
    /// Check that every duration and the cycle count are positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_minutes == 0 {
            return Err(ConfigError::ZeroDuration("work duration"));
        }
        if self.short_break_minutes == 0 {
            return Err(ConfigError::ZeroDuration("short break duration"));
        }
        if self.long_break_minutes == 0 {
            return Err(ConfigError::ZeroDuration("long break duration"));
        }
        if self.revision_minutes == 0 {
            return Err(ConfigError::ZeroDuration("revision duration"));
        }
        if self.cycles_before_long_break == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        Ok(())
    }

    /// Configured length of a phase in minutes
    pub fn phase_minutes(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
            Phase::RevisionStudy => self.revision_minutes,
        }
    }

    /// Configured length of a phase in seconds
    pub fn phase_secs(&self, phase: Phase) -> u64 {
        self.phase_minutes(phase) as u64 * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = TimerSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.work_minutes, 25);
        assert_eq!(settings.cycles_before_long_break, 4);
        assert_eq!(settings.mode, TimerMode::Pomodoro);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let settings = TimerSettings {
            work_minutes: 0,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::ZeroDuration("work duration"))
        );

        let settings = TimerSettings {
            cycles_before_long_break: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroCycles));
    }

    #[test]
    fn test_phase_secs() {
        let settings = TimerSettings::default();
        assert_eq!(settings.phase_secs(Phase::Work), 25 * 60);
        assert_eq!(settings.phase_secs(Phase::ShortBreak), 5 * 60);
        assert_eq!(settings.phase_secs(Phase::LongBreak), 15 * 60);
        assert_eq!(settings.phase_secs(Phase::RevisionStudy), 60 * 60);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: TimerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, TimerSettings::default());
    }
}
