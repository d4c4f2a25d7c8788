//! pomodoro - Study timer core for studyclock
//!
//! Implements the timer behind the studyclock front end:
//! - A tick-driven countdown engine (work, short break, long break, revision)
//! - Session sequencing with a long break every Nth completed work cycle
//! - Cumulative statistics persisted to a flat JSON file with one backup
//! - A controller that drives ticking from a background thread and reports
//!   back to the UI over an event channel
//!
//! The rendering layer lives in the `studyclock-tui` crate; this crate only
//! exposes state, events and user-intent operations.

pub mod controller;
pub mod engine;
pub mod event;
pub mod record;
pub mod sequencer;
pub mod settings;
pub mod stats;
pub mod store;
pub mod view;

pub use controller::TimerController;
pub use engine::{EngineState, Phase, TimerEngine};
pub use event::CoreEvent;
pub use record::{HistoryEntry, SessionRecord};
pub use sequencer::SessionSequencer;
pub use settings::{ConfigError, TimerMode, TimerSettings};
pub use stats::SessionSummary;
pub use store::{SessionStore, StoreError};
pub use view::TimerSnapshot;
