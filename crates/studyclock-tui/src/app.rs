//! Application state for the TUI

use std::sync::mpsc::Receiver;

use pomodoro::{
    CoreEvent, EngineState, Phase, SessionRecord, TimerController, TimerMode, TimerSettings,
    TimerSnapshot,
};
use tracing::warn;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Timer,
    Stats,
    Settings,
}

/// Editable settings fields, in display order
pub const SETTINGS_FIELDS: [SettingsField; 5] = [
    SettingsField::Work,
    SettingsField::ShortBreak,
    SettingsField::LongBreak,
    SettingsField::Revision,
    SettingsField::Cycles,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Work,
    ShortBreak,
    LongBreak,
    Revision,
    Cycles,
}

impl SettingsField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Work => "Work minutes",
            SettingsField::ShortBreak => "Short break minutes",
            SettingsField::LongBreak => "Long break minutes",
            SettingsField::Revision => "Revision minutes",
            SettingsField::Cycles => "Cycles before long break",
        }
    }

    pub fn get(&self, settings: &TimerSettings) -> u32 {
        match self {
            SettingsField::Work => settings.work_minutes,
            SettingsField::ShortBreak => settings.short_break_minutes,
            SettingsField::LongBreak => settings.long_break_minutes,
            SettingsField::Revision => settings.revision_minutes,
            SettingsField::Cycles => settings.cycles_before_long_break,
        }
    }

    fn get_mut<'a>(&self, settings: &'a mut TimerSettings) -> &'a mut u32 {
        match self {
            SettingsField::Work => &mut settings.work_minutes,
            SettingsField::ShortBreak => &mut settings.short_break_minutes,
            SettingsField::LongBreak => &mut settings.long_break_minutes,
            SettingsField::Revision => &mut settings.revision_minutes,
            SettingsField::Cycles => &mut settings.cycles_before_long_break,
        }
    }
}

/// In-progress settings edit; nothing is applied until confirmed
pub struct SettingsEditor {
    pub draft: TimerSettings,
    pub selected: usize,
}

impl SettingsEditor {
    fn new(current: TimerSettings) -> Self {
        Self {
            draft: current,
            selected: 0,
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected == 0 {
            self.selected = SETTINGS_FIELDS.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SETTINGS_FIELDS.len();
    }

    pub fn decrement(&mut self) {
        let value = SETTINGS_FIELDS[self.selected].get_mut(&mut self.draft);
        // Durations of zero are rejected downstream anyway
        *value = value.saturating_sub(1).max(1);
    }

    pub fn increment(&mut self) {
        let value = SETTINGS_FIELDS[self.selected].get_mut(&mut self.draft);
        *value = value.saturating_add(1).min(999);
    }
}

pub struct App {
    pub controller: TimerController,
    events: Receiver<CoreEvent>,
    pub view: View,
    pub snapshot: TimerSnapshot,
    pub record: SessionRecord,
    pub editor: Option<SettingsEditor>,
    /// One-line status shown in the footer until the next one replaces it
    pub status_line: Option<String>,
    pub confirm_quit: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: TimerController, events: Receiver<CoreEvent>) -> Self {
        let snapshot = controller.snapshot();
        let record = controller.record();
        Self {
            controller,
            events,
            view: View::Timer,
            snapshot,
            record,
            editor: None,
            status_line: None,
            confirm_quit: false,
            should_quit: false,
        }
    }

    /// Drain core events and refresh the cached snapshot. Returns the
    /// completions seen this frame so the caller can raise notifications.
    pub fn drain_events(&mut self) -> Vec<(Phase, Option<Phase>)> {
        let mut completed = Vec::new();
        for event in self.events.try_iter() {
            match event {
                CoreEvent::Tick { .. } => {}
                CoreEvent::PhaseCompleted { phase, next } => completed.push((phase, next)),
                CoreEvent::SaveSucceeded => {
                    self.status_line = Some("Progress saved".to_string());
                }
                CoreEvent::SaveFailed { reason } => {
                    warn!("save failed: {}", reason);
                    self.status_line = Some(format!("Save failed: {}", reason));
                }
            }
        }
        self.refresh();
        completed
    }

    pub fn refresh(&mut self) {
        self.snapshot = self.controller.snapshot();
        self.record = self.controller.record();
    }

    pub fn toggle_start_pause(&mut self) {
        if self.snapshot.state == EngineState::Running {
            self.controller.pause();
        } else {
            self.controller.start();
        }
        self.refresh();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.refresh();
    }

    pub fn skip(&mut self) {
        self.controller.skip();
        self.refresh();
    }

    pub fn toggle_mode(&mut self) {
        let mode = match self.snapshot.mode {
            TimerMode::Pomodoro => TimerMode::Revision,
            TimerMode::Revision => TimerMode::Pomodoro,
        };
        self.controller.change_mode(mode);
        self.status_line = Some(format!("Switched to {} mode", mode.as_str()));
        self.refresh();
    }

    pub fn answer_confirm(&mut self, start_now: bool) {
        self.controller.confirm_next(start_now);
        self.refresh();
    }

    pub fn open_settings(&mut self) {
        self.editor = Some(SettingsEditor::new(self.controller.settings()));
        self.view = View::Settings;
    }

    /// Apply the draft settings; invalid drafts keep the editor open
    pub fn apply_settings(&mut self) {
        if let Some(editor) = self.editor.take() {
            match self.controller.change_settings(editor.draft) {
                Ok(()) => {
                    self.status_line = Some("Settings applied".to_string());
                    self.view = View::Timer;
                }
                Err(e) => {
                    self.status_line = Some(e.to_string());
                    self.editor = Some(editor);
                }
            }
        }
        self.refresh();
    }

    pub fn cancel_settings(&mut self) {
        self.editor = None;
        self.view = View::Timer;
    }

    /// Quit, or ask first when the countdown is running
    pub fn request_quit(&mut self) {
        if self.snapshot.state == EngineState::Running {
            self.confirm_quit = true;
        } else {
            self.quit();
        }
    }

    pub fn quit(&mut self) {
        self.controller.save();
        self.should_quit = true;
    }
}
