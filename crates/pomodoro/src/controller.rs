//! Timer controller
//!
//! Owns the engine, sequencer, record and store behind a single mutex and
//! drives ticking from a dedicated background thread. The foreground only
//! ever calls intent methods and reads snapshots; state flows back over
//! the event channel.
//!
//! Cancellation discipline: `pause`, `reset`, `skip` and mode changes stop
//! the ticker and join it before touching state, so no tick can land after
//! the call returns. A phase completion is processed in full (sequencing,
//! record update, save) under the lock before the confirm gate opens, so a
//! rapid confirm can never double count.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::engine::{Phase, TimerEngine};
use crate::event::CoreEvent;
use crate::record::SessionRecord;
use crate::sequencer::SessionSequencer;
use crate::settings::{ConfigError, TimerMode, TimerSettings};
use crate::store::SessionStore;
use crate::view::TimerSnapshot;

/// Ticker sleeps in short slices so cancellation joins promptly
const SLICE: Duration = Duration::from_millis(100);
const SLICES_PER_TICK: u32 = 10;

struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

struct CoreState {
    settings: TimerSettings,
    engine: TimerEngine,
    sequencer: SessionSequencer,
    record: SessionRecord,
    store: SessionStore,
    awaiting_confirm: bool,
    pending_next: Option<Phase>,
}

impl CoreState {
    /// Re-arm the engine for a phase at its configured duration
    fn arm(&mut self, phase: Phase) {
        let secs = self.settings.phase_secs(phase);
        self.engine.set_phase(phase, secs);
    }

    /// Process a completion end to end: sequencing, record update, save,
    /// next-phase arming. Runs under the state lock.
    fn handle_completion(&mut self, events: &Sender<CoreEvent>) {
        let phase = self.engine.phase();
        let next = self.sequencer.complete(phase, &self.settings, &mut self.record);

        if phase == Phase::Work {
            self.persist(events);
        }

        match next {
            Some(next_phase) => {
                self.arm(next_phase);
                self.awaiting_confirm = true;
                self.pending_next = Some(next_phase);
            }
            // Revision: the session is over; leave the engine idle and
            // ready for another block.
            None => self.arm(phase),
        }

        let _ = events.send(CoreEvent::PhaseCompleted { phase, next });
    }

    fn persist(&mut self, events: &Sender<CoreEvent>) {
        self.record.settings = self.settings;
        self.record.last_saved = Some(Utc::now());

        match self.store.save(&self.record) {
            Ok(()) => {
                debug!("session data saved to {}", self.store.path().display());
                let _ = events.send(CoreEvent::SaveSucceeded);
            }
            Err(e) => {
                warn!("could not save session data: {}", e);
                let _ = events.send(CoreEvent::SaveFailed {
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// The core's public surface: user intents in, snapshots and events out
pub struct TimerController {
    shared: Arc<Mutex<CoreState>>,
    events: Sender<CoreEvent>,
    ticker: Option<Ticker>,
}

impl TimerController {
    /// Load persisted state from the store and build an idle controller.
    /// Returns the controller and the receiving end of the event channel.
    pub fn new(store: SessionStore) -> (Self, Receiver<CoreEvent>) {
        let record = store.load();
        let settings = record.settings;
        let first = settings.mode.first_phase();
        let engine = TimerEngine::new(first, settings.phase_secs(first));

        let (events, receiver) = channel();
        let state = CoreState {
            settings,
            engine,
            sequencer: SessionSequencer::new(),
            record,
            store,
            awaiting_confirm: false,
            pending_next: None,
        };

        (
            Self {
                shared: Arc::new(Mutex::new(state)),
                events,
                ticker: None,
            },
            receiver,
        )
    }

    fn lock(&self) -> MutexGuard<'_, CoreState> {
        lock_state(&self.shared)
    }

    /// Begin or resume ticking. Ignored while a completion awaits
    /// confirmation; while already Running the live ticker is left alone.
    pub fn start(&mut self) {
        let started = {
            let mut state = self.lock();
            !state.awaiting_confirm && state.engine.start()
        };
        // Only a real Idle/Paused -> Running transition needs a ticker;
        // any previous one has already run to completion.
        if started {
            self.spawn_ticker();
        }
    }

    /// Freeze the countdown. The ticker is joined before state changes.
    pub fn pause(&mut self) {
        self.cancel_ticker();
        self.lock().engine.pause();
    }

    /// Back to Idle with the full duration of the current phase.
    pub fn reset(&mut self) {
        self.cancel_ticker();
        let mut state = self.lock();
        state.engine.reset();
        state.awaiting_confirm = false;
        state.pending_next = None;
    }

    /// Complete the current phase immediately, emitting the same
    /// completion event a natural expiry would.
    pub fn skip(&mut self) {
        self.cancel_ticker();
        let mut state = self.lock();
        if state.engine.skip() {
            state.handle_completion(&self.events);
        }
    }

    /// Answer the "start next session?" prompt. Declining leaves the
    /// engine idle at the already-selected next phase; an answer with no
    /// prompt pending changes nothing.
    pub fn confirm_next(&mut self, start_now: bool) {
        let started = {
            let mut state = self.lock();
            if !state.awaiting_confirm {
                return;
            }
            state.awaiting_confirm = false;
            state.pending_next = None;
            start_now && state.engine.start()
        };
        if started {
            self.spawn_ticker();
        }
    }

    /// Apply new settings. Invalid settings are rejected and the previous
    /// ones stay in effect. A mode change while running forces a reset.
    pub fn change_settings(&mut self, new: TimerSettings) -> Result<(), ConfigError> {
        new.validate()?;

        let mode_changed = self.lock().settings.mode != new.mode;
        if mode_changed {
            self.cancel_ticker();
        }

        let mut state = self.lock();
        state.settings = new;
        if mode_changed {
            state.engine.reset();
            state.awaiting_confirm = false;
            state.pending_next = None;
            state.sequencer = SessionSequencer::new();
            let first = new.mode.first_phase();
            state.arm(first);
        } else {
            let phase = state.engine.phase();
            let secs = state.settings.phase_secs(phase);
            state.engine.set_duration(secs);
        }
        state.persist(&self.events);
        Ok(())
    }

    /// Switch between Pomodoro and Revision, keeping the durations.
    pub fn change_mode(&mut self, mode: TimerMode) {
        let new = {
            let state = self.lock();
            TimerSettings {
                mode,
                ..state.settings
            }
        };
        // Durations are unchanged, so validation cannot fail here
        let _ = self.change_settings(new);
    }

    /// Persist the record now, e.g. before exit.
    pub fn save(&mut self) {
        let mut state = self.lock();
        state.persist(&self.events);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let state = self.lock();
        TimerSnapshot {
            phase: state.engine.phase(),
            state: state.engine.state(),
            remaining_secs: state.engine.remaining_secs(),
            duration_secs: state.engine.duration_secs(),
            mode: state.settings.mode,
            awaiting_confirm: state.awaiting_confirm,
            pending_next: state.pending_next,
        }
    }

    pub fn settings(&self) -> TimerSettings {
        self.lock().settings
    }

    pub fn record(&self) -> SessionRecord {
        self.lock().record.clone()
    }

    fn spawn_ticker(&mut self) {
        self.cancel_ticker();
        let stop = Arc::new(AtomicBool::new(false));
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let thread_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || tick_loop(shared, events, thread_stop));
        self.ticker = Some(Ticker { stop, handle });
    }

    /// Stop the ticker and wait for it; after this returns no further
    /// tick can observe or mutate state.
    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop.store(true, Ordering::Relaxed);
            let _ = ticker.handle.join();
        }
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn lock_state(shared: &Arc<Mutex<CoreState>>) -> MutexGuard<'_, CoreState> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn tick_loop(shared: Arc<Mutex<CoreState>>, events: Sender<CoreEvent>, stop: Arc<AtomicBool>) {
    let mut slices = 0;
    loop {
        thread::sleep(SLICE);
        if stop.load(Ordering::Relaxed) {
            return;
        }
        slices += 1;
        if slices < SLICES_PER_TICK {
            continue;
        }
        slices = 0;

        let mut state = lock_state(&shared);
        if !state.engine.is_running() {
            return;
        }

        let completed = state.engine.tick(1);
        let _ = events.send(CoreEvent::Tick {
            phase: state.engine.phase(),
            remaining_secs: state.engine.remaining_secs(),
        });

        if completed {
            state.handle_completion(&events);
            return;
        }
    }
}
