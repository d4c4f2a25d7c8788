//! Studyclock - Pomodoro and revision study timer
//!
//! Terminal study timer with work/break cycling, cumulative statistics
//! and desktop notifications.

mod app;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notify_rust::Notification;
use pomodoro::{Phase, SessionStore, TimerController};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use app::{App, View};

#[derive(Parser)]
#[command(name = "studyclock")]
#[command(about = "Pomodoro and revision study timer with session statistics")]
#[command(version)]
#[command(after_help = r#"MODES:
    Pomodoro    Work/break alternation; a long break replaces the short
                one after every Nth completed work session
    Revision    A single uninterrupted study block, no breaks

KEY BINDINGS:
    space       Start or pause the timer
    r           Reset the current phase
    n           Skip to the end of the current phase
    m           Switch between Pomodoro and Revision mode
    s           Toggle the statistics view
    c           Edit timer durations
    y/n         Answer the start-next-session prompt
    q           Quit (progress is saved)

DATA:
    Completed sessions are saved to pomodoro_data.json in the platform
    data directory, with a .bak copy of the previous save next to it."#)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let paths = studyclock_core::Paths::new();
    let store = SessionStore::new(&paths.data)?;
    let (controller, events) = TimerController::new(store);
    let mut app = App::new(controller, events);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    // Frames are driven by this poll timeout; ticks arrive over the
    // event channel and are picked up on the next frame.
    let frame_timeout = Duration::from_millis(100);

    loop {
        for (phase, next) in app.drain_events() {
            notify_completion(phase, next);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(frame_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code);
                }
            }
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode) {
    // Modal prompts take the keyboard until answered
    if app.confirm_quit {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => app.quit(),
            KeyCode::Char('n') | KeyCode::Esc => app.confirm_quit = false,
            _ => {}
        }
        return;
    }

    if app.snapshot.awaiting_confirm {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => app.answer_confirm(true),
            KeyCode::Char('n') | KeyCode::Esc => app.answer_confirm(false),
            _ => {}
        }
        return;
    }

    match app.view {
        View::Timer => match code {
            KeyCode::Char(' ') => app.toggle_start_pause(),
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('n') => app.skip(),
            KeyCode::Char('m') => app.toggle_mode(),
            KeyCode::Char('s') => app.view = View::Stats,
            KeyCode::Char('c') => app.open_settings(),
            KeyCode::Char('q') => app.request_quit(),
            _ => {}
        },
        View::Stats => match code {
            KeyCode::Char('s') | KeyCode::Esc | KeyCode::Char('q') => app.view = View::Timer,
            _ => {}
        },
        View::Settings => {
            let Some(editor) = app.editor.as_mut() else {
                app.view = View::Timer;
                return;
            };
            match code {
                KeyCode::Up | KeyCode::Char('k') => editor.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => editor.select_next(),
                KeyCode::Left | KeyCode::Char('h') => editor.decrement(),
                KeyCode::Right | KeyCode::Char('l') => editor.increment(),
                KeyCode::Enter => app.apply_settings(),
                KeyCode::Esc => app.cancel_settings(),
                _ => {}
            }
        }
    }
}

fn notify_completion(phase: Phase, next: Option<Phase>) {
    let body = match next {
        Some(next_phase) => format!("{} finished. Next up: {}.", phase.label(), next_phase.label()),
        None => format!("{} finished. Well done!", phase.label()),
    };

    // The timer keeps working without a notification daemon
    if let Err(e) = Notification::new()
        .summary("Studyclock")
        .body(&body)
        .show()
    {
        debug!("desktop notification failed: {}", e);
    }
}
