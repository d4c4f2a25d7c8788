//! UI rendering

use pomodoro::{EngineState, Phase, SessionSummary, TimerMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table},
    Frame,
};
use studyclock_core::format;

use crate::app::{App, View, SETTINGS_FIELDS};

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    match app.view {
        View::Timer => draw_timer(f, app, chunks[1]),
        View::Stats => draw_stats(f, app, chunks[1]),
        View::Settings => draw_settings(f, app, chunks[1]),
    }
    draw_footer(f, app, chunks[2]);

    if app.snapshot.awaiting_confirm {
        draw_confirm_next_overlay(f, app);
    }
    if app.confirm_quit {
        draw_confirm_quit_overlay(f);
    }
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Red,
        Phase::ShortBreak => Color::Green,
        Phase::LongBreak => Color::Cyan,
        Phase::RevisionStudy => Color::Magenta,
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mode = match app.snapshot.mode {
        TimerMode::Pomodoro => "Pomodoro",
        TimerMode::Revision => "Revision",
    };

    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(" Studyclock ", Style::default().fg(Color::Cyan).bold()),
        Span::raw("- "),
        Span::styled(format!("{} mode", mode), Style::default().fg(Color::DarkGray)),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn draw_timer(f: &mut Frame, app: &App, area: Rect) {
    let snap = &app.snapshot;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Phase
            Constraint::Length(3), // Clock
            Constraint::Length(1), // Status
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Spacer
        ])
        .split(area);

    let phase = Line::from(Span::styled(
        snap.phase.label(),
        Style::default().fg(phase_color(snap.phase)).bold(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(Paragraph::new(phase), chunks[1]);

    let clock_style = match snap.state {
        EngineState::Running => Style::default().fg(Color::White).bold(),
        EngineState::Paused => Style::default().fg(Color::Yellow).bold(),
        _ => Style::default().fg(Color::DarkGray).bold(),
    };
    let clock = Paragraph::new(Line::from(Span::styled(
        snap.clock(),
        clock_style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));
    f.render_widget(clock, chunks[2]);

    let status = Line::from(Span::styled(
        snap.status_label(),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    f.render_widget(Paragraph::new(status), chunks[3]);

    // Inset the gauge so it does not span the whole terminal
    let gauge_area = centered_horizontal(chunks[4], 60);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(phase_color(snap.phase)))
        .ratio(snap.progress())
        .label(format!("{:.0}%", snap.progress() * 100.0));
    f.render_widget(gauge, gauge_area);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let summary = SessionSummary::from_record(&app.record);
    let (hours, minutes) = summary.total_time();

    let last_saved = match app.record.last_saved {
        Some(dt) => format::relative_time(dt),
        None => "never".to_string(),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(" Sessions completed: "),
            Span::styled(
                summary.sessions_completed.to_string(),
                Style::default().fg(Color::Green).bold(),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Total study time:   "),
            Span::styled(
                format!("{}h {}m", hours, minutes),
                Style::default().fg(Color::Green).bold(),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Average session:    "),
            Span::styled(
                format!("{}m", summary.average_minutes),
                Style::default().fg(Color::Green).bold(),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Last saved:         "),
            Span::styled(last_saved, Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let summary_panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics ")
            .title_style(Style::default().fg(Color::Green).bold())
            .borders(Borders::ALL),
    );
    f.render_widget(summary_panel, chunks[0]);

    let header = Row::new(vec!["Phase", "Minutes", "When"])
        .style(Style::default().fg(Color::Cyan).bold())
        .bottom_margin(1);

    let visible = chunks[1].height.saturating_sub(3) as usize;
    let rows: Vec<Row> = pomodoro::stats::recent_history(&app.record, visible)
        .into_iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.phase.label())
                    .style(Style::default().fg(phase_color(entry.phase))),
                Cell::from(entry.minutes.to_string()),
                Cell::from(format::relative_time(entry.completed_at)),
            ])
        })
        .collect();

    let rows = if rows.is_empty() {
        vec![Row::new(vec![Cell::from("No completed sessions yet")
            .style(Style::default().fg(Color::DarkGray))])]
    } else {
        rows
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Recent Sessions ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL),
    );
    f.render_widget(table, chunks[1]);
}

fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let Some(editor) = &app.editor else {
        return;
    };

    let lines: Vec<Line> = SETTINGS_FIELDS
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == editor.selected;
            let marker = if selected { " > " } else { "   " };
            let style = if selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{:<26}", field.label()), style),
                Span::styled(field.get(&editor.draft).to_string(), style),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Settings ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .borders(Borders::ALL),
    );
    f.render_widget(panel, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status_line {
        let footer = Paragraph::new(Line::from(format!(" {}", status)))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(footer, area);
        return;
    }

    let help = match app.view {
        View::Timer => Line::from(vec![
            Span::styled(" space", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" start/pause  "),
            Span::styled("r", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" reset  "),
            Span::styled("n", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" skip  "),
            Span::styled("m", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" mode  "),
            Span::styled("s", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" stats  "),
            Span::styled("c", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" settings  "),
            Span::styled("q", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" quit"),
        ]),
        View::Stats => Line::from(vec![
            Span::styled(" s/Esc", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" back to timer"),
        ]),
        View::Settings => Line::from(vec![
            Span::styled(" Up/Dn", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" select  "),
            Span::styled("Left/Right", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" adjust  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" apply  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" cancel"),
        ]),
    };

    let footer = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

fn draw_confirm_next_overlay(f: &mut Frame, app: &App) {
    let popup_area = centered_popup(f.area(), 44, 5);
    f.render_widget(Clear, popup_area);

    let next = app
        .snapshot
        .pending_next
        .map(|p| p.label())
        .unwrap_or("next session");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Start {}?", next),
            Style::default().fg(Color::White).bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            "y start now / n not yet",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ];

    let popup = Paragraph::new(text).block(
        Block::default()
            .title(" Session Complete ")
            .title_style(Style::default().fg(Color::Green).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(popup, popup_area);
}

fn draw_confirm_quit_overlay(f: &mut Frame) {
    let popup_area = centered_popup(f.area(), 44, 5);
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "The timer is still running. Quit?",
            Style::default().fg(Color::White).bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            "y quit / n keep going",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ];

    let popup = Paragraph::new(text).block(
        Block::default()
            .title(" Confirm Quit ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(popup, popup_area);
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn centered_horizontal(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}
