use ratatui::{prelude::*, widgets::*};

use crate::{
    app::{App, Control},
    duration::format_duration,
    session::{Phase, SessionState},
};

// ============================================================================
// UI Rendering
// ============================================================================

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(f.size());

    // Header
    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border_color))
        .title(Span::styled(" 🍅 POMOTICK ", Style::default()
            .fg(app.theme.accent_color).add_modifier(Modifier::BOLD)));
    f.render_widget(header, chunks[0]);

    render_durations(f, app, chunks[1]);
    render_controls(f, app, chunks[2]);
    render_session(f, app, chunks[3]);
    render_footer(f, chunks[4]);
}

fn phase_color(app: &App, phase: Phase) -> Color {
    match phase {
        Phase::Focusing => app.theme.focus_color,
        Phase::OnBreak => app.theme.break_color,
    }
}

fn render_durations(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let s = app.session();
    let style = if s.can_adjust_durations() {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    for (col, label) in [
        (cols[0], format!("Focus Duration: {}", format_duration(s.focus_duration_secs))),
        (cols[1], format!("Break Duration: {}", format_duration(s.break_duration_secs))),
    ] {
        f.render_widget(
            Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(app.theme.border_color))),
            col,
        );
    }
}

/// One line per control row; disabled controls are dimmed.
pub fn control_lines(app: &App) -> Vec<Line<'static>> {
    let span = |control: Control| -> Vec<Span<'static>> {
        let glyph = match control {
            Control::DecreaseFocus | Control::DecreaseBreak => "−",
            Control::IncreaseFocus | Control::IncreaseBreak => "+",
            Control::PlayPause if app.is_timer_running() => "⏸",
            Control::PlayPause => "▶",
            Control::Stop => "■",
        };
        let (key_style, text_style) = if app.is_enabled(control) {
            (
                Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray),
            )
        } else {
            (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
        };
        vec![
            Span::styled(format!("[{}]", control.key_hint()), key_style),
            Span::styled(format!(" {} {}   ", glyph, control.test_id()), text_style),
        ]
    };

    let row = |controls: &[Control]| Line::from(controls.iter().flat_map(|&c| span(c)).collect::<Vec<_>>());

    vec![
        row(&Control::ALL[..4]),
        row(&Control::ALL[4..]),
    ]
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(
        Paragraph::new(control_lines(app))
            .alignment(Alignment::Center)
            .block(Block::default()
                .title(" Controls ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color))),
        area,
    );
}

/// Phase label with its configured length, e.g. `Focusing for 25:00 minutes`.
pub fn phase_title(s: &SessionState) -> String {
    format!("{} for {} minutes", s.phase.label(), format_duration(s.active_duration()))
}

pub fn remaining_text(s: &SessionState) -> String {
    format!("{} remaining", format_duration(s.remaining_secs()))
}

fn render_session(f: &mut Frame, app: &App, area: Rect) {
    let s = app.session();

    if s.is_stopped {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("Adjust durations, then press Space to start",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
            ])
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let color = phase_color(app, s.phase);

    f.render_widget(
        Paragraph::new(phase_title(s))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[0],
    );
    f.render_widget(
        Paragraph::new(remaining_text(s))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        sections[1],
    );

    if app.is_paused() {
        f.render_widget(
            Paragraph::new("⏸  PAUSED")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            sections[3],
        );
    }

    // Progress
    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(s.percent_complete().round() as u16),
        sections[4],
    );
}

fn render_footer(f: &mut Frame, area: Rect) {
    let now = chrono::Local::now();
    let lines = vec![
        Line::from(Span::styled(now.format("%A, %B %d, %Y  %I:%M %p").to_string(),
            Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("Q/Esc: Quit", Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cue::Silent, theme::get_theme};
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn new_app() -> App {
        App::new(SessionState::default(), Box::new(Silent), get_theme("default"))
    }

    #[test]
    fn stopped_screen_shows_durations_without_session() {
        let app = new_app();
        let text = screen_text(&app);
        assert!(text.contains("Focus Duration: 25:00"));
        assert!(text.contains("Break Duration: 05:00"));
        assert!(text.contains("increase-focus"));
        assert!(!text.contains("remaining"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn paused_badge_only_when_paused() {
        let mut app = new_app();
        let now = Instant::now();

        app.press(Control::PlayPause, now);
        let running = screen_text(&app);
        assert!(running.contains("25:00 remaining"));
        assert!(!running.contains("PAUSED"));

        app.press(Control::PlayPause, now);
        assert!(screen_text(&app).contains("PAUSED"));

        app.press(Control::Stop, now);
        assert!(!screen_text(&app).contains("PAUSED"));
    }

    #[test]
    fn session_text_tracks_elapsed() {
        let mut app = new_app();
        app.press(Control::PlayPause, Instant::now());
        for _ in 0..90 {
            app.on_tick();
        }
        assert_eq!(phase_title(app.session()), "Focusing for 25:00 minutes");
        assert_eq!(remaining_text(app.session()), "23:30 remaining");
    }
}
