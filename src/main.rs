use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use pomotick::{
    app::App,
    config::{ConfigStore, FileConfigStore},
    cue, duration, logging, theme, ui,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Redraw cadence while idle so the clock and paused state stay fresh.
const REDRAW_RATE: Duration = Duration::from_millis(250);

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone)]
#[command(author, version, about = "🍅 pomotick - A Terminal Pomodoro Timer")]
struct Args {
    /// Focus duration, e.g. 25m, 1.5h or 25:00
    #[arg(short, long, value_parser = duration::parse_duration_arg)]
    focus: Option<u32>,
    /// Break duration, e.g. 5m, 0.5m or 05:00
    #[arg(short = 'b', long = "break", value_parser = duration::parse_duration_arg)]
    break_duration: Option<u32>,
    /// Color theme
    #[arg(short = 't', long, value_parser = parse_theme)]
    theme: Option<String>,
    #[arg(long)]
    no_sound: bool,
    /// Config file to read instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective settings back to the config file
    #[arg(long)]
    save_defaults: bool,
}

fn parse_theme(s: &str) -> std::result::Result<String, String> {
    if theme::is_known(s) {
        Ok(s.to_string())
    } else {
        Err(format!("Unknown theme; expected one of {}", theme::THEMES.join(", ")))
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let store = match &args.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut config = store.load();

    // CLI overrides
    if let Some(f) = args.focus { config.focus_duration_secs = f; }
    if let Some(b) = args.break_duration { config.break_duration_secs = b; }
    if let Some(t) = args.theme { config.theme = t; }
    if args.no_sound { config.sound_enabled = false; }
    let config = config.normalized();

    if args.save_defaults {
        store.save(&config)?;
        log::info!("saved defaults to {}", store.path().display());
    }

    let mut app = App::new(
        config.initial_session(),
        cue::for_setting(config.sound_enabled),
        theme::get_theme(&config.theme),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        log::error!("run loop failed: {e}");
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render_ui(f, app))?;

        let timeout = app
            .next_deadline(Instant::now())
            .map_or(REDRAW_RATE, |due| due.min(REDRAW_RATE));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key, Instant::now()) {
                    return Ok(());
                }
            }
        }

        app.poll_interval(Instant::now());
    }
}
