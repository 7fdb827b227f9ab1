use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::{
    cue::AudioCue,
    scheduler::{Interval, IntervalHandle},
    session::{self, DurationField, SessionState},
    theme::Theme,
};

// ============================================================================
// Controls
// ============================================================================

/// Every interactive affordance of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    DecreaseFocus,
    IncreaseFocus,
    DecreaseBreak,
    IncreaseBreak,
    PlayPause,
    Stop,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Self::DecreaseFocus,
        Self::IncreaseFocus,
        Self::DecreaseBreak,
        Self::IncreaseBreak,
        Self::PlayPause,
        Self::Stop,
    ];

    /// Stable identifier used by automated UI tests.
    pub fn test_id(self) -> &'static str {
        match self {
            Self::DecreaseFocus => "decrease-focus",
            Self::IncreaseFocus => "increase-focus",
            Self::DecreaseBreak => "decrease-break",
            Self::IncreaseBreak => "increase-break",
            Self::PlayPause => "play-pause",
            Self::Stop => "stop",
        }
    }

    pub fn key_hint(self) -> &'static str {
        match self {
            Self::DecreaseFocus => "f/↓",
            Self::IncreaseFocus => "F/↑",
            Self::DecreaseBreak => "b/←",
            Self::IncreaseBreak => "B/→",
            Self::PlayPause => "Space",
            Self::Stop => "s",
        }
    }

    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('f') | KeyCode::Down => Some(Self::DecreaseFocus),
            KeyCode::Char('F') | KeyCode::Up => Some(Self::IncreaseFocus),
            KeyCode::Char('b') | KeyCode::Left => Some(Self::DecreaseBreak),
            KeyCode::Char('B') | KeyCode::Right => Some(Self::IncreaseBreak),
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Self::PlayPause),
            KeyCode::Char('s') => Some(Self::Stop),
            _ => None,
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    session: SessionState,
    initial: SessionState,
    is_timer_running: bool,
    interval: Interval,
    /// Arming that belongs to the current run; `None` while paused or stopped.
    tick_handle: Option<IntervalHandle>,
    cue: Box<dyn AudioCue>,
    pub theme: Theme,
}

impl App {
    pub fn new(initial: SessionState, cue: Box<dyn AudioCue>, theme: Theme) -> Self {
        Self::with_interval(initial, cue, theme, Interval::default())
    }

    pub fn with_interval(
        initial: SessionState,
        cue: Box<dyn AudioCue>,
        theme: Theme,
        interval: Interval,
    ) -> Self {
        Self {
            session: initial,
            initial,
            is_timer_running: false,
            interval,
            tick_handle: None,
            cue,
            theme,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_timer_running(&self) -> bool {
        self.is_timer_running
    }

    /// Started but not currently counting down.
    pub fn is_paused(&self) -> bool {
        !self.is_timer_running && !self.session.is_stopped
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::DecreaseFocus
            | Control::IncreaseFocus
            | Control::DecreaseBreak
            | Control::IncreaseBreak => self.session.can_adjust_durations(),
            Control::PlayPause => true,
            Control::Stop => self.session.can_stop(),
        }
    }

    /// Applies a control at time `now`. Disabled controls are ignored.
    pub fn press(&mut self, control: Control, now: Instant) {
        if !self.is_enabled(control) {
            log::debug!("ignoring disabled control {}", control.test_id());
            return;
        }

        match control {
            Control::DecreaseFocus => self.session = self.session.decreased(DurationField::Focus),
            Control::IncreaseFocus => self.session = self.session.increased(DurationField::Focus),
            Control::DecreaseBreak => self.session = self.session.decreased(DurationField::Break),
            Control::IncreaseBreak => self.session = self.session.increased(DurationField::Break),
            Control::PlayPause => self.play_pause(now),
            Control::Stop => self.stop(),
        }
    }

    fn play_pause(&mut self, now: Instant) {
        self.is_timer_running = !self.is_timer_running;
        self.session = self.session.started();

        if self.is_timer_running {
            self.tick_handle = Some(self.interval.start(now));
            log::info!("timer running ({})", self.session.phase.label());
        } else {
            self.cancel_ticks();
            log::info!("timer paused at {}s", self.session.elapsed_secs);
        }
    }

    fn stop(&mut self) {
        self.session = self.initial;
        self.is_timer_running = false;
        self.cancel_ticks();
        log::info!("session stopped");
    }

    fn cancel_ticks(&mut self) {
        self.interval.cancel();
        self.tick_handle = None;
    }

    /// One second of session time. Only advances while running.
    pub fn on_tick(&mut self) {
        if !self.is_timer_running {
            return;
        }

        let update = session::tick(&self.session, self.cue.as_ref());
        if update.phase_completed {
            log::info!("{} -> {}", self.session.phase.label(), update.phase.label());
        }
        self.session = self.session.apply_tick(update);
    }

    /// Fires the tick if the interval is due. Returns whether it did.
    pub fn poll_interval(&mut self, now: Instant) -> bool {
        let Some(handle) = self.tick_handle else {
            return false;
        };
        if !self.interval.is_current(handle) {
            log::debug!("dropping tick from a stale interval");
            self.tick_handle = None;
            return false;
        }

        if self.interval.poll(now) {
            self.on_tick();
            true
        } else {
            false
        }
    }

    /// How long the event loop may block before the next tick is due.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.interval.time_until_due(now)
    }

    /// Handles a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return true;
        }

        if let Some(control) = Control::from_key(&key) {
            self.press(control, now);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cue::CountingCue, session::Phase, theme::get_theme};

    fn app_with_cue() -> (App, CountingCue) {
        let cue = CountingCue::default();
        let app = App::new(SessionState::default(), Box::new(cue.clone()), get_theme("default"));
        (app, cue)
    }

    #[test]
    fn adjusting_focus_before_start() {
        let (mut app, _) = app_with_cue();
        let now = Instant::now();
        app.press(Control::IncreaseFocus, now);
        assert_eq!(app.session().focus_duration_secs, 1800);
        app.press(Control::DecreaseFocus, now);
        app.press(Control::DecreaseFocus, now);
        assert_eq!(app.session().focus_duration_secs, 1200);
    }

    #[test]
    fn full_focus_phase_flips_to_break() {
        let (mut app, cue) = app_with_cue();
        app.press(Control::PlayPause, Instant::now());
        for _ in 0..1500 {
            app.on_tick();
        }
        assert_eq!(app.session().phase, Phase::OnBreak);
        assert_eq!(app.session().elapsed_secs, 0);
        assert_eq!(cue.count(), 1);
    }

    #[test]
    fn stop_mid_session_restores_defaults() {
        let (mut app, _) = app_with_cue();
        let now = Instant::now();
        app.press(Control::PlayPause, now);
        for _ in 0..1600 {
            app.on_tick();
        }
        assert_ne!(*app.session(), SessionState::default());
        app.press(Control::Stop, now);
        assert_eq!(*app.session(), SessionState::default());
        assert!(!app.is_timer_running());
        assert_eq!(app.next_deadline(now), None);
    }

    #[test]
    fn stop_is_idempotent_when_stopped() {
        let (mut app, _) = app_with_cue();
        app.press(Control::Stop, Instant::now());
        assert_eq!(*app.session(), SessionState::default());
        assert!(!app.is_timer_running());
    }

    #[test]
    fn play_pause_toggles_running_but_not_stopped() {
        let (mut app, _) = app_with_cue();
        let now = Instant::now();
        assert!(!app.is_paused());

        app.press(Control::PlayPause, now);
        assert!(app.is_timer_running());
        assert!(!app.session().is_stopped);
        assert!(!app.is_paused());

        app.press(Control::PlayPause, now);
        assert!(!app.is_timer_running());
        assert!(!app.session().is_stopped);
        assert!(app.is_paused());
    }

    #[test]
    fn ticks_ignored_while_paused() {
        let (mut app, _) = app_with_cue();
        let now = Instant::now();
        app.press(Control::PlayPause, now);
        app.on_tick();
        app.press(Control::PlayPause, now);
        app.on_tick();
        app.on_tick();
        assert_eq!(app.session().elapsed_secs, 1);
    }

    #[test]
    fn enablement_follows_stopped_flag() {
        let (mut app, _) = app_with_cue();
        assert!(app.is_enabled(Control::IncreaseFocus));
        assert!(!app.is_enabled(Control::Stop));

        app.press(Control::PlayPause, Instant::now());
        assert!(!app.is_enabled(Control::IncreaseBreak));
        assert!(app.is_enabled(Control::Stop));
        assert!(app.is_enabled(Control::PlayPause));

        let before = *app.session();
        app.press(Control::IncreaseFocus, Instant::now());
        assert_eq!(*app.session(), before);
    }

    #[test]
    fn interval_drives_ticks_only_while_running() {
        let (mut app, _) = app_with_cue();
        let t0 = Instant::now();
        assert!(!app.poll_interval(t0 + Duration::from_secs(5)));

        app.press(Control::PlayPause, t0);
        assert!(app.poll_interval(t0 + Duration::from_secs(1)));
        assert!(app.poll_interval(t0 + Duration::from_secs(2)));
        assert_eq!(app.session().elapsed_secs, 2);

        app.press(Control::PlayPause, t0 + Duration::from_secs(2));
        assert!(!app.poll_interval(t0 + Duration::from_secs(10)));
        assert_eq!(app.session().elapsed_secs, 2);
    }

    #[test]
    fn each_run_owns_a_fresh_interval_handle() {
        let (mut app, _) = app_with_cue();
        let t0 = Instant::now();

        app.press(Control::PlayPause, t0);
        let first = app.tick_handle.expect("running app holds a handle");
        assert!(app.interval.is_current(first));

        app.press(Control::PlayPause, t0);
        assert_eq!(app.tick_handle, None);
        assert!(!app.interval.is_current(first));

        app.press(Control::PlayPause, t0);
        let second = app.tick_handle.expect("restarted app holds a handle");
        assert_ne!(first, second);
        assert!(!app.interval.is_current(first));

        app.press(Control::Stop, t0);
        assert_eq!(app.tick_handle, None);
    }

    #[test]
    fn stale_handle_never_ticks() {
        let (mut app, _) = app_with_cue();
        let t0 = Instant::now();
        app.press(Control::PlayPause, t0);

        // Re-arming behind the app's back leaves its handle stale.
        app.interval.start(t0);
        assert!(!app.poll_interval(t0 + Duration::from_secs(5)));
        assert_eq!(app.session().elapsed_secs, 0);
        assert_eq!(app.tick_handle, None);
    }

    #[test]
    fn keys_map_to_controls() {
        let (mut app, _) = app_with_cue();
        let now = Instant::now();
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert!(!app.handle_key(key('B'), now));
        assert_eq!(app.session().break_duration_secs, 360);
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), now));
        assert_eq!(app.session().focus_duration_secs, 1800);
        assert!(!app.handle_key(key(' '), now));
        assert!(app.is_timer_running());
        assert!(app.handle_key(key('q'), now));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = Control::ALL.iter().map(|c| c.test_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Control::ALL.len());
    }
}
