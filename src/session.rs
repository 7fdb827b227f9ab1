use crate::cue::AudioCue;

// ============================================================================
// Bounds
// ============================================================================

pub const FOCUS_MIN_SECS: u32 = 300;
pub const FOCUS_MAX_SECS: u32 = 3600;
pub const FOCUS_STEP_SECS: u32 = 300;
pub const BREAK_MIN_SECS: u32 = 60;
pub const BREAK_MAX_SECS: u32 = 900;
pub const BREAK_STEP_SECS: u32 = 60;

pub const DEFAULT_FOCUS_SECS: u32 = 1500;
pub const DEFAULT_BREAK_SECS: u32 = 300;

/// Which configured duration an adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    Focus,
    Break,
}

impl DurationField {
    pub fn step(self) -> u32 {
        match self {
            Self::Focus => FOCUS_STEP_SECS,
            Self::Break => BREAK_STEP_SECS,
        }
    }

    pub fn min(self) -> u32 {
        match self {
            Self::Focus => FOCUS_MIN_SECS,
            Self::Break => BREAK_MIN_SECS,
        }
    }

    pub fn max(self) -> u32 {
        match self {
            Self::Focus => FOCUS_MAX_SECS,
            Self::Break => BREAK_MAX_SECS,
        }
    }

    /// Snaps an arbitrary value onto this field's step grid, inside its bounds.
    pub fn normalize(self, secs: u32) -> u32 {
        let step = self.step();
        let secs = secs.min(self.max());
        let snapped = (secs + step / 2) / step * step;
        snapped.clamp(self.min(), self.max())
    }
}

/// Amount to add to `current` so the result moves one step toward `max`
/// without crossing it. Zero at the bound.
pub fn increase_amount(field: DurationField, current: u32, max: u32) -> u32 {
    field.step().min(max.saturating_sub(current))
}

/// Amount to subtract from `current` so the result moves one step toward
/// `min` without crossing it. Zero at the bound.
pub fn decrease_amount(field: DurationField, current: u32, min: u32) -> u32 {
    field.step().min(current.saturating_sub(min))
}

// ============================================================================
// Session State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focusing,
    OnBreak,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Focusing => "Focusing",
            Self::OnBreak => "On Break",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Focusing => Self::OnBreak,
            Self::OnBreak => Self::Focusing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub focus_duration_secs: u32,
    pub break_duration_secs: u32,
    /// Seconds spent in the current phase; always below the phase duration.
    pub elapsed_secs: u32,
    pub phase: Phase,
    /// True only before the first start and after an explicit stop.
    pub is_stopped: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_durations(DEFAULT_FOCUS_SECS, DEFAULT_BREAK_SECS)
    }
}

impl SessionState {
    /// A stopped session with the given durations, normalized onto each
    /// field's bounds and step grid.
    pub fn with_durations(focus_secs: u32, break_secs: u32) -> Self {
        Self {
            focus_duration_secs: DurationField::Focus.normalize(focus_secs),
            break_duration_secs: DurationField::Break.normalize(break_secs),
            elapsed_secs: 0,
            phase: Phase::Focusing,
            is_stopped: true,
        }
    }

    pub fn duration(&self, field: DurationField) -> u32 {
        match field {
            DurationField::Focus => self.focus_duration_secs,
            DurationField::Break => self.break_duration_secs,
        }
    }

    fn duration_mut(&mut self, field: DurationField) -> &mut u32 {
        match field {
            DurationField::Focus => &mut self.focus_duration_secs,
            DurationField::Break => &mut self.break_duration_secs,
        }
    }

    pub fn active_duration(&self) -> u32 {
        match self.phase {
            Phase::Focusing => self.focus_duration_secs,
            Phase::OnBreak => self.break_duration_secs,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.active_duration().saturating_sub(self.elapsed_secs)
    }

    pub fn percent_complete(&self) -> f64 {
        let total = self.active_duration();
        if total == 0 {
            return 0.0;
        }
        (self.elapsed_secs as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn can_adjust_durations(&self) -> bool {
        self.is_stopped
    }

    pub fn can_stop(&self) -> bool {
        !self.is_stopped
    }

    /// Returns a copy with `field` raised by one step, or unchanged when the
    /// session is running or the field is at its maximum.
    pub fn increased(mut self, field: DurationField) -> Self {
        if self.can_adjust_durations() {
            let current = self.duration(field);
            *self.duration_mut(field) = current + increase_amount(field, current, field.max());
        }
        self
    }

    pub fn decreased(mut self, field: DurationField) -> Self {
        if self.can_adjust_durations() {
            let current = self.duration(field);
            *self.duration_mut(field) = current - decrease_amount(field, current, field.min());
        }
        self
    }

    pub fn started(mut self) -> Self {
        self.is_stopped = false;
        self
    }

    pub fn apply_tick(mut self, update: TickUpdate) -> Self {
        self.elapsed_secs = update.elapsed_secs;
        self.phase = update.phase;
        self
    }
}

// ============================================================================
// Tick
// ============================================================================

/// Partial state produced by one tick, merged back with
/// [`SessionState::apply_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickUpdate {
    pub elapsed_secs: u32,
    pub phase: Phase,
    pub phase_completed: bool,
}

/// Advances the session by one second. Reaching the active duration
/// completes the phase: the cue plays, the phase flips and elapsed resets.
pub fn tick(state: &SessionState, cue: &dyn AudioCue) -> TickUpdate {
    let elapsed = state.elapsed_secs + 1;

    if elapsed >= state.active_duration() {
        cue.play();
        TickUpdate {
            elapsed_secs: 0,
            phase: state.phase.other(),
            phase_completed: true,
        }
    } else {
        TickUpdate {
            elapsed_secs: elapsed,
            phase: state.phase,
            phase_completed: false,
        }
    }
}
