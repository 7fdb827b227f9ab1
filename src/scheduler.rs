use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Proof of a particular arming of an [`Interval`]. Restarting or
/// cancelling the interval invalidates every earlier handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalHandle {
    generation: u64,
}

/// Cancellable repeating timer polled from the event loop.
///
/// The interval holds no callback. The loop calls [`Interval::poll`] and
/// runs the tick itself on the state it owns at that moment. Each successful
/// poll is exactly one tick: a late poll fires once and the next deadline is
/// measured from that poll, so missed periods are dropped, not replayed.
#[derive(Debug)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
    generation: u64,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period, next_due: None, generation: 0 }
    }

    pub fn start(&mut self, now: Instant) -> IntervalHandle {
        self.generation += 1;
        self.next_due = Some(now + self.period);
        IntervalHandle { generation: self.generation }
    }

    pub fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn is_current(&self, handle: IntervalHandle) -> bool {
        self.is_armed() && handle.generation == self.generation
    }

    /// Time left before the next firing, or `None` while cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Returns true at most once per call when a firing is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
