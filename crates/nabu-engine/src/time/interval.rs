use std::time::{Duration, Instant};

/// Fixed-period tick source driven by the caller's event loop.
///
/// The toolkit never spawns timers; whoever owns the loop calls [`poll`]
/// between event dispatches and runs the periodic work when it returns true.
///
/// [`poll`]: Interval::poll
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    last: Instant,
    ticks: u64,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    /// Interval whose first period starts at `start`.
    pub fn starting_at(period: Duration, start: Instant) -> Self {
        debug_assert!(!period.is_zero());
        Self { period, last: start, ticks: 0 }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks fired so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns true at most once per elapsed period.
    ///
    /// Missed periods are not replayed: after a stall the next tick is one
    /// period after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.period {
            return false;
        }
        self.last = now;
        self.ticks = self.ticks.wrapping_add(1);
        true
    }

    /// Time until the next tick, for loops that sleep (`ControlFlow::WaitUntil`).
    pub fn next_deadline(&self) -> Instant {
        self.last + self.period
    }

    /// Restarts the current period at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}
