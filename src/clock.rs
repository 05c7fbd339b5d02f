use std::time::Duration;
use std::time::Instant;

/// Paces simulation steps at a fixed period, independent of how often the caller wakes up.
///
/// Input polling returns early whenever a key arrives, so the caller cannot count loop
/// iterations as frames. Instead it asks [`StepClock::tick`] whether a step is due.
#[derive(Debug, Clone)]
pub struct StepClock {
    period: Duration,

    /// When the next step is due
    next: Instant,
}

impl StepClock {
    /// The first step falls due one `period` after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// How long to wait from `now` until the next step is due
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Returns true, at most once per period, when a step is due.
    ///
    /// After a stall the missed steps are dropped rather than run back to back.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }

        true
    }
}
