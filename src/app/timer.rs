// Scoped interval timers
//
// Fixed-interval timers driven by the UI loop. A timer exists only while
// its owner holds it: dropping the value releases it, so teardown is just
// clearing the owning `Option`.

use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug)]
pub struct IntervalTimer {
    name: &'static str,
    interval: Duration,
    last_fire: Instant,
}

impl IntervalTimer {
    /// Acquire a timer whose first firing is one interval after `now`
    pub fn start(name: &'static str, interval: Duration, now: Instant) -> Self {
        debug!(timer = name, interval_ms = interval.as_millis() as u64, "Timer acquired");
        Self {
            name,
            interval,
            last_fire: now,
        }
    }

    /// Returns true (and re-arms) when an interval has elapsed since the
    /// last firing. Missed intervals collapse into a single firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_fire) >= self.interval {
            self.last_fire = now;
            true
        } else {
            false
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        debug!(timer = self.name, "Timer released");
    }
}
