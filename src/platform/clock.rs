//! Monotonic millisecond clocks

use std::cell::Cell;
use std::time::Instant;

use crate::consts::TICK_RATE;

/// Source of monotonic milliseconds since an arbitrary epoch
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`], epoch at construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for replays and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Fixed-rate tick deadlines
///
/// Deadlines are computed from an origin and a tick count, so the integer
/// millisecond rounding never accumulates: 60 ticks always span 1000ms.
/// Falling more than one tick behind rebases instead of replaying a burst.
#[derive(Debug, Clone, Copy)]
pub struct TickSchedule {
    origin_ms: u64,
    ticks: u64,
}

impl TickSchedule {
    pub fn new(now_ms: u64) -> Self {
        Self {
            origin_ms: now_ms,
            ticks: 0,
        }
    }

    /// When the next tick is due
    pub fn next_deadline(&self) -> u64 {
        self.origin_ms + self.ticks * 1000 / TICK_RATE as u64
    }

    /// Record a tick run at `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        self.ticks += 1;
        if self.next_deadline() < now_ms {
            log::debug!("Tick schedule behind by {}ms, rebasing", now_ms - self.next_deadline());
            self.origin_ms = now_ms;
            self.ticks = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_never_goes_back() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(100);
        clock.advance(16);
        clock.advance(17);
        assert_eq!(clock.now_ms(), 133);
    }

    #[test]
    fn test_schedule_runs_sixty_ticks_per_second() {
        let mut schedule = TickSchedule::new(0);
        let mut ran = 0;
        for now in 0..1000 {
            if now >= schedule.next_deadline() {
                schedule.advance(now);
                ran += 1;
            }
        }
        assert_eq!(ran, TICK_RATE);
        assert_eq!(schedule.next_deadline(), 1000);
    }

    #[test]
    fn test_schedule_rebases_when_behind() {
        let mut schedule = TickSchedule::new(0);
        schedule.advance(500);
        assert!(schedule.next_deadline() > 500);
        assert!(schedule.next_deadline() <= 500 + 17);
    }
}
