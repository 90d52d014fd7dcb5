//! The countdown timers of the chip and the fixed rate cadence used by the host loop.
use std::time::{Duration, Instant};

use crate::definitions::runner::MAX_CATCH_UP;

/// Represents a timer inside of the chip
/// infrastructure, it will count down to
/// zero from what ever number was given,
/// one step per [`tick`](Timer::tick).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Counts down by one, a timer at zero stays at zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// A fixed rate schedule.
///
/// The host asks how many periods passed since it last looked and
/// runs the work that many times, so that the average rate stays
/// correct even when a single cycle of the host loop runs late.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
    deadline: Instant,
}

impl Interval {
    /// The first period is due one `period` after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        assert!(period > Duration::from_secs(0), "The period has to be positive.");
        Self {
            period,
            deadline: start + period,
        }
    }

    /// Will create an interval that is due `hertz` times per second.
    pub fn from_hertz(hertz: u64, start: Instant) -> Self {
        Self::new(Duration::from_nanos(1_000_000_000 / hertz), start)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The point in time the next period is due.
    pub fn next_deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns how many periods are due at `now` and moves the deadline past them.
    ///
    /// At most [`MAX_CATCH_UP`] periods are returned, the ones beyond that
    /// are dropped so that a long stall does not turn into a burst.
    pub fn due(&mut self, now: Instant) -> u32 {
        if now < self.deadline {
            return 0;
        }

        let behind = now - self.deadline;
        let missed = (behind.as_nanos() / self.period.as_nanos()) as u64 + 1;

        if missed > MAX_CATCH_UP as u64 {
            log::debug!(
                "dropping {} periods of {:?}",
                missed - MAX_CATCH_UP as u64,
                self.period
            );
            self.deadline = now + self.period;
            MAX_CATCH_UP
        } else {
            // missed is at most MAX_CATCH_UP here
            self.deadline += self.period * missed as u32;
            missed as u32
        }
    }
}
