//! Wall-clock source for [`crate::GameDriver::advance`].

use std::time::{Duration, Instant};

/// Hands out elapsed whole milliseconds between frames.
///
/// Sub-millisecond remainders stay on the clock and count toward the next
/// frame, so gravity does not drift behind wall time.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole milliseconds since the last call, consuming only those.
    pub fn take_elapsed_ms(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        self.last += Duration::from_millis(ms as u64);
        ms
    }

    /// Time since the last consumed millisecond.
    pub fn since_last(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last)
    }
}
