//! Coalesces bursts of change events into one history push.
//!
//! Continuous interactions (dragging, resizing, color scrubbing) emit
//! change events far faster than history should record them. The trigger is
//! a leading-edge-suppressed, trailing-edge-fired debounce: every event
//! pushes the deadline out, and the first poll past a quiet period fires
//! exactly once. Time is passed in by the caller, never sampled here, so
//! behavior is deterministic under test.

use std::time::{Duration, Instant};

/// Quiet period that ends a burst.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(80);

#[derive(Clone, Debug)]
pub struct CoalescingTrigger {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for CoalescingTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl CoalescingTrigger {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Note a change at `now`. Repeated requests within the delay window
    /// keep moving the deadline out, collapsing the burst.
    pub fn request(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once, at the first poll at or past the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop any pending firing (e.g. when history is about to restore and
    /// a trailing push would be stale).
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
