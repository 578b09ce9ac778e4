//! Time sources for frame-driven work.
//!
//! Browser code reads `performance.now()`; tests drive a [`ManualClock`].
//! Both report milliseconds on the same timebase as animation-frame
//! timestamps.

use std::cell::Cell;

pub trait FrameClock {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Fires once after triggers stop arriving for `quiet_ms`.
///
/// Polled from the frame loop instead of owning a timer, so every retrigger
/// simply pushes the deadline back.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.quiet_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per quiet period, on the first poll at or after the
    /// deadline.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
