use std::cell::Cell;
use std::time::Instant;

use crate::foundation::core::Tick;

/// Elapsed-seconds source for one-shot timers and durations.
///
/// Time is measured from the start of the session, so `0.0` is the first tick.
pub trait Clock {
    /// Seconds elapsed when processing `tick`.
    fn now_secs(&self, tick: Tick) -> f64;
}

/// Wall-clock time since construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self, _tick: Tick) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Deterministic time derived from the tick index: `tick / fps`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    fps: f64,
}

impl FrameClock {
    /// `fps` must be positive; non-positive values fall back to 30.
    pub fn new(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 30.0 };
        Self { fps }
    }

    /// Effective frame rate after the fallback.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Clock for FrameClock {
    fn now_secs(&self, tick: Tick) -> f64 {
        tick.as_f64() / self.fps
    }
}

/// Hand-driven clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Clock reading `secs` until moved.
    pub fn new(secs: f64) -> Self {
        Self {
            now: Cell::new(secs),
        }
    }

    /// Jump to `secs`.
    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self, _tick: Tick) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/clock.rs"]
mod tests;
