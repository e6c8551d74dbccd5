use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-tick decision of the exit poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    /// Process the next tick.
    Continue,
    /// End the session without pulling another frame.
    Stop,
}

/// Cooperative cancellation, polled once per tick before pulling a frame.
pub trait ExitSignal {
    /// Called once per tick; `Stop` ends the session.
    fn poll(&mut self) -> LoopControl;
}

/// Never requests a stop; the session runs until the source ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

impl ExitSignal for Never {
    fn poll(&mut self) -> LoopControl {
        LoopControl::Continue
    }
}

/// Stops after a fixed number of polls that returned `Continue`.
#[derive(Clone, Copy, Debug)]
pub struct FrameBudget {
    remaining: u64,
}

impl FrameBudget {
    /// Allow `frames` ticks.
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl ExitSignal for FrameBudget {
    fn poll(&mut self) -> LoopControl {
        if self.remaining == 0 {
            return LoopControl::Stop;
        }
        self.remaining -= 1;
        LoopControl::Continue
    }
}

/// Shared flag, e.g. set from a key handler or a signal handler thread.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the session to stop before its next tick.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Return `true` once [`StopFlag::request_stop`] was called on any clone.
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl ExitSignal for StopFlag {
    fn poll(&mut self) -> LoopControl {
        if self.is_stop_requested() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/exit.rs"]
mod tests;
