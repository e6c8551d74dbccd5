/// Interval timer for one-shot activation.
///
/// Fires when more than `interval` seconds have passed since the last recorded activation. The
/// timestamp only moves when the caller confirms an activation with [`IntervalTrigger::mark`],
/// so a trigger that comes due while its effect is still running fires on the first tick after
/// the effect ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalTrigger {
    interval_secs: f64,
    last_secs: f64,
}

impl IntervalTrigger {
    /// Trigger whose first period starts at `start_secs`.
    pub fn new(interval_secs: f64, start_secs: f64) -> Self {
        Self {
            interval_secs,
            last_secs: start_secs,
        }
    }

    /// Seconds that must pass between activations.
    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    /// Time of the last confirmed activation.
    pub fn last_secs(&self) -> f64 {
        self.last_secs
    }

    /// `now - last > interval`.
    pub fn is_due(&self, now_secs: f64) -> bool {
        now_secs - self.last_secs > self.interval_secs
    }

    /// Record an activation at `now_secs`.
    pub fn mark(&mut self, now_secs: f64) {
        self.last_secs = now_secs;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/trigger.rs"]
mod tests;
