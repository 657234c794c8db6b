//! Step gating and speed scaling.

/// Fires one discrete step whenever more than `step_interval` seconds have
/// elapsed since the previous one.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StepClock {
    last_move: f64,
    step_interval: f64,
}

impl StepClock {
    pub(crate) fn new(now: f64, step_interval: f64) -> Self {
        Self {
            last_move: now,
            step_interval,
        }
    }

    /// Returns `true` and restarts the interval when a step is due.
    pub(crate) fn poll(&mut self, now: f64) -> bool {
        if now - self.last_move <= self.step_interval {
            return false;
        }
        self.last_move = now;
        true
    }

    /// Shortens the interval. There is no lower bound.
    pub(crate) fn speed_up(&mut self, multiplier: f64) {
        self.step_interval *= multiplier;
    }

    pub(crate) fn step_interval(&self) -> f64 {
        self.step_interval
    }
}
