#![warn(clippy::all, clippy::pedantic)]

/// A poll-driven timer that fires after an accumulated-time threshold.
///
/// The delay is a function of how many times the action has already fired,
/// so schedules like "immediately, then 0.5s, then 0.1s forever" are a
/// three-armed closure. The delay function is evaluated on every update,
/// which lets it read live state (current fall speed, a held turbo key).
///
/// `update` reports at most one firing per call: an oversized tick that
/// crosses several thresholds does not produce a catch-up burst. The owner
/// runs the action when `update` returns `true`; cancellation is dropping
/// the timer.
#[derive(Debug, Clone)]
pub struct TimedAction {
    time_since_last_fire: f32,
    executions: u32,
    repeat: bool,
}

impl TimedAction {
    #[must_use]
    pub fn new(repeat: bool) -> Self {
        Self {
            time_since_last_fire: 0.0,
            executions: 0,
            repeat,
        }
    }

    /// A timer that keeps firing on its schedule until dropped.
    #[must_use]
    pub fn repeating() -> Self {
        Self::new(true)
    }

    /// A timer that fires exactly once and then goes quiet.
    #[must_use]
    pub fn one_shot() -> Self {
        Self::new(false)
    }

    #[must_use]
    pub fn executions(&self) -> u32 {
        self.executions
    }

    /// Accumulates `elapsed` seconds and reports whether the action fired.
    ///
    /// Fires when the accumulator reaches `delay_of(executions)` and the
    /// timer is either unfired or repeating; the accumulator then resets to
    /// zero. Never fires more than once per call.
    pub fn update(&mut self, elapsed: f32, mut delay_of: impl FnMut(u32) -> f32) -> bool {
        self.time_since_last_fire += elapsed;

        if self.time_since_last_fire >= delay_of(self.executions)
            && (self.executions == 0 || self.repeat)
        {
            self.executions += 1;
            self.time_since_last_fire = 0.0;
            return true;
        }

        false
    }
}
