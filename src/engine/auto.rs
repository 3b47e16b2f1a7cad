//! Auto-iteration state machine.
//!
//! The engine defines *what* a tick does (`FitController::tick`); the
//! periodic driver itself is supplied by the host (the TUI's poll-timeout
//! loop, a test harness, ...). This type only tracks whether auto-iteration
//! is running and at which interval, so cancellation is synchronous: once
//! `stop` returns, any tick the host still has in flight finds the machine
//! idle and does nothing.

use std::time::Duration;

/// Idle/Running state for auto-iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoIterate {
    interval: Option<Duration>,
}

impl AutoIterate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition Idle → Running.
    ///
    /// Idempotent: starting while already running keeps the original interval
    /// and does not create a second schedule.
    pub fn start(&mut self, tick: Duration) {
        if self.interval.is_none() {
            self.interval = Some(tick);
        }
    }

    /// Transition Running → Idle. Idempotent.
    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// The tick interval while running, `None` while idle.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}
