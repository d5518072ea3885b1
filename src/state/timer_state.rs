//! Timer state for a single student

/// Start time and running flag of one student's timer.
///
/// `is_running()` implies `started_at_epoch_millis()` is set; the fields are
/// private so the pair can only change through the constructors below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    started_at_epoch_millis: Option<i64>,
    running: bool,
}

impl TimerState {
    /// Create an idle timer
    pub fn idle() -> Self {
        Self {
            started_at_epoch_millis: None,
            running: false,
        }
    }

    /// Create a timer that started at `started_at` (milliseconds since epoch)
    pub fn running(started_at: i64) -> Self {
        Self {
            started_at_epoch_millis: Some(started_at),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start time, only while running
    pub fn started_at_epoch_millis(&self) -> Option<i64> {
        if self.running {
            self.started_at_epoch_millis
        } else {
            None
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::idle()
    }
}
