//! Timer State Store: one independent timer per student

use std::collections::HashMap;

use tracing::debug;

use super::TimerState;

/// Timers keyed by student name. A student with no entry is idle.
#[derive(Debug, Default, Clone)]
pub struct TimerBoard {
    timers: HashMap<String, TimerState>,
}

impl TimerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `student`, idle when never started or already stopped
    pub fn get(&self, student: &str) -> TimerState {
        self.timers.get(student).copied().unwrap_or_default()
    }

    pub fn is_running(&self, student: &str) -> bool {
        self.get(student).is_running()
    }

    /// Start `student`'s timer at `now`. Returns `false` without touching
    /// anything when it is already running.
    pub fn start(&mut self, student: &str, now: i64) -> bool {
        if self.is_running(student) {
            return false;
        }
        self.timers.insert(student.to_string(), TimerState::running(now));
        debug!("Timer started for {} at {}", student, now);
        true
    }

    /// Stop `student`'s timer and clear it, yielding the start time.
    /// `None` when it was not running.
    pub fn stop(&mut self, student: &str) -> Option<i64> {
        let started_at = self.get(student).started_at_epoch_millis()?;
        self.timers.remove(student);
        debug!("Timer stopped for {}", student);
        Some(started_at)
    }
}
