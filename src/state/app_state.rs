//! Shared state handed to every HTTP handler

use std::time::Instant;

use crate::services::{LogAppender, RosterFetcher};

/// Services plus server start time. Holds no per-request mutable data.
pub struct AppState {
    pub roster: RosterFetcher,
    pub log_appender: LogAppender,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(roster: RosterFetcher, log_appender: LogAppender) -> Self {
        Self {
            roster,
            log_appender,
            start_time: Instant::now(),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }
}

fn format_uptime(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
