//! Date and clock-time rendering for log entries

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::models::LogEntry;

/// Time zone used to render start and end times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockZone {
    #[default]
    Local,
    Utc,
}

impl ClockZone {
    /// `h:mmAM` / `h:mmPM` for `millis`, `None` when out of range
    pub fn format_time(&self, millis: i64) -> Option<String> {
        let instant = DateTime::from_timestamp_millis(millis)?;
        Some(match self {
            ClockZone::Local => format_clock_time(&instant.with_timezone(&Local)),
            ClockZone::Utc => format_clock_time(&instant),
        })
    }

    /// Build the entry for an interval. The date comes from the start time.
    pub fn log_entry(&self, student: &str, started_at: i64, ended_at: i64) -> Option<LogEntry> {
        let date = utc_date(started_at)?;
        let start = self.format_time(started_at)?;
        let end = self.format_time(ended_at)?;
        LogEntry::new(student, date, start, end).ok()
    }
}

/// 12-hour clock with the meridiem glued on, e.g. `11:30AM`
pub fn format_clock_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%-I:%M%p").to_string()
}

/// Calendar day of `millis` in UTC as `YYYY-MM-DD`
pub fn utc_date(millis: i64) -> Option<String> {
    let instant: DateTime<Utc> = DateTime::from_timestamp_millis(millis)?;
    Some(instant.format("%Y-%m-%d").to_string())
}
