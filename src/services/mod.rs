//! Spreadsheet-backed services behind the HTTP endpoints
//!
//! Both services receive their store and target range at construction and
//! never read configuration on their own.

pub mod log_appender;
pub mod roster;

// Re-export main types
pub use log_appender::LogAppender;
pub use roster::RosterFetcher;
