//! Data carried between the View, the HTTP API and the spreadsheet

pub mod log_entry;

pub use log_entry::{LogBehaviorRequest, LogEntry};
