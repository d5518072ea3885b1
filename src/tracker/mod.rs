//! Tracker view: per-student timers driven from a terminal
//!
//! The view fetches the roster from the server, keeps one independent timer
//! per student and, on stop, posts the interval back to the server without
//! waiting on or surfacing the outcome.

pub mod client;
pub mod clock;
pub mod format;
pub mod view;

pub use client::{ApiClient, LogSink};
pub use clock::{Clock, SystemClock};
pub use format::ClockZone;
pub use view::{TrackerView, ViewEvent};
