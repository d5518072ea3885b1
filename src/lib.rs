//! Behavior Tracker - per-student timers logged to a spreadsheet
//!
//! The server exposes the roster and an append-only behavior log, both kept
//! in an external spreadsheet. The tracker view times students client-side
//! and posts each finished interval to the server.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod sheets;
pub mod state;
pub mod tracker;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
