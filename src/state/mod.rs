//! State management module
//!
//! Server-side request state plus the per-student Timer State Store used by
//! the tracker view.

pub mod app_state;
pub mod timer_board;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_board::TimerBoard;
pub use timer_state::TimerState;
