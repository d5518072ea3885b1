//! Process-level helpers shared by the binaries

pub mod signals;

pub use signals::shutdown_signal;
