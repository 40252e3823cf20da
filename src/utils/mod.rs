//! Utility functions module
//!
//! Process-level helpers that sit outside the countdown itself.

pub mod signals;

pub use signals::shutdown_signal;
