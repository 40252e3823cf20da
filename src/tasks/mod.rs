//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod threshold_monitor;

// Re-export main functions
pub use threshold_monitor::threshold_monitor_task;
