//! Stage Timer - A shared countdown timer for live events
//!
//! One control view sets, starts, pauses and resets a countdown and pushes a
//! short message; any number of stage views poll the same shared record and
//! render the remaining time for the audience.

pub mod config;
pub mod state;
pub mod view;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
