//! State management module
//!
//! This module contains the shared countdown record, its collaborators and
//! the application state that owns it.

pub mod app_state;
pub mod clock;
pub mod display;
pub mod effect;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerSettings};
pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{Background, DisplayConfig, DisplayUpdate, MessageColor};
pub use effect::{EffectState, EffectTrigger, TriggerPolicy};
pub use timer_state::TimerState;
