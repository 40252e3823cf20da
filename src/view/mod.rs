//! View controller
//!
//! Turns a snapshot of the shared countdown into the values each role
//! renders. Nothing in here writes to the record; reads go through
//! [`AppState::observe`](crate::state::AppState::observe) so threshold
//! effects are sampled on every poll.

pub mod input;
pub mod mode;
pub mod presentation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{DisplayConfig, TimerSettings, TimerState};

pub use input::{
    clamp_duration, limit_message, CustomDuration, DurationInput, PresetDuration, PRESET_MINUTES,
};
pub use mode::ViewMode;
pub use presentation::{display_message, format_clock, Urgency};

/// What the audience display renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageView {
    /// Remaining time as `MM:SS`
    pub time: String,
    pub remaining_seconds: u64,
    pub running: bool,
    /// Countdown is running with nothing left
    pub ended: bool,
    pub urgency: Urgency,
    pub color: String,
    pub message: Option<String>,
    pub ticker: bool,
    pub ticker_speed: u8,
    pub message_color: String,
    pub background: String,
    pub font_scale: f32,
    pub shake: bool,
    pub spin: bool,
    pub effect_active: bool,
    pub refresh_interval_ms: u64,
    pub revision: u64,
}

/// Links that open each role against the same shared countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    pub control: String,
    pub stage: String,
}

impl ShareLinks {
    pub fn new() -> Self {
        Self {
            control: ViewMode::Control.link(),
            stage: ViewMode::Stage.link(),
        }
    }
}

impl Default for ShareLinks {
    fn default() -> Self {
        Self::new()
    }
}

/// What the operator panel renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlView {
    /// Preview of the stage
    pub stage: StageView,
    /// Stored countdown value (remaining at run start while running)
    pub duration: u64,
    /// Message exactly as entered
    pub message: String,
    pub display: DisplayConfig,
    pub presets: Vec<u64>,
    pub max_minutes: u64,
    pub last_update: DateTime<Utc>,
    pub links: ShareLinks,
}

/// View model for either role, tagged with its mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ViewModel {
    Control(ControlView),
    Stage(StageView),
}

/// Derive the stage view from a record snapshot at `now`
pub fn stage_view(timer: &TimerState, settings: &TimerSettings, now: DateTime<Utc>) -> StageView {
    let remaining = timer.remaining(now);
    let ended = timer.is_expired(now);
    let urgency = if ended {
        Urgency::Critical
    } else {
        Urgency::for_remaining(remaining, settings.warning_secs, settings.critical_secs)
    };
    let display = &timer.display;

    StageView {
        time: format_clock(remaining),
        remaining_seconds: remaining,
        running: timer.running,
        ended,
        urgency,
        color: urgency.hex().to_string(),
        message: display_message(&timer.message).map(str::to_string),
        ticker: display.ticker,
        ticker_speed: display.ticker_speed,
        message_color: display.message_color.hex().to_string(),
        background: display.background.hex().to_string(),
        font_scale: display.font_scale,
        shake: display.shake,
        spin: display.spin,
        effect_active: timer.effect.is_active(now),
        refresh_interval_ms: settings.refresh_interval_ms,
        revision: timer.revision,
    }
}

/// Derive the operator view from a record snapshot at `now`
pub fn control_view(timer: &TimerState, settings: &TimerSettings, now: DateTime<Utc>) -> ControlView {
    ControlView {
        stage: stage_view(timer, settings, now),
        duration: timer.duration,
        message: timer.message.clone(),
        display: timer.display,
        presets: PRESET_MINUTES.to_vec(),
        max_minutes: settings.max_minutes,
        last_update: timer.last_update,
        links: ShareLinks::new(),
    }
}

/// Derive the view model for `mode`
pub fn view_for(
    mode: ViewMode,
    timer: &TimerState,
    settings: &TimerSettings,
    now: DateTime<Utc>,
) -> ViewModel {
    match mode {
        ViewMode::Control => ViewModel::Control(control_view(timer, settings, now)),
        ViewMode::Stage => ViewModel::Stage(stage_view(timer, settings, now)),
    }
}
