//! Operator input normalization
//!
//! Everything coming from the control view is clamped here so nothing out of
//! range ever reaches the countdown record.

use serde::{Deserialize, Serialize};

/// Minute presets offered on the control panel
pub const PRESET_MINUTES: [u64; 7] = [1, 3, 5, 10, 15, 20, 30];

/// Longest message the stage will carry, in characters
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Duration chosen on the control panel
///
/// Each shape rejects fields of the other, so a malformed preset never
/// falls through to a zero-length custom entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Preset(PresetDuration),
    Custom(CustomDuration),
}

/// One of [`PRESET_MINUTES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetDuration {
    pub preset: u64,
}

/// Free minutes and seconds entry. At least one of the two must be given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomDuration {
    #[serde(default)]
    pub minutes: Option<i64>,
    #[serde(default)]
    pub seconds: Option<i64>,
}

impl DurationInput {
    /// Total seconds, or `None` for a preset that is not offered or an
    /// empty custom entry
    pub fn to_seconds(self, max_minutes: u64) -> Option<u64> {
        match self {
            DurationInput::Preset(PresetDuration { preset }) => {
                PRESET_MINUTES.contains(&preset).then_some(preset * 60)
            }
            DurationInput::Custom(CustomDuration { minutes: None, seconds: None }) => None,
            DurationInput::Custom(CustomDuration { minutes, seconds }) => Some(clamp_duration(
                minutes.unwrap_or(0),
                seconds.unwrap_or(0),
                max_minutes,
            )),
        }
    }
}

/// Clamp minutes to `0..=max_minutes` and seconds to `0..=59`
pub fn clamp_duration(minutes: i64, seconds: i64, max_minutes: u64) -> u64 {
    let minutes = minutes.max(0) as u64;
    let seconds = seconds.clamp(0, 59) as u64;
    if minutes >= max_minutes {
        max_minutes * 60
    } else {
        minutes * 60 + seconds
    }
}

/// Cut a message down to the stage limit on a character boundary
pub fn limit_message(text: &str) -> String {
    text.chars().take(MAX_MESSAGE_CHARS).collect()
}
