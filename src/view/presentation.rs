//! Values derived from the countdown for rendering

use serde::{Deserialize, Serialize};

/// Clock color tier by remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Default,
    Warning,
    Critical,
}

impl Urgency {
    /// Pick the tier for `remaining` seconds given the two cut-offs.
    /// Critical includes its cut-off; warning starts below a full `warning_secs`.
    pub fn for_remaining(remaining: u64, warning_secs: u64, critical_secs: u64) -> Self {
        if remaining <= critical_secs {
            Urgency::Critical
        } else if remaining < warning_secs {
            Urgency::Warning
        } else {
            Urgency::Default
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Urgency::Default => "#ffffff",
            Urgency::Warning => "#ffcc00",
            Urgency::Critical => "#ff3b30",
        }
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Message as the stage shows it. Blank means no message at all.
pub fn display_message(message: &str) -> Option<&str> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
