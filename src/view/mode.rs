//! Routing between the two presentation roles

use serde::{Deserialize, Serialize};

/// Which view a client is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Operator panel that mutates the shared countdown
    #[default]
    Control,
    /// Read-only audience display
    Stage,
}

impl ViewMode {
    /// Parse the routing parameter. Anything unrecognized or missing is `Control`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(|p| p.trim().to_ascii_lowercase()).as_deref() {
            Some("stage") => ViewMode::Stage,
            _ => ViewMode::Control,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Control => "control",
            ViewMode::Stage => "stage",
        }
    }

    /// Shareable link opening this view
    pub fn link(self) -> String {
        format!("/view?mode={}", self.as_str())
    }
}
