//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query string selecting the view role
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQuery {
    pub mode: Option<String>,
}

/// Body of POST /api/message
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Server status with countdown summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub remaining_seconds: u64,
    pub revision: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
