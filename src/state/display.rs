//! Stage display configuration

use serde::{Deserialize, Serialize};

pub const MIN_FONT_SCALE: f32 = 0.5;
pub const MAX_FONT_SCALE: f32 = 3.0;
pub const MIN_TICKER_SPEED: u8 = 1;
pub const MAX_TICKER_SPEED: u8 = 10;

/// Stage background palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Black,
    Navy,
    DarkGreen,
    Maroon,
    Purple,
    Charcoal,
}

impl Background {
    pub fn hex(self) -> &'static str {
        match self {
            Background::Black => "#000000",
            Background::Navy => "#001f3f",
            Background::DarkGreen => "#013220",
            Background::Maroon => "#800000",
            Background::Purple => "#4b0082",
            Background::Charcoal => "#36454f",
        }
    }
}

/// Message text palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageColor {
    #[default]
    White,
    Yellow,
    Orange,
    Cyan,
    Lime,
    Pink,
}

impl MessageColor {
    pub fn hex(self) -> &'static str {
        match self {
            MessageColor::White => "#ffffff",
            MessageColor::Yellow => "#ffeb3b",
            MessageColor::Orange => "#ff9800",
            MessageColor::Cyan => "#00e5ff",
            MessageColor::Lime => "#76ff03",
            MessageColor::Pink => "#ff4081",
        }
    }
}

/// Every recognized stage display option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub background: Background,
    /// Multiplier applied to the clock font, 0.5 to 3.0
    pub font_scale: f32,
    pub shake: bool,
    pub spin: bool,
    pub message_color: MessageColor,
    /// Scroll the message instead of centering it
    pub ticker: bool,
    /// Ticker scroll speed, 1 (slowest) to 10
    pub ticker_speed: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            background: Background::default(),
            font_scale: 1.0,
            shake: false,
            spin: false,
            message_color: MessageColor::default(),
            ticker: false,
            ticker_speed: 5,
        }
    }
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUpdate {
    pub background: Option<Background>,
    pub font_scale: Option<f32>,
    pub shake: Option<bool>,
    pub spin: Option<bool>,
    pub message_color: Option<MessageColor>,
    pub ticker: Option<bool>,
    pub ticker_speed: Option<u8>,
}

impl DisplayConfig {
    /// Apply a partial update, clamping numeric fields into range
    pub fn apply(&mut self, update: &DisplayUpdate) {
        if let Some(background) = update.background {
            self.background = background;
        }
        if let Some(scale) = update.font_scale {
            self.font_scale = clamp_font_scale(scale);
        }
        if let Some(shake) = update.shake {
            self.shake = shake;
        }
        if let Some(spin) = update.spin {
            self.spin = spin;
        }
        if let Some(color) = update.message_color {
            self.message_color = color;
        }
        if let Some(ticker) = update.ticker {
            self.ticker = ticker;
        }
        if let Some(speed) = update.ticker_speed {
            self.ticker_speed = speed.clamp(MIN_TICKER_SPEED, MAX_TICKER_SPEED);
        }
    }
}

fn clamp_font_scale(scale: f32) -> f32 {
    if scale.is_nan() {
        1.0
    } else {
        scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
    }
}
