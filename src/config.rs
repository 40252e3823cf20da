//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{effect::MAX_EFFECT_SECS, EffectTrigger, TimerSettings, TriggerPolicy};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "stage-timer")]
#[command(about = "A shared countdown timer server with control and stage views")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown loaded at startup, in minutes
    #[arg(short, long, default_value = "15")]
    pub duration: u64,

    /// Largest number of minutes the operator may enter
    #[arg(long, default_value = "180")]
    pub max_minutes: u64,

    /// How often viewers re-read the countdown, in milliseconds
    #[arg(long, default_value = "1000")]
    pub refresh_ms: u64,

    /// Remaining seconds below which the clock turns to the warning color
    #[arg(long, default_value = "180")]
    pub warning_secs: u64,

    /// Remaining seconds at or below which the clock turns red
    #[arg(long, default_value = "60")]
    pub critical_secs: u64,

    /// Remaining seconds that fire the stage effect
    #[arg(long = "effect-at", value_delimiter = ',', default_value = "60,30")]
    pub effect_thresholds: Vec<u64>,

    /// How long the stage effect stays visible, in seconds (at most one hour)
    #[arg(long, default_value = "5")]
    pub effect_secs: u64,

    /// How remaining time is matched against effect thresholds
    #[arg(long, value_enum, default_value_t = TriggerPolicy::Crossing)]
    pub trigger: TriggerPolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Countdown settings derived from the arguments, with the startup
    /// duration clamped to the operator limit
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            default_duration_secs: self.duration.min(self.max_minutes) * 60,
            max_minutes: self.max_minutes,
            refresh_interval_ms: self.refresh_ms.max(100),
            warning_secs: self.warning_secs,
            critical_secs: self.critical_secs,
            trigger: EffectTrigger::new(
                self.effect_thresholds.clone(),
                self.effect_secs.min(MAX_EFFECT_SECS),
                self.trigger,
            ),
        }
    }
}
