//! Shared countdown record and its transitions
//!
//! The record never ticks on its own. While running it only remembers the
//! remaining time at the moment the run began plus the start instant, and
//! every reader derives the true remaining time from those two values and
//! the current clock. Elapsed time is folded into `duration` only on pause.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DisplayConfig, DisplayUpdate, EffectState, EffectTrigger};

/// Authoritative countdown record shared by every viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    /// Remaining seconds when stopped; remaining seconds at `start_time` when running
    pub duration: u64,
    /// Start of the current run, present exactly while running
    pub start_time: Option<DateTime<Utc>>,
    pub running: bool,
    pub message: String,
    /// Last mutation time, never moves backwards
    pub last_update: DateTime<Utc>,
    /// Bumped on every mutation
    pub revision: u64,
    pub effect: EffectState,
    pub display: DisplayConfig,
}

impl TimerState {
    /// Create a stopped countdown holding `duration` seconds
    pub fn new(duration: u64, now: DateTime<Utc>) -> Self {
        Self {
            duration,
            start_time: None,
            running: false,
            message: String::new(),
            last_update: now,
            revision: 0,
            effect: EffectState::new(),
            display: DisplayConfig::default(),
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_update = self.last_update.max(now);
        self.revision += 1;
    }

    /// Replace the countdown value and stop the clock, whatever the prior state
    pub fn set_duration(&mut self, seconds: u64, now: DateTime<Utc>) {
        self.duration = seconds;
        self.start_time = None;
        self.running = false;
        self.effect.rearm();
        self.touch(now);
    }

    /// Start counting down from `duration`. No-op while already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.running {
            return false;
        }
        self.start_time = Some(now);
        self.running = true;
        self.effect.prime(self.duration);
        self.touch(now);
        true
    }

    /// Fold elapsed time into `duration` and stop. No-op while stopped.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if !self.running {
            return false;
        }
        self.duration = self.remaining(now);
        self.start_time = None;
        self.running = false;
        self.effect.interrupt();
        self.touch(now);
        true
    }

    /// Stop without folding elapsed time, so `duration` is unchanged.
    /// The thresholds are re-armed since the clock is back at `duration`.
    /// No-op while stopped.
    pub fn reset(&mut self, now: DateTime<Utc>) -> bool {
        if !self.running {
            return false;
        }
        self.start_time = None;
        self.running = false;
        self.effect.rearm();
        self.touch(now);
        true
    }

    /// Whole seconds left at `now`, floored and never negative
    pub fn remaining(&self, now: DateTime<Utc>) -> u64 {
        match (self.running, self.start_time) {
            (true, Some(start)) => {
                let elapsed_ms = (now - start).num_milliseconds().max(0) as u64;
                let total_ms = self.duration.saturating_mul(1000);
                total_ms.saturating_sub(elapsed_ms) / 1000
            }
            _ => self.duration,
        }
    }

    /// Running with nothing left. Derived, never stored.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.running && self.remaining(now) == 0
    }

    pub fn set_message(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.message = text.into();
        self.touch(now);
    }

    pub fn clear_message(&mut self, now: DateTime<Utc>) {
        self.message.clear();
        self.touch(now);
    }

    pub fn update_display(&mut self, update: &DisplayUpdate, now: DateTime<Utc>) {
        self.display.apply(update);
        self.touch(now);
    }

    /// Open the effect window by hand
    pub fn trigger_effect(&mut self, secs: u64, now: DateTime<Utc>) {
        self.effect.fire(now, secs);
        self.touch(now);
    }

    /// Sample the countdown against the effect thresholds.
    /// Returns the threshold that fired, if any.
    pub fn sample_effect(&mut self, trigger: &EffectTrigger, now: DateTime<Utc>) -> Option<u64> {
        if !self.running {
            return None;
        }
        let remaining = self.remaining(now);
        let fired = self.effect.sample(trigger, remaining, now);
        if fired.is_some() {
            self.touch(now);
        }
        fired
    }
}
