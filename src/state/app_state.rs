//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Clock, DisplayUpdate, EffectTrigger, SystemClock, TimerState};

/// Countdown and presentation settings fixed at startup
#[derive(Debug, Clone)]
pub struct TimerSettings {
    /// Countdown value of a freshly started server, in seconds
    pub default_duration_secs: u64,
    /// Upper bound for operator-entered minutes
    pub max_minutes: u64,
    /// Cadence at which viewers re-read the shared record
    pub refresh_interval_ms: u64,
    /// Below this many seconds the clock shows the warning color
    pub warning_secs: u64,
    /// At or below this many seconds the clock shows the critical color
    pub critical_secs: u64,
    pub trigger: EffectTrigger,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_duration_secs: 15 * 60,
            max_minutes: 180,
            refresh_interval_ms: 1000,
            warning_secs: 180,
            critical_secs: 60,
            trigger: EffectTrigger::default(),
        }
    }
}

/// Main application state that owns the single shared countdown record
#[derive(Debug)]
pub struct AppState {
    /// The shared countdown, mutated only through the methods below
    pub timer_state: Arc<Mutex<TimerState>>,
    pub settings: TimerSettings,
    clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Revision of the record after each mutation
    pub timer_update_tx: watch::Sender<u64>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<u64>,
}

impl AppState {
    /// Create a new AppState reading the system clock
    pub fn new(port: u16, host: String, settings: TimerSettings) -> Self {
        Self::with_clock(port, host, settings, Arc::new(SystemClock))
    }

    /// Create a new AppState reading the given clock
    pub fn with_clock(
        port: u16,
        host: String,
        settings: TimerSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let timer = TimerState::new(settings.default_duration_secs, clock.now());
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.revision);

        Self {
            timer_state: Arc::new(Mutex::new(timer)),
            settings,
            clock,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Current wall-clock instant
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Apply a mutation under the record lock and notify watchers if it changed anything
    pub fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerState, String>
    where
        F: FnOnce(&mut TimerState, DateTime<Utc>) -> bool,
    {
        let now = self.now();
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let changed = updater(&mut *timer, now);
        let snapshot = timer.clone();
        drop(timer); // Release the lock early

        if !changed {
            debug!("{} left the timer unchanged", action);
            return Ok(snapshot);
        }

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(now);
        }

        self.notify(snapshot.revision);
        Ok(snapshot)
    }

    fn notify(&self, revision: u64) {
        if let Err(e) = self.timer_update_tx.send(revision) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Replace the countdown value and stop the clock
    pub fn set_duration(&self, seconds: u64) -> Result<TimerState, String> {
        info!("Setting countdown to {}s", seconds);
        self.update_timer("set-duration", |timer, now| {
            timer.set_duration(seconds, now);
            true
        })
    }

    /// Start the countdown
    pub fn start(&self) -> Result<TimerState, String> {
        let snapshot = self.update_timer("start", |timer, now| timer.start(now))?;
        info!("Countdown running with {}s left", snapshot.remaining(self.now()));
        Ok(snapshot)
    }

    /// Pause the countdown, keeping what is left
    pub fn pause(&self) -> Result<TimerState, String> {
        let snapshot = self.update_timer("pause", |timer, now| timer.pause(now))?;
        info!("Countdown paused at {}s", snapshot.duration);
        Ok(snapshot)
    }

    /// Stop the countdown without rewinding the clock value
    pub fn reset(&self) -> Result<TimerState, String> {
        let snapshot = self.update_timer("reset", |timer, now| timer.reset(now))?;
        info!("Countdown reset to {}s", snapshot.duration);
        Ok(snapshot)
    }

    /// Replace the stage message
    pub fn set_message(&self, text: String) -> Result<TimerState, String> {
        info!("Setting stage message ({} chars)", text.chars().count());
        self.update_timer("message", |timer, now| {
            timer.set_message(text, now);
            true
        })
    }

    /// Remove the stage message
    pub fn clear_message(&self) -> Result<TimerState, String> {
        info!("Clearing stage message");
        self.update_timer("clear-message", |timer, now| {
            timer.clear_message(now);
            true
        })
    }

    /// Apply a partial display configuration update
    pub fn update_display(&self, update: DisplayUpdate) -> Result<TimerState, String> {
        debug!("Updating display config: {:?}", update);
        self.update_timer("display", |timer, now| {
            timer.update_display(&update, now);
            true
        })
    }

    /// Show the stage effect for the configured length
    pub fn trigger_effect(&self) -> Result<TimerState, String> {
        let secs = self.settings.trigger.effect_secs;
        info!("Triggering stage effect for {}s", secs);
        self.update_timer("effect", |timer, now| {
            timer.trigger_effect(secs, now);
            true
        })
    }

    /// Read the record and sample the effect thresholds in the same critical section
    pub fn observe(&self) -> Result<TimerState, String> {
        let now = self.now();
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let fired = timer.sample_effect(&self.settings.trigger, now);
        let snapshot = timer.clone();
        drop(timer);

        if let Some(threshold) = fired {
            info!("Remaining time reached {}s, stage effect triggered", threshold);
            self.notify(snapshot.revision);
        }

        Ok(snapshot)
    }

    /// Get a copy of the record without sampling
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Receive the record revision after each mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
