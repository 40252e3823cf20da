//! Server-side countdown sampler

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{state::AppState, view::format_clock};

/// Background task that samples the countdown at the refresh cadence so
/// threshold effects fire even when no stage view is polling
pub async fn threshold_monitor_task(state: Arc<AppState>) {
    let period = Duration::from_millis(state.settings.refresh_interval_ms);
    info!("Starting threshold monitor task ({}ms)", period.as_millis());

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut updates = state.subscribe();
    let mut was_expired = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match state.observe() {
                    Ok(timer) => {
                        let now = state.now();
                        let expired = timer.is_expired(now);
                        if expired && !was_expired {
                            info!("Countdown ended");
                        }
                        was_expired = expired;
                    }
                    Err(e) => {
                        warn!("Failed to sample countdown: {}", e);
                    }
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Timer update channel closed, stopping threshold monitor");
                    break;
                }
                let revision = *updates.borrow_and_update();
                if let Ok(timer) = state.get_timer_state() {
                    debug!(
                        "Timer revision {}: running={}, remaining={}",
                        revision,
                        timer.running,
                        format_clock(timer.remaining(state.now())),
                    );
                }
            }
        }
    }
}
