//! Stage Timer - A shared countdown timer for live events
//!
//! This is the main entry point for the stage-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use stage_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::threshold_monitor_task,
    utils::shutdown_signal,
    view::{format_clock, ViewMode},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stage_timer={},tower_http=info", config.log_level()))
        .init();

    let settings = config.timer_settings();
    info!("Starting stage-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, countdown={}, effect at {:?}s ({:?})",
          config.host, config.port, format_clock(settings.default_duration_secs),
          settings.trigger.thresholds, settings.trigger.policy);

    // Create the single shared countdown
    let state = Arc::new(AppState::new(config.port, config.host.clone(), settings));

    // Sample thresholds even when no stage is open
    let monitor_state = Arc::clone(&state);
    tokio::spawn(async move {
        threshold_monitor_task(monitor_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("  Control view: http://{}{}", addr, ViewMode::Control.link());
    info!("  Stage view:   http://{}{}", addr, ViewMode::Stage.link());

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
