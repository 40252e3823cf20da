//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, DisplayUpdate, TimerState},
    view::{self, limit_message, ControlView, DurationInput, StageView, ViewMode, ViewModel},
};
use super::responses::{HealthResponse, MessageRequest, StatusResponse, ViewQuery};

/// Turn the outcome of a control action into the operator view
fn control_response(
    state: &AppState,
    action: &str,
    result: Result<TimerState, String>,
) -> Result<Json<ControlView>, StatusCode> {
    match result {
        Ok(timer) => {
            info!("{} endpoint called", action);
            Ok(Json(view::control_view(&timer, &state.settings, state.now())))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /view?mode= - View model for the selected role
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewModel>, StatusCode> {
    let mode = ViewMode::from_param(query.mode.as_deref());
    match state.observe() {
        Ok(timer) => Ok(Json(view::view_for(mode, &timer, &state.settings, state.now()))),
        Err(e) => {
            error!("Failed to read timer for {} view: {}", mode.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /api/stage - Audience view
pub async fn stage_handler(State(state): State<Arc<AppState>>) -> Result<Json<StageView>, StatusCode> {
    match state.observe() {
        Ok(timer) => Ok(Json(view::stage_view(&timer, &state.settings, state.now()))),
        Err(e) => {
            error!("Failed to read timer for stage view: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /api/control - Operator view
pub async fn control_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlView>, StatusCode> {
    match state.observe() {
        Ok(timer) => Ok(Json(view::control_view(&timer, &state.settings, state.now()))),
        Err(e) => {
            error!("Failed to read timer for control view: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /api/duration - Set the countdown from a preset or custom entry
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DurationInput>,
) -> Result<Json<ControlView>, StatusCode> {
    let Some(seconds) = input.to_seconds(state.settings.max_minutes) else {
        warn!("Rejected duration input: {:?}", input);
        return Err(StatusCode::BAD_REQUEST);
    };
    control_response(&state, "set duration", state.set_duration(seconds))
}

/// Handle POST /api/start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlView>, StatusCode> {
    control_response(&state, "start", state.start())
}

/// Handle POST /api/pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlView>, StatusCode> {
    control_response(&state, "pause", state.pause())
}

/// Handle POST /api/reset - Stop the countdown without rewinding it
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlView>, StatusCode> {
    control_response(&state, "reset", state.reset())
}

/// Handle POST /api/message - Send a stage message
pub async fn message_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<ControlView>, StatusCode> {
    let text = limit_message(&request.text);
    control_response(&state, "send message", state.set_message(text))
}

/// Handle DELETE /api/message - Clear the stage message
pub async fn clear_message_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlView>, StatusCode> {
    control_response(&state, "clear message", state.clear_message())
}

/// Handle PATCH /api/display - Change display options
pub async fn display_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<DisplayUpdate>,
) -> Result<Json<ControlView>, StatusCode> {
    control_response(&state, "update display", state.update_display(update))
}

/// Handle POST /api/effect - Show the stage effect now
pub async fn effect_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlView>, StatusCode> {
    control_response(&state, "trigger effect", state.trigger_effect())
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        running: timer.running,
        remaining_seconds: timer.remaining(state.now()),
        revision: timer.revision,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
