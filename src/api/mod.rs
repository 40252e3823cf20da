//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/view", get(view_handler))
        .route("/api/stage", get(stage_handler))
        .route("/api/control", get(control_handler))
        .route("/api/duration", post(duration_handler))
        .route("/api/start", post(start_handler))
        .route("/api/pause", post(pause_handler))
        .route("/api/reset", post(reset_handler))
        .route("/api/message", post(message_handler).delete(clear_message_handler))
        .route("/api/display", patch(display_handler))
        .route("/api/effect", post(effect_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
