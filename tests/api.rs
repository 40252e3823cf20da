use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use stage_timer::{
    create_router,
    state::{AppState, ManualClock, TimerSettings},
};

fn app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new("2024-03-27T12:00:00Z".parse().unwrap()));
    let state = Arc::new(AppState::with_clock(
        0,
        "127.0.0.1".to_string(),
        TimerSettings::default(),
        clock.clone(),
    ));
    (create_router(state), clock)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn view_mode_defaults_to_control() {
    let (app, _clock) = app();

    let (status, body) = send(&app, Method::GET, "/view", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "control");
    assert_eq!(body["links"]["stage"], "/view?mode=stage");

    let (_, body) = send(&app, Method::GET, "/view?mode=unknown", None).await;
    assert_eq!(body["mode"], "control");

    let (_, body) = send(&app, Method::GET, "/view?mode=stage", None).await;
    assert_eq!(body["mode"], "stage");
    assert_eq!(body["time"], "15:00");
}

#[tokio::test]
async fn stage_follows_control_actions() {
    let (app, clock) = app();

    let (status, body) = send(&app, Method::POST, "/api/duration", Some(json!({ "minutes": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 180);

    send(&app, Method::POST, "/api/start", None).await;
    let (_, stage) = send(&app, Method::GET, "/api/stage", None).await;
    assert_eq!(stage["time"], "03:00");
    assert_eq!(stage["urgency"], "default");

    clock.advance_secs(60);
    let (_, stage) = send(&app, Method::GET, "/api/stage", None).await;
    assert_eq!(stage["time"], "02:00");
    assert_eq!(stage["urgency"], "warning");

    clock.advance_secs(61);
    let (_, stage) = send(&app, Method::GET, "/api/stage", None).await;
    assert_eq!(stage["time"], "00:59");
    assert_eq!(stage["urgency"], "critical");
    assert_eq!(stage["effect_active"], true);
}

#[tokio::test]
async fn pause_reset_and_double_start() {
    let (app, clock) = app();

    send(&app, Method::POST, "/api/duration", Some(json!({ "minutes": 1, "seconds": 40 }))).await;
    send(&app, Method::POST, "/api/start", None).await;
    clock.advance_secs(10);

    // A second start must not move the baseline
    let (_, body) = send(&app, Method::POST, "/api/start", None).await;
    assert_eq!(body["stage"]["remaining_seconds"], 90);

    let (_, body) = send(&app, Method::POST, "/api/reset", None).await;
    assert_eq!(body["stage"]["remaining_seconds"], 100);
    assert_eq!(body["stage"]["running"], false);

    send(&app, Method::POST, "/api/start", None).await;
    clock.advance_secs(10);
    let (_, body) = send(&app, Method::POST, "/api/pause", None).await;
    assert_eq!(body["duration"], 90);

    clock.advance_secs(30);
    let (_, body) = send(&app, Method::POST, "/api/pause", None).await;
    assert_eq!(body["duration"], 90);
}

#[tokio::test]
async fn expired_countdown_reports_ended() {
    let (app, clock) = app();

    send(&app, Method::POST, "/api/duration", Some(json!({ "seconds": 5 }))).await;
    send(&app, Method::POST, "/api/start", None).await;
    clock.advance_secs(20);

    let (_, stage) = send(&app, Method::GET, "/api/stage", None).await;
    assert_eq!(stage["time"], "00:00");
    assert_eq!(stage["ended"], true);
    assert_eq!(stage["running"], true);
}

#[tokio::test]
async fn duration_input_is_clamped_or_rejected() {
    let (app, _clock) = app();

    let (status, body) = send(&app, Method::POST, "/api/duration", Some(json!({ "minutes": 999 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 180 * 60);

    let (_, body) = send(&app, Method::POST, "/api/duration", Some(json!({ "minutes": -4, "seconds": 9 }))).await;
    assert_eq!(body["stage"]["time"], "00:09");

    let (status, _) = send(&app, Method::POST, "/api/duration", Some(json!({ "preset": 7 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::POST, "/api/duration", Some(json!({ "preset": 10 }))).await;
    assert_eq!(body["stage"]["time"], "10:00");
}

#[tokio::test]
async fn malformed_duration_leaves_countdown_alone() {
    let (app, _clock) = app();

    for body in [
        json!({ "preset": -1 }),
        json!({ "preset": "ten" }),
        json!({ "preset": 2.5 }),
        json!({}),
    ] {
        let (status, _) = send(&app, Method::POST, "/api/duration", Some(body.clone())).await;
        assert!(status.is_client_error(), "{} gave {}", body, status);

        let (_, control) = send(&app, Method::GET, "/api/control", None).await;
        assert_eq!(control["duration"], 15 * 60, "{} changed the countdown", body);
    }
}

#[tokio::test]
async fn resumed_countdown_fires_effect_on_first_poll() {
    let (app, clock) = app();

    send(&app, Method::POST, "/api/duration", Some(json!({ "seconds": 61 }))).await;
    send(&app, Method::POST, "/api/start", None).await;
    clock.advance_secs(1);

    let (_, stage) = send(&app, Method::GET, "/api/stage", None).await;
    assert_eq!(stage["time"], "01:00");
    assert_eq!(stage["effect_active"], true);
}

#[tokio::test]
async fn blank_message_shows_nothing() {
    let (app, _clock) = app();

    let (_, body) = send(&app, Method::POST, "/api/message", Some(json!({ "text": "   " }))).await;
    assert_eq!(body["stage"]["message"], Value::Null);

    let (_, body) = send(&app, Method::POST, "/api/message", Some(json!({ "text": "Five minutes" }))).await;
    assert_eq!(body["stage"]["message"], "Five minutes");

    let (status, body) = send(&app, Method::DELETE, "/api/message", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stage"]["message"], Value::Null);
}

#[tokio::test]
async fn display_updates_reach_stage() {
    let (app, _clock) = app();

    let update = json!({ "background": "navy", "ticker": true, "ticker_speed": 42, "spin": true });
    let (status, _) = send(&app, Method::PATCH, "/api/display", Some(update)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stage) = send(&app, Method::GET, "/api/stage", None).await;
    assert_eq!(stage["background"], "#001f3f");
    assert_eq!(stage["ticker"], true);
    assert_eq!(stage["ticker_speed"], 10);
    assert_eq!(stage["spin"], true);
    assert_eq!(stage["shake"], false);

    let (status, _) = send(&app, Method::PATCH, "/api/display", Some(json!({ "background": "rainbow" }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn manual_effect_expires() {
    let (app, clock) = app();

    let (_, body) = send(&app, Method::POST, "/api/effect", None).await;
    assert_eq!(body["stage"]["effect_active"], true);

    clock.advance_secs(5);
    let (_, stage) = send(&app, Method::GET, "/api/stage", None).await;
    assert_eq!(stage["effect_active"], false);
}

#[tokio::test]
async fn health_and_status() {
    let (app, _clock) = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    send(&app, Method::POST, "/api/start", None).await;
    let (_, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(body["running"], true);
    assert_eq!(body["remaining_seconds"], 900);
    assert_eq!(body["last_action"], "start");
}
