use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use stopwatch_service::{
    api::create_router, presentation::DisplayPrecision, state::AppState, tasks::presenter_task,
};

fn setup() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), DisplayPrecision::Milliseconds));
    tokio::spawn(presenter_task(Arc::clone(&state)));
    let router = create_router(Arc::clone(&state));
    (state, router)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test(start_paused = true)]
async fn test_health() {
    let (_, router) = setup();
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn test_full_session() {
    let (_, router) = setup();

    let (status, body) = send(&router, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["stopwatch"]["state"], "Started");

    tokio::time::sleep(Duration::from_millis(2_200)).await;

    let (_, notification) = send(&router, "GET", "/notification", None).await;
    assert_eq!(notification["visible"], true);
    assert_eq!(notification["content_text"], "00:00:02");
    assert_eq!(notification["actions"][0]["label"], "Stop");

    let (status, body) = send(&router, "POST", "/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stopwatch"]["state"], "Stopped");
    assert_eq!(body["stopwatch"]["seconds"], "02");

    tokio::time::sleep(Duration::from_millis(10)).await;
    let (_, notification) = send(&router, "GET", "/notification", None).await;
    assert_eq!(notification["actions"][0]["label"], "Resume");
    assert_eq!(notification["actions"][0]["command"], "start");

    let (status, body) = send(&router, "POST", "/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stopwatch"]["state"], "Idle");
    assert_eq!(body["stopwatch"]["hours"], "00");
    assert_eq!(body["stopwatch"]["minutes"], "00");
    assert_eq!(body["stopwatch"]["seconds"], "00");
    assert_eq!(body["stopwatch"]["milliseconds"], "000");

    tokio::time::sleep(Duration::from_millis(10)).await;
    let (_, notification) = send(&router, "GET", "/notification", None).await;
    assert_eq!(notification["visible"], false);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_transition_is_conflict() {
    let (state, router) = setup();

    let (status, body) = send(&router, "POST", "/stop", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["stopwatch"]["state"], "Idle");

    let (status, _) = send(&router, "POST", "/cancel", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&router, "POST", "/start", None).await;
    let (status, body) = send(&router, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "cannot start a stopwatch that is Started");
    assert!(state.snapshot().state.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_toggle_acts_as_start_stop_button() {
    let (_, router) = setup();

    let (_, body) = send(&router, "POST", "/toggle", None).await;
    assert_eq!(body["stopwatch"]["state"], "Started");
    tokio::time::sleep(Duration::from_millis(10)).await;
    let (_, display) = send(&router, "GET", "/display", None).await;
    assert_eq!(display["start_button"], "Stop");

    let (_, body) = send(&router, "POST", "/toggle", None).await;
    assert_eq!(body["stopwatch"]["state"], "Stopped");
    assert_eq!(body["message"], "Stopwatch stopped");
}

#[tokio::test(start_paused = true)]
async fn test_command_by_state_name() {
    let (_, router) = setup();

    let (status, body) = send(&router, "POST", "/command", Some(json!({ "state": "Started" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stopwatch"]["state"], "Started");

    let (status, body) = send(&router, "POST", "/command", Some(json!({ "state": "Canceled" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stopwatch"]["state"], "Idle");

    let (status, _) = send(&router, "POST", "/command", Some(json!({ "state": "Idle" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&router, "POST", "/command", Some(json!({ "state": "Paused" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(start_paused = true)]
async fn test_precision_selection() {
    let (_, router) = setup();

    let (status, _) = send(&router, "PUT", "/precision", Some(json!({ "precision": "seconds" }))).await;
    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(Duration::from_millis(10)).await;

    let (_, display) = send(&router, "GET", "/display", None).await;
    assert_eq!(display["precision"], "seconds");
    assert_eq!(display["milliseconds_text"], Value::Null);

    send(&router, "POST", "/start", None).await;
    let (status, body) = send(&router, "PUT", "/precision", Some(json!({ "precision": "milliseconds" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
}

#[tokio::test(start_paused = true)]
async fn test_status_reports_last_command() {
    let (_, router) = setup();

    let (_, status_body) = send(&router, "GET", "/status", None).await;
    assert_eq!(status_body["last_command"], Value::Null);
    assert_eq!(status_body["port"], 20554);

    send(&router, "POST", "/start", None).await;
    let (status, status_body) = send(&router, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_body["last_command"], "start");
    assert_eq!(status_body["stopwatch"]["state"], "Started");
    assert_eq!(status_body["precision"], "milliseconds");
}
