//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::StopwatchError,
    presentation::{DisplayView, NotificationView},
    state::{AppState, StopwatchSnapshot},
};
use super::responses::{
    ApiResponse, CommandRequest, HealthResponse, PrecisionRequest, StatusResponse,
};

type CommandResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Turn a command outcome into a response; rejections become 409 with the
/// unchanged snapshot, lock failures become 500
fn respond(
    state: &AppState,
    outcome: Result<StopwatchSnapshot, StopwatchError>,
    message: &str,
) -> CommandResult {
    match outcome {
        Ok(snapshot) => {
            info!("{}", message);
            Ok(Json(ApiResponse::ok(message.to_string(), snapshot)))
        }
        Err(e) if e.is_rejection() => {
            warn!("Command rejected: {}", e);
            Err((
                StatusCode::CONFLICT,
                Json(ApiResponse::error(e.to_string(), state.snapshot())),
            ))
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string(), state.snapshot())),
            ))
        }
    }
}

/// Handle POST /start - Start or resume the stopwatch
pub async fn start_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond(&state, state.start(), "Stopwatch started")
}

/// Handle POST /stop - Stop the stopwatch, keeping elapsed time
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond(&state, state.stop(), "Stopwatch stopped")
}

/// Handle POST /cancel - Reset the stopwatch to zero
pub async fn cancel_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    respond(&state, state.cancel(), "Stopwatch canceled")
}

/// Handle POST /toggle - Stop if running, start otherwise
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    let outcome = state.toggle();
    let message = match &outcome {
        Ok(snapshot) if snapshot.state.is_running() => "Stopwatch started",
        _ => "Stopwatch stopped",
    };
    respond(&state, outcome, message)
}

/// Handle POST /command - Apply the command named by a target state
pub async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> CommandResult {
    let message = format!("Stopwatch moved towards {}", request.state);
    respond(&state, state.apply(request.state), &message)
}

/// Handle PUT /precision - Choose whether the display shows milliseconds
pub async fn precision_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PrecisionRequest>,
) -> CommandResult {
    let outcome = state
        .set_precision(request.precision)
        .map(|_| state.snapshot());
    let message = format!("Display precision set to {}", request.precision);
    respond(&state, outcome, &message)
}

/// Handle GET /status - Return current stopwatch status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_command, last_command_time) = state.get_last_command();

    Json(StatusResponse {
        stopwatch: state.snapshot(),
        precision: state.precision(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_command,
        last_command_time,
    })
}

/// Handle GET /display - Return the rendered main display
pub async fn display_handler(State(state): State<Arc<AppState>>) -> Json<DisplayView> {
    Json(state.presentation().display)
}

/// Handle GET /notification - Return the rendered notification
pub async fn notification_handler(State(state): State<Arc<AppState>>) -> Json<NotificationView> {
    Json(state.presentation().notification)
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
