//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    presentation::DisplayPrecision,
    state::{Command, StopwatchSnapshot, StopwatchState},
};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub stopwatch: StopwatchSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, stopwatch: StopwatchSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            stopwatch,
        }
    }

    /// Create a response for an accepted command
    pub fn ok(message: String, stopwatch: StopwatchSnapshot) -> Self {
        Self::new("ok".to_string(), message, stopwatch)
    }

    /// Create an error response
    pub fn error(message: String, stopwatch: StopwatchSnapshot) -> Self {
        Self::new("error".to_string(), message, stopwatch)
    }
}

/// Body of `POST /command`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub state: StopwatchState,
}

/// Body of `PUT /precision`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecisionRequest {
    pub precision: DisplayPrecision,
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub stopwatch: StopwatchSnapshot,
    pub precision: DisplayPrecision,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_command: Option<Command>,
    pub last_command_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
