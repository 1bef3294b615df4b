//! Stopwatch Service - a background stopwatch with an HTTP control surface
//!
//! This library provides the stopwatch state machine, the tick tasks that
//! drive it, the presentation models (display and notification) derived from
//! its published values, and the HTTP API used to control it.

pub mod api;
pub mod config;
pub mod error;
pub mod presentation;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::StopwatchError;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
