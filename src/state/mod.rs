//! State management module
//!
//! The stopwatch value type, its lifecycle, the formatting of accumulated
//! time and the shared service state that publishes all of it.

pub mod app_state;
pub mod stopwatch;
pub mod stopwatch_state;
pub mod time_components;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use app_state::{AppState, Subscription};
pub use stopwatch::{RunId, Stopwatch, TickUnit};
pub use stopwatch_state::{Command, StopwatchState};
pub use time_components::TimeComponents;

/// Published state plus the four time components
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StopwatchSnapshot {
    pub state: StopwatchState,
    #[serde(flatten)]
    pub time: TimeComponents,
}
