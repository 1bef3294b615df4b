//! Presentation adapter
//!
//! Turns published stopwatch values into the models a front end would draw:
//! the main display and the persistent notification. Nothing here renders;
//! the models are served over the API and logged.

pub mod display;
pub mod notification;

use serde::{Deserialize, Serialize};

use crate::state::StopwatchSnapshot;

pub use display::{DisplayPrecision, DisplayView};
pub use notification::{NotificationAction, NotificationView};

/// Everything the presenter keeps up to date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub display: DisplayView,
    pub notification: NotificationView,
}

impl Presentation {
    pub fn render(snapshot: &StopwatchSnapshot, precision: DisplayPrecision) -> Self {
        Self {
            display: DisplayView::render(snapshot, precision),
            notification: NotificationView::render(snapshot),
        }
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::render(&StopwatchSnapshot::default(), DisplayPrecision::default())
    }
}
