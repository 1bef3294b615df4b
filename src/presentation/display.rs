//! Main display model

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::state::{StopwatchSnapshot, StopwatchState};

/// Whether the display includes the millisecond field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPrecision {
    Seconds,
    #[default]
    Milliseconds,
}

impl fmt::Display for DisplayPrecision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Seconds => f.write_str("seconds"),
            Self::Milliseconds => f.write_str("milliseconds"),
        }
    }
}

/// What the main screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayView {
    pub hours_text: String,
    pub minutes_text: String,
    pub seconds_text: String,
    /// `None` when only seconds precision is selected
    pub milliseconds_text: Option<String>,
    /// Label of the start/stop button
    pub start_button: String,
    pub cancel_enabled: bool,
    /// The precision selector is hidden while the stopwatch runs
    pub precision_selectable: bool,
    pub precision: DisplayPrecision,
}

impl DisplayView {
    pub fn render(snapshot: &StopwatchSnapshot, precision: DisplayPrecision) -> Self {
        let time = &snapshot.time;
        let running = snapshot.state == StopwatchState::Started;

        Self {
            hours_text: format!("{}:", time.hours),
            minutes_text: format!("{}:", time.minutes),
            seconds_text: time.seconds.clone(),
            milliseconds_text: match precision {
                DisplayPrecision::Milliseconds => Some(format!(":{}", time.milliseconds)),
                DisplayPrecision::Seconds => None,
            },
            start_button: if running { "Stop" } else { "Start" }.to_string(),
            cancel_enabled: snapshot.state.is_active(),
            precision_selectable: !running,
            precision,
        }
    }

    /// Single-line rendering used in logs
    pub fn text(&self) -> String {
        let mut text = format!("{}{}{}", self.hours_text, self.minutes_text, self.seconds_text);
        if let Some(millis) = &self.milliseconds_text {
            text.push_str(millis);
        }
        text
    }
}
