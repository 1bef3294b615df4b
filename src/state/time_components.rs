//! Formatting of accumulated durations into displayable components

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Zero-pad to at least two digits
pub fn pad(value: u64) -> String {
    format!("{:02}", value)
}

/// Zero-pad to three digits
pub fn milli_pad(value: u32) -> String {
    format!("{:03}", value)
}

/// Join hours, minutes and seconds the way the notification shows them
pub fn format_time(hours: &str, minutes: &str, seconds: &str) -> String {
    format!("{}:{}:{}", hours, minutes, seconds)
}

/// The four independently published strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeComponents {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub milliseconds: String,
}

impl TimeComponents {
    /// Derive components from the two accumulators.
    ///
    /// `seconds` feeds hours/minutes/seconds, `milliseconds` only feeds the
    /// sub-second field. Hours are cumulative and never wrap.
    pub fn from_accumulators(seconds: Duration, milliseconds: Duration) -> Self {
        let total = seconds.as_secs();
        Self {
            hours: pad(total / 3600),
            minutes: pad((total % 3600) / 60),
            seconds: pad(total % 60),
            milliseconds: milli_pad(milliseconds.subsec_millis()),
        }
    }

    /// `HH:MM:SS` for the notification content
    pub fn clock(&self) -> String {
        format_time(&self.hours, &self.minutes, &self.seconds)
    }
}

impl Default for TimeComponents {
    fn default() -> Self {
        Self::from_accumulators(Duration::ZERO, Duration::ZERO)
    }
}
