//! Persistent notification model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{Command, StopwatchSnapshot, StopwatchState};

pub const NOTIFICATION_TITLE: &str = "Stopwatch";

/// A button on the notification and the command it sends back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub command: Command,
}

impl NotificationAction {
    fn new(label: &str, command: Command) -> Self {
        Self {
            label: label.to_string(),
            command,
        }
    }
}

/// The notification shown while a session is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationView {
    /// Posted while started or stopped, withdrawn after cancel
    pub visible: bool,
    pub title: String,
    /// `HH:MM:SS`
    pub content_text: String,
    pub actions: Vec<NotificationAction>,
}

impl NotificationView {
    pub fn render(snapshot: &StopwatchSnapshot) -> Self {
        let primary = match snapshot.state {
            StopwatchState::Started => Some(NotificationAction::new("Stop", Command::Stop)),
            StopwatchState::Stopped => Some(NotificationAction::new("Resume", Command::Start)),
            StopwatchState::Idle | StopwatchState::Canceled => None,
        };
        let actions = match primary {
            Some(primary) => vec![primary, NotificationAction::new("Cancel", Command::Cancel)],
            None => Vec::new(),
        };

        Self {
            visible: snapshot.state.is_active(),
            title: NOTIFICATION_TITLE.to_string(),
            content_text: snapshot.time.clock(),
            actions,
        }
    }
}

impl fmt::Display for NotificationView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.visible {
            return f.write_str("(withdrawn)");
        }
        write!(f, "{}: {}", self.title, self.content_text)?;
        for action in &self.actions {
            write!(f, " [{}]", action.label)?;
        }
        Ok(())
    }
}
