//! Lifecycle states and the commands that move between them

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StopwatchError;

/// Lifecycle state of the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StopwatchState {
    /// Nothing accumulated, no ticks running
    #[default]
    Idle,
    /// Ticks running
    Started,
    /// Ticks halted, accumulated time kept
    Stopped,
    /// Target of a cancel; the machine passes through it and settles in `Idle`
    Canceled,
}

impl StopwatchState {
    /// Map a state name to the command that leads to it
    pub fn as_command(self) -> Result<Command, StopwatchError> {
        match self {
            Self::Started => Ok(Command::Start),
            Self::Stopped => Ok(Command::Stop),
            Self::Canceled => Ok(Command::Cancel),
            Self::Idle => Err(StopwatchError::NotACommand(self)),
        }
    }

    pub fn is_running(self) -> bool {
        self == Self::Started
    }

    /// Started or Stopped: there is a session the user can still act on
    pub fn is_active(self) -> bool {
        matches!(self, Self::Started | Self::Stopped)
    }
}

impl fmt::Display for StopwatchState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Started => "Started",
            Self::Stopped => "Stopped",
            Self::Canceled => "Canceled",
        };
        f.write_str(name)
    }
}

/// External command accepted by the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Start,
    Stop,
    Cancel,
}

impl Command {
    /// Check the command against the current state.
    ///
    /// Returns the state the machine settles in once the command is applied.
    pub fn transition(self, from: StopwatchState) -> Result<StopwatchState, StopwatchError> {
        let to = match (self, from) {
            (Self::Start, StopwatchState::Idle | StopwatchState::Stopped) => StopwatchState::Started,
            (Self::Stop, StopwatchState::Started) => StopwatchState::Stopped,
            (Self::Cancel, StopwatchState::Started | StopwatchState::Stopped) => StopwatchState::Idle,
            _ => return Err(StopwatchError::InvalidTransition { from, command: self }),
        };
        Ok(to)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Cancel => "cancel",
        };
        f.write_str(name)
    }
}
