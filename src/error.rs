//! Error type shared by the state machine, the service and the API

use std::{error, fmt};

use crate::state::{Command, StopwatchState};

/// Everything that can go wrong while driving the stopwatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopwatchError {
    /// The command is not allowed from the current state
    InvalidTransition {
        from: StopwatchState,
        command: Command,
    },
    /// A state name that does not correspond to any command (only `Idle`)
    NotACommand(StopwatchState),
    /// Display precision can't change while the stopwatch is running
    PrecisionLocked,
    /// A mutex guarding shared state was poisoned by a panicking holder
    LockPoisoned(String),
}

impl StopwatchError {
    /// Whether the error was caused by the caller rather than by the service
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::LockPoisoned(_))
    }
}

impl fmt::Display for StopwatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, command } => {
                write!(f, "cannot {} a stopwatch that is {}", command, from)
            }
            Self::NotACommand(state) => write!(f, "{} is not a command state", state),
            Self::PrecisionLocked => {
                write!(f, "display precision cannot change while the stopwatch is running")
            }
            Self::LockPoisoned(what) => write!(f, "failed to lock {}", what),
        }
    }
}

impl error::Error for StopwatchError {}
