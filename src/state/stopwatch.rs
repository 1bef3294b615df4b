//! The stopwatch as a plain value type
//!
//! No timers live here: the service drives `tick` from its own tasks and this
//! type only decides whether a command or tick is accepted.

use std::time::Duration;

use super::{Command, StopwatchState, TimeComponents};
use crate::error::StopwatchError;

/// Which accumulator a tick advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    Millisecond,
    Second,
}

impl TickUnit {
    /// Cadence of the tick and the amount it adds
    pub fn period(self) -> Duration {
        match self {
            Self::Millisecond => Duration::from_millis(1),
            Self::Second => Duration::from_secs(1),
        }
    }
}

/// Identifier of a start..stop interval; ticks from an older run are ignored
pub type RunId = u64;

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    state: StopwatchState,
    seconds: Duration,
    milliseconds: Duration,
    run: RunId,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    /// Accumulated whole seconds
    pub fn seconds(&self) -> Duration {
        self.seconds
    }

    /// Accumulated milliseconds
    pub fn milliseconds(&self) -> Duration {
        self.milliseconds
    }

    /// Id of the current (or last) run
    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn components(&self) -> TimeComponents {
        TimeComponents::from_accumulators(self.seconds, self.milliseconds)
    }

    /// Start or resume; returns the id the tick sources must present
    pub fn start(&mut self) -> Result<RunId, StopwatchError> {
        self.state = Command::Start.transition(self.state)?;
        self.run += 1;
        Ok(self.run)
    }

    /// Halt accumulation, keeping what has been accumulated
    pub fn stop(&mut self) -> Result<(), StopwatchError> {
        self.state = Command::Stop.transition(self.state)?;
        Ok(())
    }

    /// Zero both accumulators and return to idle
    pub fn cancel(&mut self) -> Result<(), StopwatchError> {
        self.state = Command::Cancel.transition(self.state)?;
        self.seconds = Duration::ZERO;
        self.milliseconds = Duration::ZERO;
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Result<Option<RunId>, StopwatchError> {
        match command {
            Command::Start => self.start().map(Some),
            Command::Stop => self.stop().map(|_| None),
            Command::Cancel => self.cancel().map(|_| None),
        }
    }

    /// Advance one accumulator by one period.
    ///
    /// Returns `false` when the tick belongs to a run that is no longer
    /// current, in which case nothing changes.
    pub fn tick(&mut self, run: RunId, unit: TickUnit) -> bool {
        if !self.state.is_running() || run != self.run {
            return false;
        }
        match unit {
            TickUnit::Millisecond => self.milliseconds += unit.period(),
            TickUnit::Second => self.seconds += unit.period(),
        }
        true
    }
}
