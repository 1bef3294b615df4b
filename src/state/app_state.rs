//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Command, RunId, Stopwatch, StopwatchSnapshot, StopwatchState, TickUnit, TimeComponents};
use crate::{
    error::StopwatchError,
    presentation::{DisplayPrecision, Presentation},
    tasks::Tickers,
};

/// Lock a mutex, turning poisoning into a `StopwatchError`
fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, StopwatchError> {
    mutex
        .lock()
        .map_err(|_| StopwatchError::LockPoisoned(what.to_string()))
}

/// Replace the value only if it differs, so watchers wake on real changes
fn set_if_changed<T: PartialEq>(sender: &watch::Sender<T>, value: T) -> bool {
    sender.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    })
}

/// One observable holder per published value
#[derive(Debug)]
struct Published {
    state: watch::Sender<StopwatchState>,
    hours: watch::Sender<String>,
    minutes: watch::Sender<String>,
    seconds: watch::Sender<String>,
    milliseconds: watch::Sender<String>,
    precision: watch::Sender<DisplayPrecision>,
    presentation: watch::Sender<Presentation>,
}

impl Published {
    fn new(precision: DisplayPrecision) -> Self {
        let time = TimeComponents::default();
        let snapshot = StopwatchSnapshot::default();

        Self {
            state: watch::Sender::new(snapshot.state),
            hours: watch::Sender::new(time.hours),
            minutes: watch::Sender::new(time.minutes),
            seconds: watch::Sender::new(time.seconds),
            milliseconds: watch::Sender::new(time.milliseconds),
            precision: watch::Sender::new(precision),
            presentation: watch::Sender::new(Presentation::render(&snapshot, precision)),
        }
    }
}

/// Receivers for everything the presentation adapter observes
#[derive(Debug)]
pub struct Subscription {
    pub state: watch::Receiver<StopwatchState>,
    pub hours: watch::Receiver<String>,
    pub minutes: watch::Receiver<String>,
    pub seconds: watch::Receiver<String>,
    pub milliseconds: watch::Receiver<String>,
    pub precision: watch::Receiver<DisplayPrecision>,
}

impl Subscription {
    /// Wait until any observed value changes
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        tokio::select! {
            result = self.state.changed() => result,
            result = self.hours.changed() => result,
            result = self.minutes.changed() => result,
            result = self.seconds.changed() => result,
            result = self.milliseconds.changed() => result,
            result = self.precision.changed() => result,
        }
    }
}

/// Shared stopwatch service state
#[derive(Debug)]
pub struct AppState {
    /// The state machine and its accumulators
    stopwatch: Mutex<Stopwatch>,
    /// Tick tasks of the current run; also serializes commands
    tickers: Mutex<Option<Tickers>>,
    published: Published,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last accepted command
    last_command: Mutex<Option<(Command, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(port: u16, host: String, precision: DisplayPrecision) -> Self {
        Self {
            stopwatch: Mutex::new(Stopwatch::new()),
            tickers: Mutex::new(None),
            published: Published::new(precision),
            start_time: Instant::now(),
            port,
            host,
            last_command: Mutex::new(None),
        }
    }

    /// Start or resume the stopwatch and its tick tasks
    pub fn start(self: &Arc<Self>) -> Result<StopwatchSnapshot, StopwatchError> {
        self.execute(|_| Command::Start)
    }

    /// Halt the tick tasks, keeping the accumulated time
    pub fn stop(self: &Arc<Self>) -> Result<StopwatchSnapshot, StopwatchError> {
        self.execute(|_| Command::Stop)
    }

    /// Halt the tick tasks and reset to zero
    pub fn cancel(self: &Arc<Self>) -> Result<StopwatchSnapshot, StopwatchError> {
        self.execute(|_| Command::Cancel)
    }

    /// Stop when running, start otherwise
    pub fn toggle(self: &Arc<Self>) -> Result<StopwatchSnapshot, StopwatchError> {
        self.execute(|current| {
            if current.is_running() {
                Command::Stop
            } else {
                Command::Start
            }
        })
    }

    /// Apply the command named by a target state (`Started`, `Stopped`, `Canceled`)
    pub fn apply(self: &Arc<Self>, target: StopwatchState) -> Result<StopwatchSnapshot, StopwatchError> {
        let command = target.as_command()?;
        self.execute(|_| command)
    }

    /// Validate and apply a command chosen from the current state.
    ///
    /// The tickers lock is held for the whole call so commands never
    /// interleave; the stopwatch lock is always taken second.
    fn execute<F>(self: &Arc<Self>, choose: F) -> Result<StopwatchSnapshot, StopwatchError>
    where
        F: FnOnce(StopwatchState) -> Command,
    {
        let mut tickers = lock(&self.tickers, "tickers")?;

        let (command, outcome) = {
            let mut stopwatch = lock(&self.stopwatch, "stopwatch")?;
            let command = choose(stopwatch.state());
            let outcome = stopwatch.apply(command);
            if outcome.is_ok() {
                self.publish(&stopwatch);
            }
            (command, outcome)
        };

        let run = match outcome {
            Ok(run) => run,
            Err(e) => {
                warn!("Rejected {} command: {}", command, e);
                return Err(e);
            }
        };

        // Replacing the previous tickers aborts them
        *tickers = run.map(|run| Tickers::spawn(Arc::clone(self), run));
        drop(tickers);

        self.record(command);
        match run {
            Some(run) => info!("Stopwatch started (run {})", run),
            None => info!("Stopwatch {} applied", command),
        }

        Ok(self.snapshot())
    }

    /// Advance one accumulator on behalf of a tick task.
    ///
    /// Returns `Ok(false)` when `run` is no longer current and the task
    /// should exit.
    pub fn tick(&self, run: RunId, unit: TickUnit) -> Result<bool, StopwatchError> {
        let mut stopwatch = lock(&self.stopwatch, "stopwatch")?;
        let accepted = stopwatch.tick(run, unit);
        if accepted {
            self.publish(&stopwatch);
        }
        Ok(accepted)
    }

    /// Push the current state and components to every watcher
    fn publish(&self, stopwatch: &Stopwatch) {
        let time = stopwatch.components();
        let published = &self.published;

        set_if_changed(&published.state, stopwatch.state());
        set_if_changed(&published.hours, time.hours);
        set_if_changed(&published.minutes, time.minutes);
        set_if_changed(&published.seconds, time.seconds);
        set_if_changed(&published.milliseconds, time.milliseconds);
    }

    fn record(&self, command: Command) {
        if let Ok(mut last) = self.last_command.lock() {
            *last = Some((command, Utc::now()));
        }
    }

    /// Current published state and components
    pub fn snapshot(&self) -> StopwatchSnapshot {
        let published = &self.published;
        StopwatchSnapshot {
            state: *published.state.borrow(),
            time: TimeComponents {
                hours: published.hours.borrow().clone(),
                minutes: published.minutes.borrow().clone(),
                seconds: published.seconds.borrow().clone(),
                milliseconds: published.milliseconds.borrow().clone(),
            },
        }
    }

    pub fn subscribe(&self) -> Subscription {
        let published = &self.published;
        Subscription {
            state: published.state.subscribe(),
            hours: published.hours.subscribe(),
            minutes: published.minutes.subscribe(),
            seconds: published.seconds.subscribe(),
            milliseconds: published.milliseconds.subscribe(),
            precision: published.precision.subscribe(),
        }
    }

    pub fn precision(&self) -> DisplayPrecision {
        *self.published.precision.borrow()
    }

    /// Change the display precision; refused while the stopwatch runs
    pub fn set_precision(&self, precision: DisplayPrecision) -> Result<DisplayPrecision, StopwatchError> {
        let stopwatch = lock(&self.stopwatch, "stopwatch")?;
        if stopwatch.state().is_running() {
            return Err(StopwatchError::PrecisionLocked);
        }
        if set_if_changed(&self.published.precision, precision) {
            info!("Display precision set to {}", precision);
        }
        Ok(precision)
    }

    /// Latest rendered display and notification
    pub fn presentation(&self) -> Presentation {
        self.published.presentation.borrow().clone()
    }

    /// Store a freshly rendered presentation; returns the previous one if it changed
    pub fn update_presentation(&self, presentation: Presentation) -> Option<Presentation> {
        let mut previous = None;
        self.published.presentation.send_if_modified(|current| {
            if *current == presentation {
                false
            } else {
                previous = Some(std::mem::replace(current, presentation));
                true
            }
        });
        previous
    }

    /// Cancel any active session; used on shutdown
    pub fn shutdown(self: &Arc<Self>) -> Result<(), StopwatchError> {
        if self.snapshot().state.is_active() {
            self.cancel()?;
            info!("Active stopwatch session canceled on shutdown");
        } else {
            debug!("No active stopwatch session at shutdown");
        }
        Ok(())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last command information
    pub fn get_last_command(&self) -> (Option<Command>, Option<DateTime<Utc>>) {
        match self.last_command.lock().ok().and_then(|last| *last) {
            Some((command, at)) => (Some(command), Some(at)),
            None => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn new_state() -> Arc<AppState> {
        Arc::new(AppState::new(0, "127.0.0.1".to_string(), DisplayPrecision::Milliseconds))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_runs_both_ticks() {
        let state = new_state();
        state.start().unwrap();

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let snapshot = state.stop().unwrap();

        assert_eq!(snapshot.state, StopwatchState::Stopped);
        assert_eq!(snapshot.time.seconds, "02");
        let millis: u32 = snapshot.time.milliseconds.parse().unwrap();
        assert!((499..=500).contains(&millis), "milliseconds was {}", millis);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_accumulation() {
        let state = new_state();
        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        let stopped = state.stop().unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.snapshot(), stopped);
        assert_eq!(stopped.time.seconds, "01");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_resets_and_returns_to_idle() {
        let state = new_state();
        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(3_100)).await;

        let snapshot = state.cancel().unwrap();
        assert_eq!(snapshot, StopwatchSnapshot::default());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(state.snapshot(), StopwatchSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_alternates() {
        let state = new_state();
        assert_eq!(state.toggle().unwrap().state, StopwatchState::Started);
        assert_eq!(state.toggle().unwrap().state, StopwatchState::Stopped);
        assert_eq!(state.toggle().unwrap().state, StopwatchState::Started);
        assert_eq!(state.get_last_command().0, Some(Command::Start));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_commands_are_rejected() {
        let state = new_state();
        assert_eq!(
            state.stop(),
            Err(StopwatchError::InvalidTransition {
                from: StopwatchState::Idle,
                command: Command::Stop,
            })
        );
        assert!(state.cancel().is_err());
        assert_eq!(state.apply(StopwatchState::Idle), Err(StopwatchError::NotACommand(StopwatchState::Idle)));
        assert_eq!(state.get_last_command(), (None, None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_precision_locked_while_running() {
        let state = new_state();
        assert_eq!(state.set_precision(DisplayPrecision::Seconds), Ok(DisplayPrecision::Seconds));

        state.start().unwrap();
        assert_eq!(state.set_precision(DisplayPrecision::Milliseconds), Err(StopwatchError::PrecisionLocked));
        assert_eq!(state.precision(), DisplayPrecision::Seconds);

        state.stop().unwrap();
        assert!(state.set_precision(DisplayPrecision::Milliseconds).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_active_session() {
        let state = new_state();
        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        state.shutdown().unwrap();
        assert_eq!(state.snapshot().state, StopwatchState::Idle);

        // Nothing active: shutdown is a no-op
        state.shutdown().unwrap();
    }

    #[test]
    fn test_update_presentation_reports_changes_only() {
        let state = AppState::new(0, "127.0.0.1".to_string(), DisplayPrecision::Seconds);
        let current = state.presentation();
        assert!(state.update_presentation(current.clone()).is_none());

        let mut next = current.clone();
        next.display.start_button = "Stop".to_string();
        assert_eq!(state.update_presentation(next.clone()), Some(current));
        assert_eq!(state.presentation(), next);
    }
}
