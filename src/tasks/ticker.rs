//! Periodic tick tasks

use std::sync::Arc;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error};

use crate::state::{AppState, RunId, TickUnit};

/// Tick a single accumulator until the run ends
pub async fn tick_task(state: Arc<AppState>, run: RunId, unit: TickUnit) {
    debug!("Starting {:?} tick task for run {}", unit, run);

    let period = unit.period();
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        match state.tick(run, unit) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Run {} is over, {:?} tick task exiting", run, unit);
                break;
            }
            Err(e) => {
                error!("Failed to apply {:?} tick: {}", unit, e);
                break;
            }
        }
    }
}

/// Handles of the tick tasks belonging to one run.
///
/// Dropping the value aborts the tasks.
#[derive(Debug)]
pub struct Tickers {
    run: RunId,
    handles: Vec<JoinHandle<()>>,
}

impl Tickers {
    /// Spawn one task per tick unit
    pub fn spawn(state: Arc<AppState>, run: RunId) -> Self {
        let handles = [TickUnit::Millisecond, TickUnit::Second]
            .into_iter()
            .map(|unit| tokio::spawn(tick_task(Arc::clone(&state), run, unit)))
            .collect();

        Self { run, handles }
    }

    pub fn run(&self) -> RunId {
        self.run
    }
}

impl Drop for Tickers {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
        debug!("Tick tasks for run {} aborted", self.run);
    }
}
