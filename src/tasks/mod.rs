//! Background tasks module
//!
//! The tick tasks that advance the stopwatch and the presenter that keeps
//! the display and notification models in sync.

pub mod presenter;
pub mod ticker;

// Re-export main functions
pub use presenter::presenter_task;
pub use ticker::{tick_task, Tickers};
