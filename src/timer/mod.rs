//! Workout timer.
//!
//! - `engine`: the countdown state machine and its events
//! - `runner`: the foreground loop that owns the one-second ticker
//! - `error`: timer error types

pub mod engine;
pub mod error;
pub mod runner;

pub use engine::{TimerEvent, WorkoutTimer};
pub use error::TimerError;
pub use runner::{SessionAction, SessionOutcome, SessionRunner};
