//! Timer engine error types.

use thiserror::Error;

/// Errors returned by the workout timer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The exercise list cannot drive a session.
    #[error("Invalid workout: {0}")]
    InvalidInput(String),
}

impl TimerError {
    /// Returns true if the error was caused by the caller's input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
