//! Error types for progress tracking and its storage backend.

use std::io;
use thiserror::Error;

use crate::types::CHALLENGE_DAYS;

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Home directory not found.
    #[error("Failed to get home directory")]
    HomeDirectoryNotFound,

    /// Failed to create the data directory.
    #[error("Failed to create data directory: {0}")]
    DirectoryCreation(#[source] io::Error),

    /// Failed to read a record.
    #[error("Failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    /// Failed to write a record.
    #[error("Failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    /// Failed to remove a record.
    #[error("Failed to remove '{key}': {source}")]
    Remove {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`ProgressStore`](super::ProgressStore) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// The requested challenge day has not been unlocked yet.
    #[error("Day {day} is locked. Complete day {unlocked} first to unlock it")]
    DayLocked { day: u32, unlocked: u32 },

    /// The day number is outside the challenge calendar.
    #[error("Day {0} is not part of the challenge (1-{max})", max = CHALLENGE_DAYS)]
    InvalidDay(u32),

    /// A challenge day was started with a different workout than it assigns.
    #[error("Day {day} is a {expected} workout, not {requested}")]
    WorkoutMismatch {
        day: u32,
        expected: String,
        requested: String,
    },
}

impl ProgressError {
    /// Returns true if the error is the locked-day state error.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::DayLocked { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
