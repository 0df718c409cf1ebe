//! Hanma Workout Library
//!
//! This library provides the core functionality for the `hanma` workout CLI.
//! It includes:
//! - Timer engine stepping a session through exercises and rest periods
//! - Foreground session runner driven by a one-second interval
//! - Progress store for history, statistics, the 30-day challenge and settings
//! - Key-value persistence with file and in-memory backends
//! - Static exercise catalog
//! - CLI command parsing and display utilities

pub mod catalog;
pub mod cli;
pub mod progress;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ChallengeDay, Exercise, HistoryEntry, SettingKey, Settings, TimerPhase, TimerSnapshot,
    WorkoutSession, WorkoutStats,
};

// Re-export timer types
pub use timer::{SessionAction, SessionOutcome, SessionRunner, TimerError, TimerEvent, WorkoutTimer};

// Re-export progress types
pub use progress::{
    Achievement, DayStatus, FileStore, KeyValueStore, MemoryStore, ProgressError, ProgressSnapshot,
    ProgressStore, StorageError,
};
