//! Workout progress tracking.
//!
//! This module provides:
//!
//! - Persisted history with derived statistics (totals, calories, streak)
//! - The 30-day challenge calendar and its unlock pointer
//! - Persisted settings toggles
//! - A key-value storage boundary with file and in-memory backends
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  ProgressStore   │ ← Owns history, calendar, settings
//! └────────┬─────────┘
//!          │ read on load, write after each mutation
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │  KeyValueStore   │────▶│    FileStore     │
//! │                  │     │  (~/.hanma/*.json)│
//! │                  │     ├──────────────────┤
//! │                  │────▶│   MemoryStore    │
//! └──────────────────┘     │  (tests)         │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use hanma_workout::progress::{MemoryStore, ProgressStore};
//!
//! let mut progress = ProgressStore::load(MemoryStore::new());
//! progress.add_sample_workout();
//! progress.mark_challenge_day_completed(1).unwrap();
//!
//! assert_eq!(progress.stats().total_minutes, 25);
//! assert_eq!(progress.current_unlocked_day(), 2);
//! ```

pub mod challenge;
mod error;
pub mod stats;
pub mod storage;
mod store;

pub use challenge::DayStatus;
pub use error::{ProgressError, StorageError, StorageResult};
pub use stats::{achievements, compute_stats, current_streak, Achievement};
pub use storage::{default_data_dir, FileStore, KeyValueStore, MemoryStore};
pub use store::{
    ProgressSnapshot, ProgressStore, CHALLENGE_PROGRESS_KEY, CURRENT_CHALLENGE_DAY_KEY,
    HISTORY_KEY, SETTINGS_KEY,
};
