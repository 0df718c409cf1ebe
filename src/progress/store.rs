//! Persisted workout progress.
//!
//! [`ProgressStore`] owns the history log, the challenge calendar, the
//! unlocked-day pointer and the settings. Every record is read once on
//! [`ProgressStore::load`] and written back after each mutation. Storage
//! failures never reach the caller: reads fall back to defaults and failed
//! writes are logged and dropped.

use chrono::{Local, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{
    ChallengeDay, HistoryEntry, SettingKey, Settings, WorkoutStats, CHALLENGE_DAYS,
};

use super::challenge::{self, DayStatus};
use super::error::ProgressError;
use super::stats::{achievements, compute_stats, Achievement};
use super::storage::KeyValueStore;

/// Key of the history log.
pub const HISTORY_KEY: &str = "workoutHistory";
/// Key of the challenge calendar.
pub const CHALLENGE_PROGRESS_KEY: &str = "challengeProgress";
/// Key of the unlocked-day pointer.
pub const CURRENT_CHALLENGE_DAY_KEY: &str = "currentChallengeDay";
/// Key of the settings map.
pub const SETTINGS_KEY: &str = "appSettings";

// ============================================================================
// ProgressSnapshot
// ============================================================================

/// Read-only view of progress handed to rendering code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Workout log, newest first
    pub history: Vec<HistoryEntry>,
    /// Statistics derived from the log
    pub stats: WorkoutStats,
    /// Milestones earned by the statistics
    pub achievements: Vec<Achievement>,
    /// Challenge calendar in day order
    pub challenge_days: Vec<ChallengeDay>,
    /// Highest day that may be started
    pub current_unlocked_day: u32,
}

// ============================================================================
// ProgressStore
// ============================================================================

/// Owner of all persisted progress state.
pub struct ProgressStore<S: KeyValueStore> {
    store: S,
    history: Vec<HistoryEntry>,
    stats: WorkoutStats,
    challenge_days: Vec<ChallengeDay>,
    current_unlocked_day: u32,
    settings: Settings,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Reads every record from `store`.
    ///
    /// Missing or unreadable records take their defaults: empty history,
    /// a fresh calendar with day 1 unlocked, default settings.
    pub fn load(store: S) -> Self {
        let history: Vec<HistoryEntry> = read_record(&store, HISTORY_KEY).unwrap_or_default();

        let challenge_days = read_record::<Vec<ChallengeDay>>(&store, CHALLENGE_PROGRESS_KEY)
            .filter(|days| {
                let valid = is_valid_calendar(days);
                if !valid {
                    tracing::warn!("ignoring malformed challenge calendar");
                }
                valid
            })
            .unwrap_or_else(challenge::default_days);

        let current_unlocked_day = read_record::<u32>(&store, CURRENT_CHALLENGE_DAY_KEY)
            .map(challenge::clamp_unlocked_day)
            .unwrap_or(1);

        let settings = read_record(&store, SETTINGS_KEY).unwrap_or_default();

        let stats = compute_stats(&history, today());
        tracing::debug!(
            workouts = history.len(),
            current_unlocked_day,
            "progress loaded"
        );

        Self {
            store,
            history,
            stats,
            challenge_days,
            current_unlocked_day,
            settings,
        }
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Adds a finished workout at the top of the log.
    pub fn record_completion(&mut self, entry: HistoryEntry) {
        tracing::info!(
            workout_type = %entry.workout_type,
            minutes = entry.duration_minutes,
            "workout recorded"
        );
        self.history.insert(0, entry);
        self.refresh_stats();
        self.write_record(HISTORY_KEY, &self.history);
    }

    /// Records a sample full-body workout dated now.
    pub fn add_sample_workout(&mut self) {
        self.record_completion(HistoryEntry::completed_at("Full Body", Utc::now(), 25, 7));
    }

    /// Deletes the whole history log.
    pub fn clear_history(&mut self) {
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            tracing::warn!("failed to clear workout history: {}", e);
        }
        self.history.clear();
        self.stats = WorkoutStats::default();
    }

    /// Returns the log, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the statistics as of the last load or mutation.
    pub fn stats(&self) -> WorkoutStats {
        self.stats
    }

    /// Returns the achievements earned so far.
    pub fn achievements(&self) -> Vec<Achievement> {
        achievements(&self.stats)
    }

    /// Computes the statistics as of `today`.
    pub fn stats_on(&self, today: NaiveDate) -> WorkoutStats {
        compute_stats(&self.history, today)
    }

    // ------------------------------------------------------------------------
    // Challenge
    // ------------------------------------------------------------------------

    /// Decides what selecting `day` should lead to, without changing anything.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDay` if `day` is outside the calendar.
    pub fn check_challenge_day(&self, day: u32) -> Result<DayStatus, ProgressError> {
        let slot = self.challenge_day(day)?;

        if day > self.current_unlocked_day {
            Ok(DayStatus::Locked {
                unlocked: self.current_unlocked_day,
            })
        } else if slot.completed {
            Ok(DayStatus::AlreadyCompleted)
        } else {
            Ok(DayStatus::Ready)
        }
    }

    /// Marks `day` as done and unlocks the next day when `day` is the current one.
    ///
    /// # Errors
    ///
    /// Returns `DayLocked` if `day` is past the unlocked pointer, or
    /// `InvalidDay` if it is outside the calendar. Nothing changes on error.
    pub fn mark_challenge_day_completed(&mut self, day: u32) -> Result<(), ProgressError> {
        self.challenge_day(day)?;
        if day > self.current_unlocked_day {
            return Err(ProgressError::DayLocked {
                day,
                unlocked: self.current_unlocked_day,
            });
        }

        if let Some(slot) = self.challenge_days.iter_mut().find(|slot| slot.day == day) {
            slot.completed = true;
        }
        if day == self.current_unlocked_day && self.current_unlocked_day < CHALLENGE_DAYS {
            self.current_unlocked_day += 1;
        }
        tracing::info!(day, unlocked = self.current_unlocked_day, "challenge day completed");

        self.write_record(CHALLENGE_PROGRESS_KEY, &self.challenge_days);
        self.write_record(CURRENT_CHALLENGE_DAY_KEY, &self.current_unlocked_day);
        Ok(())
    }

    /// Returns the calendar in day order.
    pub fn challenge_days(&self) -> &[ChallengeDay] {
        &self.challenge_days
    }

    /// Returns the highest day that may be started.
    pub fn current_unlocked_day(&self) -> u32 {
        self.current_unlocked_day
    }

    /// Returns the number of completed days.
    pub fn completed_days(&self) -> u32 {
        self.challenge_days.iter().filter(|d| d.completed).count() as u32
    }

    /// Returns the completed share of the calendar, in percent.
    pub fn challenge_percent(&self) -> u32 {
        self.completed_days() * 100 / CHALLENGE_DAYS
    }

    /// Returns the workout assigned to challenge day `day`.
    ///
    /// A `requested` category must match the assigned one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDay` for days outside the calendar and
    /// `WorkoutMismatch` when `requested` names another workout.
    pub fn workout_for_day(
        &self,
        day: u32,
        requested: Option<&str>,
    ) -> Result<&str, ProgressError> {
        let expected = self.challenge_day(day)?.workout_type.as_str();
        match requested {
            Some(requested) if requested != expected => Err(ProgressError::WorkoutMismatch {
                day,
                expected: expected.to_string(),
                requested: requested.to_string(),
            }),
            _ => Ok(expected),
        }
    }

    /// Returns the calendar slot of `day`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDay` if `day` is outside the calendar.
    pub fn challenge_day(&self, day: u32) -> Result<&ChallengeDay, ProgressError> {
        self.challenge_days
            .iter()
            .find(|slot| slot.day == day)
            .ok_or(ProgressError::InvalidDay(day))
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Returns the current settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Updates one toggle and persists the map.
    pub fn set_setting(&mut self, key: SettingKey, value: bool) {
        self.settings.set(key, value);
        tracing::debug!(key = key.as_str(), value, "setting changed");
        self.write_record(SETTINGS_KEY, &self.settings);
    }

    // ------------------------------------------------------------------------
    // Whole store
    // ------------------------------------------------------------------------

    /// Erases history, challenge progress and settings.
    ///
    /// In-memory state returns to defaults even if the backend fails.
    pub fn clear_all(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear stored data: {}", e);
        }
        self.history.clear();
        self.stats = WorkoutStats::default();
        self.challenge_days = challenge::default_days();
        self.current_unlocked_day = 1;
        self.settings = Settings::default();
        tracing::info!("all progress cleared");
    }

    /// Returns a snapshot for rendering.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            history: self.history.clone(),
            stats: self.stats,
            achievements: self.achievements(),
            challenge_days: self.challenge_days.clone(),
            current_unlocked_day: self.current_unlocked_day,
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn refresh_stats(&mut self) {
        self.stats = compute_stats(&self.history, today());
    }

    fn write_record<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json) {
            tracing::warn!("write dropped: {}", e);
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn read_record<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("failed to read '{}', using defaults: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("malformed '{}', using defaults: {}", key, e);
            None
        }
    }
}

fn is_valid_calendar(days: &[ChallengeDay]) -> bool {
    days.len() == CHALLENGE_DAYS as usize
        && days
            .iter()
            .enumerate()
            .all(|(i, slot)| slot.day as usize == i + 1)
}

// ============================================================================
// Tests
// ============================================================================
