//! Core data types for the workout tracker.
//!
//! This module defines the data structures used for:
//! - Exercise catalog entries and the active workout session
//! - Timer phases and display snapshots
//! - Persisted history, challenge days and settings

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Rest between exercises when nothing else is configured.
pub const DEFAULT_REST_SECONDS: u32 = 10;

/// Upper bound accepted for the rest interval.
pub const MAX_REST_SECONDS: u32 = 300;

/// Number of days in the challenge calendar.
pub const CHALLENGE_DAYS: u32 = 30;

/// Rough calories burned per workout minute.
pub const CALORIES_PER_MINUTE: u32 = 8;

// ============================================================================
// Exercise
// ============================================================================

/// A single catalog exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Position-stable id within its category
    pub id: u32,
    /// Display name
    pub name: String,
    /// Repetition label, e.g. "20x" or "30 sec"
    pub reps: String,
    /// Countdown length in seconds
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
}

impl Exercise {
    /// Creates a new exercise.
    pub fn new(id: u32, name: impl Into<String>, reps: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            id,
            name: name.into(),
            reps: reps.into(),
            duration_seconds,
        }
    }
}

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the workout timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// No session has been started
    #[default]
    Idle,
    /// Counting down an exercise
    Exercising,
    /// Counting down the rest between two exercises
    Resting,
    /// Every exercise is done
    Completed,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Exercising => "exercising",
            TimerPhase::Resting => "resting",
            TimerPhase::Completed => "completed",
        }
    }

    /// Returns true if the phase has a countdown attached to it.
    pub fn is_counting(&self) -> bool {
        matches!(self, TimerPhase::Exercising | TimerPhase::Resting)
    }
}

// ============================================================================
// WorkoutSession
// ============================================================================

/// Runtime state of one workout, owned by the timer engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Exercises in order, fixed for the lifetime of the session
    pub exercises: Vec<Exercise>,
    /// Index of the current exercise
    pub current_index: usize,
    /// Current phase
    pub phase: TimerPhase,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Rest inserted between exercises
    pub rest_duration_seconds: u32,
    /// Whether ticks are being counted
    pub running: bool,
    /// Seconds actually counted down while running
    pub elapsed_seconds: u32,
}

impl WorkoutSession {
    /// Creates a session positioned on the first exercise, not running.
    ///
    /// The caller guarantees `exercises` is non-empty.
    pub fn new(exercises: Vec<Exercise>, rest_duration_seconds: u32) -> Self {
        let mut session = Self {
            exercises,
            rest_duration_seconds,
            ..Self::default()
        };
        session.start_exercise(0);
        session
    }

    /// Moves onto the exercise at `index` with a full countdown.
    pub fn start_exercise(&mut self, index: usize) {
        self.current_index = index;
        self.phase = TimerPhase::Exercising;
        self.remaining_seconds = self
            .exercises
            .get(index)
            .map_or(0, |exercise| exercise.duration_seconds);
    }

    /// Starts the rest period after the current exercise.
    pub fn start_resting(&mut self) {
        self.phase = TimerPhase::Resting;
        self.remaining_seconds = self.rest_duration_seconds;
    }

    /// Marks the session as finished.
    pub fn complete(&mut self) {
        self.phase = TimerPhase::Completed;
        self.remaining_seconds = 0;
        self.running = false;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the countdown has reached 0.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            self.elapsed_seconds += 1;
        }
        self.remaining_seconds == 0
    }

    /// Returns true if the current exercise is the last one.
    pub fn is_last_exercise(&self) -> bool {
        self.current_index + 1 >= self.exercises.len()
    }

    /// Returns the exercise under the cursor.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current_index)
    }

    /// Returns the share of exercises already passed, in percent.
    pub fn progress_percent(&self) -> u32 {
        if self.exercises.is_empty() {
            return 0;
        }
        if self.phase == TimerPhase::Completed {
            return 100;
        }
        (self.current_index * 100 / self.exercises.len()) as u32
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the timer handed to rendering code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Current phase of the session
    pub phase: TimerPhase,
    /// Index of the active exercise; during rest, the one just finished
    pub current_index: usize,
    /// Seconds left in the current exercise or rest period
    pub remaining_seconds: u32,
    /// Whether the clock is counting down
    pub running: bool,
    /// Exercises of the session in order
    pub exercises: Vec<Exercise>,
    /// Share of exercises finished, 0-100
    pub progress_percent: u32,
}

impl TimerSnapshot {
    /// Creates a snapshot from session state.
    pub fn from_session(session: &WorkoutSession) -> Self {
        Self {
            phase: session.phase,
            current_index: session.current_index,
            remaining_seconds: session.remaining_seconds,
            running: session.running,
            exercises: session.exercises.clone(),
            progress_percent: session.progress_percent(),
        }
    }

    /// Returns the exercise under the cursor.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current_index)
    }
}

// ============================================================================
// HistoryEntry
// ============================================================================

/// One finished workout in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in milliseconds since the epoch
    pub id: i64,
    /// Workout category name
    #[serde(rename = "type")]
    pub workout_type: String,
    /// When the workout was finished
    pub date: DateTime<Utc>,
    /// Workout length in whole minutes
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    /// Number of exercises in the workout
    #[serde(rename = "exercises")]
    pub exercise_count: u32,
    /// Whether the workout ran to the end
    pub completed: bool,
}

impl HistoryEntry {
    /// Creates a completed entry stamped with the given time.
    pub fn completed_at(
        workout_type: impl Into<String>,
        date: DateTime<Utc>,
        duration_minutes: u32,
        exercise_count: u32,
    ) -> Self {
        Self {
            id: date.timestamp_millis(),
            workout_type: workout_type.into(),
            date,
            duration_minutes,
            exercise_count,
            completed: true,
        }
    }

    /// Returns the calendar day of the entry in local time.
    pub fn local_date(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }
}

// ============================================================================
// WorkoutStats
// ============================================================================

/// Aggregates derived from the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: u32,
    pub total_minutes: u32,
    pub total_calories: u32,
    pub current_streak: u32,
}

// ============================================================================
// ChallengeDay
// ============================================================================

/// One slot of the 30-day challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDay {
    /// Day number, 1-based
    pub day: u32,
    /// Workout category for this day
    #[serde(rename = "workout")]
    pub workout_type: String,
    /// Whether the day has been done
    pub completed: bool,
}

// ============================================================================
// Settings
// ============================================================================

fn default_true() -> bool {
    true
}

/// User toggles persisted as one flat document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Daily workout reminder
    #[serde(default)]
    pub daily_reminder: bool,
    /// Audible cue on phase changes
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Vibration on phase changes
    #[serde(default = "default_true")]
    pub vibration_enabled: bool,
    /// Insert rest periods between exercises
    #[serde(default = "default_true")]
    pub auto_rest: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_reminder: false,
            sound_enabled: true,
            vibration_enabled: true,
            auto_rest: true,
        }
    }
}

/// Names of the individual settings toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SettingKey {
    DailyReminder,
    Sound,
    Vibration,
    AutoRest,
}

impl SettingKey {
    /// Returns the string representation of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::DailyReminder => "daily-reminder",
            SettingKey::Sound => "sound",
            SettingKey::Vibration => "vibration",
            SettingKey::AutoRest => "auto-rest",
        }
    }
}

impl Settings {
    /// Returns the value of one toggle.
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::DailyReminder => self.daily_reminder,
            SettingKey::Sound => self.sound_enabled,
            SettingKey::Vibration => self.vibration_enabled,
            SettingKey::AutoRest => self.auto_rest,
        }
    }

    /// Sets one toggle.
    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::DailyReminder => self.daily_reminder = value,
            SettingKey::Sound => self.sound_enabled = value,
            SettingKey::Vibration => self.vibration_enabled = value,
            SettingKey::AutoRest => self.auto_rest = value,
        }
    }

    /// Rest interval implied by the auto-rest toggle.
    pub fn rest_seconds(&self) -> u32 {
        if self.auto_rest {
            DEFAULT_REST_SECONDS
        } else {
            0
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
