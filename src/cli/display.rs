//! Display utilities for the workout CLI.
//!
//! This module provides formatted output for:
//! - The live session line and controls
//! - Catalog listings
//! - Statistics, history and the challenge grid
//! - Settings and error messages

use std::io::{self, Write};

use chrono::{Days, NaiveDate};

use crate::catalog;
use crate::progress::{Achievement, DayStatus, ProgressSnapshot};
use crate::types::{
    ChallengeDay, Exercise, HistoryEntry, SettingKey, Settings, TimerPhase, TimerSnapshot,
    WorkoutStats,
};

/// Cells per row of the challenge grid.
const GRID_COLUMNS: usize = 7;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    /// Shows the keys accepted during a session.
    pub fn show_controls() {
        print!("\r\x1b[2K");
        println!("[p] pause/resume  [s] skip  [n] next  [b] back  [r] reset  [q] quit");
    }

    /// Redraws the live session line in place.
    pub fn show_snapshot(snapshot: &TimerSnapshot) {
        print!("\r\x1b[2K{}", Self::snapshot_line(snapshot));
        let _ = io::stdout().flush();
    }

    /// Rings the terminal bell.
    pub fn bell() {
        print!("\x07");
        let _ = io::stdout().flush();
    }

    /// Shows the summary of a finished workout.
    pub fn show_workout_complete(category: &str, minutes: u32, exercise_count: u32) {
        println!();
        println!("* Workout complete!");
        println!("  {}: {} exercises in {} min", category, exercise_count, minutes);
    }

    /// Shows that a session was abandoned.
    pub fn show_workout_abandoned() {
        println!();
        println!("[] Workout abandoned. Nothing was recorded");
    }

    // ------------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------------

    /// Lists every workout category.
    pub fn show_workouts() {
        println!("Workouts");
        println!("─────────────────────────────");
        for name in catalog::category_names() {
            let exercises = catalog::exercises_for(name).unwrap_or_default();
            let total = catalog::total_duration_seconds(&exercises);
            println!(
                "{:<10} {} exercises  {}",
                name,
                exercises.len(),
                Self::format_clock(total)
            );
        }
    }

    /// Lists the exercises of one category.
    pub fn show_exercises(category: &str, exercises: &[Exercise]) {
        println!("{}", category);
        println!("─────────────────────────────");
        for (i, exercise) in exercises.iter().enumerate() {
            println!(
                "{:>2}. {:<24} {:<14} {}",
                i + 1,
                exercise.name,
                exercise.reps,
                Self::format_clock(exercise.duration_seconds)
            );
        }
    }

    // ------------------------------------------------------------------------
    // Progress
    // ------------------------------------------------------------------------

    /// Shows statistics, achievements and the history log.
    pub fn show_log(progress: &ProgressSnapshot, today: NaiveDate) {
        Self::show_stats(&progress.stats);
        println!();
        Self::show_achievements(&progress.achievements);
        println!();
        Self::show_history(&progress.history, today);
    }

    /// Shows every achievement, marking the earned ones.
    pub fn show_achievements(earned: &[Achievement]) {
        println!("Achievements");
        println!("─────────────────────────────");
        for line in Self::achievement_lines(earned) {
            println!("{}", line);
        }
    }

    /// Shows the aggregate statistics.
    pub fn show_stats(stats: &WorkoutStats) {
        println!("Progress");
        println!("─────────────────────────────");
        println!("Workouts: {}", stats.total_workouts);
        println!("Minutes:  {}", stats.total_minutes);
        println!("Calories: {}", stats.total_calories);
        println!("Streak:   {} day(s)", stats.current_streak);
    }

    /// Shows the history log, newest first.
    pub fn show_history(history: &[HistoryEntry], today: NaiveDate) {
        if history.is_empty() {
            println!("No workouts yet. Start one with `hanma start <workout>`");
            return;
        }

        println!("History");
        println!("─────────────────────────────");
        for entry in history {
            println!(
                "{:<14} {:<10} {:>3} min  {} exercises",
                Self::date_label(entry.local_date(), today),
                entry.workout_type,
                entry.duration_minutes,
                entry.exercise_count
            );
        }
    }

    /// Shows a confirmation that the history was deleted.
    pub fn show_history_cleared() {
        println!("* Workout history cleared");
    }

    /// Shows the 30-day grid.
    pub fn show_challenge(progress: &ProgressSnapshot) {
        let completed = progress
            .challenge_days
            .iter()
            .filter(|day| day.completed)
            .count();

        println!("30-Day Challenge");
        println!("─────────────────────────────");
        for row in Self::challenge_rows(&progress.challenge_days, progress.current_unlocked_day) {
            println!("{}", row);
        }
        println!();
        println!(
            "Completed: {}/{}  Next: day {}",
            completed,
            progress.challenge_days.len(),
            progress.current_unlocked_day
        );
        println!("Legend: + done  > current  . locked");
    }

    /// Shows whether a day can be started.
    pub fn show_day_status(day: &ChallengeDay, status: DayStatus) {
        match status {
            DayStatus::Locked { unlocked } => {
                println!(
                    "Day {} is locked. Complete day {} first to unlock it",
                    day.day, unlocked
                );
            }
            DayStatus::AlreadyCompleted => {
                println!(
                    "Day {} ({}) is already completed. You can repeat it anytime",
                    day.day, day.workout_type
                );
            }
            DayStatus::Ready => {
                println!("Day {} ({}) is ready", day.day, day.workout_type);
                println!(
                    "  Start it with `hanma start {} --challenge-day {}`",
                    day.workout_type.to_lowercase().replace(' ', "-"),
                    day.day
                );
            }
        }
    }

    /// Shows a confirmation that a day was completed.
    pub fn show_day_completed(day: u32, unlocked: u32) {
        println!("* Day {} completed", day);
        println!("  Next day: {}", unlocked);
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Shows every setting.
    pub fn show_settings(settings: &Settings) {
        println!("Settings");
        println!("─────────────────────────────");
        for key in [
            SettingKey::DailyReminder,
            SettingKey::Sound,
            SettingKey::Vibration,
            SettingKey::AutoRest,
        ] {
            println!("{:<16} {}", key.as_str(), Self::toggle(settings.get(key)));
        }
    }

    /// Shows a confirmation that a setting changed.
    pub fn show_setting_changed(key: SettingKey, value: bool) {
        println!("* {} is now {}", key.as_str(), Self::toggle(value));
    }

    /// Shows a confirmation that all data was erased.
    pub fn show_reset_all() {
        println!("* All progress and settings were reset");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Shows a warning message.
    pub fn show_warning(message: &str) {
        eprintln!("Warning: {}", message);
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }

    /// Formats seconds as `MM:SS`.
    fn format_clock(total_seconds: u32) -> String {
        let (minutes, seconds) = Self::format_time(total_seconds);
        format!("{:02}:{:02}", minutes, seconds)
    }

    fn snapshot_line(snapshot: &TimerSnapshot) -> String {
        let total = snapshot.exercises.len();

        match snapshot.phase {
            TimerPhase::Idle => "Ready".to_string(),
            TimerPhase::Completed => format!("Completed {}/{} | 100%", total, total),
            TimerPhase::Exercising | TimerPhase::Resting => {
                let label = if snapshot.phase == TimerPhase::Resting {
                    snapshot
                        .exercises
                        .get(snapshot.current_index + 1)
                        .map_or_else(|| "Rest".to_string(), |next| format!("Rest | next: {}", next.name))
                } else {
                    snapshot
                        .current_exercise()
                        .map(|exercise| format!("{} ({})", exercise.name, exercise.reps))
                        .unwrap_or_default()
                };
                let state = if snapshot.running { "" } else { " [paused]" };
                format!(
                    "{}/{} {} {} | {}%{}",
                    snapshot.current_index + 1,
                    total,
                    label,
                    Self::format_clock(snapshot.remaining_seconds),
                    snapshot.progress_percent,
                    state
                )
            }
        }
    }

    fn date_label(date: NaiveDate, today: NaiveDate) -> String {
        if date == today {
            "Today".to_string()
        } else if Some(date) == today.checked_sub_days(Days::new(1)) {
            "Yesterday".to_string()
        } else {
            date.format("%b %-d, %Y").to_string()
        }
    }

    fn challenge_rows(days: &[ChallengeDay], unlocked: u32) -> Vec<String> {
        days.chunks(GRID_COLUMNS)
            .map(|row| {
                row.iter()
                    .map(|day| {
                        let mark = if day.completed {
                            '+'
                        } else if day.day == unlocked {
                            '>'
                        } else if day.day > unlocked {
                            '.'
                        } else {
                            ' '
                        };
                        format!("[{:>2}{}]", day.day, mark)
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn achievement_lines(earned: &[Achievement]) -> Vec<String> {
        Achievement::ALL
            .iter()
            .map(|achievement| {
                let mark = if earned.contains(achievement) { '+' } else { '.' };
                format!(
                    "[{}] {:<18} {}",
                    mark,
                    achievement.title(),
                    achievement.description()
                )
            })
            .collect()
    }

    fn toggle(value: bool) -> &'static str {
        if value {
            "on"
        } else {
            "off"
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
