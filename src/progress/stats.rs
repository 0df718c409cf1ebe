//! Statistics derived from the workout history.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::types::{HistoryEntry, WorkoutStats, CALORIES_PER_MINUTE};

/// Computes totals and the current streak as of `today`.
///
/// Totals saturate at `u32::MAX` instead of overflowing.
pub fn compute_stats(history: &[HistoryEntry], today: NaiveDate) -> WorkoutStats {
    let total_minutes = history
        .iter()
        .fold(0u32, |total, entry| total.saturating_add(entry.duration_minutes));

    WorkoutStats {
        total_workouts: u32::try_from(history.len()).unwrap_or(u32::MAX),
        total_minutes,
        total_calories: total_minutes.saturating_mul(CALORIES_PER_MINUTE),
        current_streak: current_streak(history, today),
    }
}

// ============================================================================
// Achievements
// ============================================================================

/// Milestones unlocked by the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// At least one workout logged
    FirstWorkout,
    /// Workouts on three consecutive days, ending today
    ThreeDayStreak,
    /// At least ten workouts logged
    DedicatedFighter,
}

impl Achievement {
    /// Every achievement in display order.
    pub const ALL: [Achievement; 3] = [
        Achievement::FirstWorkout,
        Achievement::ThreeDayStreak,
        Achievement::DedicatedFighter,
    ];

    /// Returns the display title.
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstWorkout => "First Workout",
            Achievement::ThreeDayStreak => "3-Day Streak",
            Achievement::DedicatedFighter => "Dedicated Fighter",
        }
    }

    /// Returns what has to be done to earn it.
    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstWorkout => "Complete your first workout",
            Achievement::ThreeDayStreak => "Work out 3 days in a row",
            Achievement::DedicatedFighter => "Complete 10 workouts",
        }
    }

    /// Returns true if `stats` meet the threshold.
    pub fn is_earned(&self, stats: &WorkoutStats) -> bool {
        match self {
            Achievement::FirstWorkout => stats.total_workouts >= 1,
            Achievement::ThreeDayStreak => stats.current_streak >= 3,
            Achievement::DedicatedFighter => stats.total_workouts >= 10,
        }
    }
}

/// Returns the achievements earned by `stats`, in display order.
pub fn achievements(stats: &WorkoutStats) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|achievement| achievement.is_earned(stats))
        .collect()
}

/// Counts consecutive calendar days with a workout, ending today.
///
/// Several workouts on the same day count as one day. Without a workout
/// today the streak is 0.
pub fn current_streak(history: &[HistoryEntry], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = history.iter().map(HistoryEntry::local_date).collect();

    let mut streak = 0;
    let mut expected = Some(today);
    for day in days.iter().rev().filter(|day| **day <= today) {
        match expected {
            Some(date) if *day == date => {
                streak += 1;
                expected = date.checked_sub_days(Days::new(1));
            }
            _ => break,
        }
    }
    streak
}
