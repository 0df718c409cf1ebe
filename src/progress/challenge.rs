//! 30-day challenge calendar.

use serde::Serialize;

use crate::catalog;
use crate::types::{ChallengeDay, CHALLENGE_DAYS};

/// What pressing a day in the calendar should lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The day is past the unlocked pointer
    Locked {
        /// Day that must be completed first
        unlocked: u32,
    },
    /// The day was already done; it may be repeated
    AlreadyCompleted,
    /// The day can be started
    Ready,
}

/// Builds the initial calendar, cycling through the catalog categories.
pub fn default_days() -> Vec<ChallengeDay> {
    let categories = catalog::category_names();
    (1..=CHALLENGE_DAYS)
        .map(|day| ChallengeDay {
            day,
            workout_type: categories[(day as usize - 1) % categories.len()].to_string(),
            completed: false,
        })
        .collect()
}

/// Clamps a persisted pointer into the calendar range.
pub fn clamp_unlocked_day(day: u32) -> u32 {
    day.clamp(1, CHALLENGE_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_days_layout() {
        let days = default_days();

        assert_eq!(days.len(), 30);
        assert!(days.iter().all(|d| !d.completed));
        assert_eq!(days[0].day, 1);
        assert_eq!(days[29].day, 30);
    }

    #[test]
    fn test_default_days_cycle_categories() {
        let days = default_days();

        assert_eq!(days[0].workout_type, "Full Body");
        assert_eq!(days[1].workout_type, "Chest");
        assert_eq!(days[2].workout_type, "Legs");
        assert_eq!(days[3].workout_type, "Abs");
        assert_eq!(days[4].workout_type, "Full Body");
        assert_eq!(days[29].workout_type, "Chest");
    }

    #[test]
    fn test_clamp_unlocked_day() {
        assert_eq!(clamp_unlocked_day(0), 1);
        assert_eq!(clamp_unlocked_day(12), 12);
        assert_eq!(clamp_unlocked_day(99), 30);
    }
}
