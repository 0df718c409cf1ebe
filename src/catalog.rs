//! Static exercise catalog.
//!
//! Maps each workout category to its ordered exercise list. Sessions are
//! initialized from a copy of one of these lists.

use crate::types::Exercise;

/// (id, name, reps, duration in seconds)
type Row = (u32, &'static str, &'static str, u32);

const FULL_BODY: &[Row] = &[
    (1, "Push-ups", "20x", 30),
    (2, "Squats", "25x", 30),
    (3, "Plank", "30 sec", 30),
    (4, "Lunges", "15x each leg", 30),
    (5, "Mountain Climbers", "20x", 30),
    (6, "Burpees", "10x", 30),
    (7, "Jumping Jacks", "30x", 30),
];

const CHEST: &[Row] = &[
    (1, "Push-ups", "20x", 30),
    (2, "Wide Push-ups", "15x", 30),
    (3, "Diamond Push-ups", "10x", 30),
    (4, "Incline Push-ups", "15x", 30),
    (5, "Decline Push-ups", "12x", 30),
    (6, "Chest Dips", "15x", 30),
];

const LEGS: &[Row] = &[
    (1, "Squats", "25x", 30),
    (2, "Lunges", "15x each leg", 30),
    (3, "Jump Squats", "20x", 30),
    (4, "Calf Raises", "30x", 30),
    (5, "Wall Sit", "45 sec", 45),
    (6, "Single Leg Glute Bridge", "12x each leg", 30),
    (7, "Step-ups", "15x each leg", 30),
];

const ABS: &[Row] = &[
    (1, "Plank", "30 sec", 30),
    (2, "Crunches", "25x", 30),
    (3, "Bicycle Crunches", "20x", 30),
    (4, "Russian Twists", "30x", 30),
    (5, "Leg Raises", "15x", 30),
    (6, "Mountain Climbers", "20x", 30),
    (7, "Dead Bug", "10x each side", 30),
];

/// Categories in display order.
const CATEGORIES: &[(&str, &[Row])] = &[
    ("Full Body", FULL_BODY),
    ("Chest", CHEST),
    ("Legs", LEGS),
    ("Abs", ABS),
];

/// Returns the category names in display order.
pub fn category_names() -> Vec<&'static str> {
    CATEGORIES.iter().map(|(name, _)| *name).collect()
}

/// Resolves a user-typed category to its canonical name.
///
/// Matching ignores case, spaces, dashes and underscores, so `full-body`
/// and `FullBody` both resolve to `Full Body`.
pub fn find_category(query: &str) -> Option<&'static str> {
    let wanted = normalize(query);
    CATEGORIES
        .iter()
        .map(|(name, _)| *name)
        .find(|name| normalize(name) == wanted)
}

/// Returns the exercises of a category.
pub fn exercises_for(category: &str) -> Option<Vec<Exercise>> {
    let name = find_category(category)?;
    CATEGORIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rows)| {
            rows.iter()
                .map(|&(id, name, reps, duration)| Exercise::new(id, name, reps, duration))
                .collect()
        })
}

/// Sum of exercise durations, rest excluded.
pub fn total_duration_seconds(exercises: &[Exercise]) -> u32 {
    exercises.iter().map(|e| e.duration_seconds).sum()
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
