//! Performance tests for the workout engine and progress store.
//!
//! - Stepping a long workout through every tick
//! - Computing statistics over a large history
//! - Persisting history repeatedly to disk
//!
//! Note: These tests may be flaky in CI environments under heavy load.
//! Targets are generous compared to normal timings.

use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, Local, Utc};
use tokio::sync::mpsc;

use hanma_workout::progress::{compute_stats, FileStore, ProgressStore};
use hanma_workout::timer::WorkoutTimer;
use hanma_workout::types::{Exercise, HistoryEntry, TimerPhase};

// ============================================================================
// Test Helpers
// ============================================================================

/// Performance measurement result.
#[derive(Debug)]
struct PerfResult {
    operation: String,
    duration_ms: u128,
    target_ms: u128,
    passed: bool,
}

impl PerfResult {
    fn new(operation: &str, duration: Duration, target_ms: u128) -> Self {
        let duration_ms = duration.as_millis();
        Self {
            operation: operation.to_string(),
            duration_ms,
            target_ms,
            passed: duration_ms <= target_ms,
        }
    }

    fn assert_passed(&self) {
        assert!(
            self.passed,
            "Performance test failed: {} took {}ms (target: {}ms)",
            self.operation, self.duration_ms, self.target_ms
        );
    }
}

fn history_of(len: usize) -> Vec<HistoryEntry> {
    let now = Utc::now();
    (0..len)
        .map(|i| {
            HistoryEntry::completed_at(
                "Full Body",
                now - ChronoDuration::hours(i as i64 * 6),
                25,
                7,
            )
        })
        .collect()
}

// ============================================================================
// Engine
// ============================================================================

#[test]
fn long_workout_ticks_quickly() {
    let exercises: Vec<Exercise> = (1..=100)
        .map(|i| Exercise::new(i, format!("Exercise {}", i), "10x", 300))
        .collect();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = WorkoutTimer::new(tx);
    timer.start(exercises, 300).unwrap();
    timer.toggle_running();

    let start = Instant::now();
    while timer.phase() != TimerPhase::Completed {
        timer.tick();
        while rx.try_recv().is_ok() {}
    }

    PerfResult::new("60k ticks", start.elapsed(), 1000).assert_passed();
}

// ============================================================================
// Progress
// ============================================================================

#[test]
fn stats_over_large_history() {
    let history = history_of(10_000);
    let today = Local::now().date_naive();

    let start = Instant::now();
    let stats = compute_stats(&history, today);
    let result = PerfResult::new("compute_stats(10k)", start.elapsed(), 500);

    assert_eq!(stats.total_workouts, 10_000);
    assert!(stats.current_streak > 1);
    result.assert_passed();
}

#[test]
fn repeated_history_writes() {
    let dir = tempfile::tempdir().unwrap();
    let mut progress = ProgressStore::load(FileStore::open(dir.path()).unwrap());

    let start = Instant::now();
    for _ in 0..200 {
        progress.add_sample_workout();
    }
    let result = PerfResult::new("200 history writes", start.elapsed(), 5000);

    assert_eq!(progress.history().len(), 200);
    result.assert_passed();
}
