//! Integration tests for the timer engine and the progress store.
//!
//! These tests drive whole workouts through the public API and persist the
//! results in a file-backed store:
//! - A catalog workout ticked to completion and logged
//! - Challenge progress surviving a reload
//! - Damaged data files loading as defaults
//! - Session runner outcomes feeding the history

use std::fs;
use std::time::Duration;

use chrono::Utc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::time::timeout;

use hanma_workout::catalog;
use hanma_workout::progress::{DayStatus, FileStore, ProgressStore, HISTORY_KEY};
use hanma_workout::timer::{SessionOutcome, SessionRunner, TimerEvent, WorkoutTimer};
use hanma_workout::types::{Exercise, HistoryEntry, SettingKey, TimerPhase};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a timer with its event receiver.
fn create_timer() -> (WorkoutTimer, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (WorkoutTimer::new(tx), rx)
}

/// Opens a progress store in a fresh temporary directory.
fn open_temp_progress() -> (tempfile::TempDir, ProgressStore<FileStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    (dir, ProgressStore::load(store))
}

fn reopen(dir: &tempfile::TempDir) -> ProgressStore<FileStore> {
    ProgressStore::load(FileStore::open(dir.path()).unwrap())
}

/// Ticks until the workout completes and returns the number of ticks.
fn tick_to_completion(timer: &mut WorkoutTimer) -> u32 {
    let mut ticks = 0;
    while timer.phase() != TimerPhase::Completed {
        timer.tick();
        ticks += 1;
        assert!(ticks < 10_000, "workout never completed");
    }
    ticks
}

fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// ============================================================================
// Catalog Workout Tests
// ============================================================================

#[test]
fn full_body_workout_runs_to_completion_and_is_logged() {
    let exercises = catalog::exercises_for("Full Body").unwrap();
    let exercise_count = exercises.len() as u32;
    let (mut timer, mut rx) = create_timer();

    timer.start(exercises, 10).unwrap();
    timer.toggle_running();
    let ticks = tick_to_completion(&mut timer);

    // 7 exercises of 30 s with 6 rests of 10 s
    assert_eq!(ticks, 7 * 30 + 6 * 10);

    let events = drain(&mut rx);
    let finished = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::ExerciseFinished { .. }))
        .count();
    assert_eq!(finished, 6);
    let elapsed_seconds = match events.last() {
        Some(TimerEvent::WorkoutFinished { elapsed_seconds }) => *elapsed_seconds,
        other => panic!("Expected WorkoutFinished, got {:?}", other),
    };

    let outcome = SessionOutcome::Completed { elapsed_seconds };
    let (dir, mut progress) = open_temp_progress();
    progress.record_completion(HistoryEntry::completed_at(
        "Full Body",
        Utc::now(),
        outcome.duration_minutes(),
        exercise_count,
    ));

    let reloaded = reopen(&dir);
    let stats = reloaded.stats();
    assert_eq!(stats.total_workouts, 1);
    assert_eq!(stats.total_minutes, 5);
    assert_eq!(stats.total_calories, 40);
    assert_eq!(stats.current_streak, 1);
}

#[test]
fn pausing_midway_does_not_lose_time() {
    let exercises = vec![
        Exercise::new(1, "Plank", "30 sec", 3),
        Exercise::new(2, "Crunches", "25x", 3),
    ];
    let (mut timer, _rx) = create_timer();
    timer.start(exercises, 0).unwrap();
    timer.toggle_running();

    timer.tick();
    timer.toggle_running();
    for _ in 0..50 {
        timer.tick();
    }
    assert_eq!(timer.snapshot().remaining_seconds, 2);

    timer.toggle_running();
    assert_eq!(tick_to_completion(&mut timer), 5);
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn challenge_progress_survives_reload() {
    let (dir, mut progress) = open_temp_progress();
    progress.mark_challenge_day_completed(1).unwrap();
    progress.mark_challenge_day_completed(2).unwrap();
    drop(progress);

    let mut progress = reopen(&dir);
    assert_eq!(progress.current_unlocked_day(), 3);
    assert_eq!(progress.check_challenge_day(2), Ok(DayStatus::AlreadyCompleted));
    assert_eq!(progress.check_challenge_day(3), Ok(DayStatus::Ready));

    let err = progress.mark_challenge_day_completed(5).unwrap_err();
    assert!(err.is_locked());
    assert_eq!(reopen(&dir).completed_days(), 2);
}

#[test]
fn damaged_files_load_as_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("workoutHistory.json"), "{{{").unwrap();
    fs::write(dir.path().join("currentChallengeDay.json"), "null").unwrap();
    fs::write(dir.path().join("appSettings.json"), "").unwrap();

    let progress = reopen(&dir);

    assert!(progress.history().is_empty());
    assert_eq!(progress.current_unlocked_day(), 1);
    assert!(progress.settings().auto_rest);
}

#[test]
fn records_written_by_other_clients_are_read() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("workoutHistory.json"),
        r#"[{"id":1709283000000,"type":"Chest","date":"2024-03-01T08:50:00.000Z","duration":15,"exercises":6,"completed":true}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("appSettings.json"),
        r#"{"dailyReminder":true,"soundEnabled":true,"vibrationEnabled":false,"autoRest":true}"#,
    )
    .unwrap();

    let progress = reopen(&dir);

    assert_eq!(progress.history()[0].workout_type, "Chest");
    assert_eq!(progress.stats().total_calories, 120);
    assert!(progress.settings().daily_reminder);
    assert!(!progress.settings().vibration_enabled);
}

#[test]
fn clear_all_removes_every_file() {
    let (dir, mut progress) = open_temp_progress();
    progress.add_sample_workout();
    progress.mark_challenge_day_completed(1).unwrap();
    progress.set_setting(SettingKey::Sound, false);

    progress.clear_all();

    let remaining: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert!(remaining.is_empty());
    let reloaded = reopen(&dir);
    assert_eq!(reloaded.current_unlocked_day(), 1);
    assert!(reloaded.settings().sound_enabled);
}

#[test]
fn clear_history_keeps_challenge() {
    let (dir, mut progress) = open_temp_progress();
    progress.add_sample_workout();
    progress.mark_challenge_day_completed(1).unwrap();

    progress.clear_history();

    assert!(!dir.path().join(format!("{}.json", HISTORY_KEY)).exists());
    let reloaded = reopen(&dir);
    assert!(reloaded.history().is_empty());
    assert_eq!(reloaded.current_unlocked_day(), 2);
}

// ============================================================================
// Session Runner Tests
// ============================================================================

#[tokio::test]
async fn runner_outcome_feeds_history() {
    let exercises = catalog::exercises_for("Abs").unwrap();
    let count = exercises.len() as u32;
    let runner = SessionRunner::new(exercises, 0, false).unwrap();
    let script = "s\n".repeat(count as usize);
    let input = BufReader::new(script.as_bytes());

    let outcome = timeout(Duration::from_secs(5), runner.run(input))
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(outcome, SessionOutcome::Completed { .. }));

    let (_dir, mut progress) = open_temp_progress();
    progress.record_completion(HistoryEntry::completed_at(
        "Abs",
        Utc::now(),
        outcome.duration_minutes(),
        count,
    ));
    assert_eq!(progress.history()[0].exercise_count, 7);
}

#[tokio::test]
async fn abandoned_runner_reports_abandoned() {
    let exercises = catalog::exercises_for("Legs").unwrap();
    let runner = SessionRunner::new(exercises, 10, true).unwrap();
    let input = BufReader::new(&b"p\np\nn\nq\n"[..]);

    let outcome = timeout(Duration::from_secs(5), runner.run(input))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Abandoned);
    assert_eq!(outcome.duration_minutes(), 0);
}
