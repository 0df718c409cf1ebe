//! Hanma Workout CLI - interval workouts in the terminal
//!
//! Runs timed bodyweight workouts:
//! - Each exercise counts down, followed by a short rest
//! - Finished workouts are logged with minutes and calories
//! - A 30-day challenge unlocks one day at a time

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use hanma_workout::catalog;
use hanma_workout::cli::{ChallengeAction, Cli, Commands, Display, LogArgs, SettingsAction, StartArgs};
use hanma_workout::progress::{DayStatus, FileStore, KeyValueStore, ProgressError, ProgressStore};
use hanma_workout::timer::{SessionOutcome, SessionRunner};
use hanma_workout::types::HistoryEntry;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Some(Commands::Workouts) => {
            Display::show_workouts();
        }
        Some(Commands::Show { category }) => {
            let exercises = catalog::exercises_for(&category)
                .with_context(|| format!("unknown workout '{}'", category))?;
            Display::show_exercises(&category, &exercises);
        }
        Some(Commands::Start(args)) => {
            run_workout(data_dir, args).await?;
        }
        Some(Commands::Log(args)) => {
            show_log(data_dir, &args)?;
        }
        Some(Commands::Challenge { action }) => {
            run_challenge(data_dir, action)?;
        }
        Some(Commands::Settings { action }) => {
            run_settings(data_dir, action)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Opens the progress store in `data_dir`, or `~/.hanma` when unset.
fn open_progress(data_dir: Option<&Path>) -> Result<ProgressStore<FileStore>> {
    let store = match data_dir {
        Some(dir) => FileStore::open(dir),
        None => FileStore::open_default(),
    }
    .context("failed to open data directory")?;

    tracing::debug!(dir = %store.dir().display(), "using data directory");
    Ok(ProgressStore::load(store))
}

/// Runs a workout in the foreground and records it when it finishes.
async fn run_workout(data_dir: Option<&Path>, args: StartArgs) -> Result<()> {
    let mut progress = open_progress(data_dir)?;
    let settings = progress.settings();

    let category = match args.challenge_day {
        Some(day) => {
            if let DayStatus::Locked { unlocked } = progress.check_challenge_day(day)? {
                return Err(ProgressError::DayLocked { day, unlocked }.into());
            }
            progress
                .workout_for_day(day, args.category.as_deref())?
                .to_string()
        }
        None => args.category.context("a workout category is required")?,
    };

    let exercises = catalog::exercises_for(&category)
        .with_context(|| format!("unknown workout '{}'", category))?;
    let exercise_count = exercises.len() as u32;
    let rest_seconds = args.rest.unwrap_or_else(|| settings.rest_seconds());

    let runner = SessionRunner::new(exercises, rest_seconds, args.autostart)?
        .with_sound(settings.sound_enabled && !args.no_sound);
    let outcome = runner.run(BufReader::new(tokio::io::stdin())).await?;

    record_outcome(
        &mut progress,
        &category,
        exercise_count,
        &outcome,
        args.challenge_day,
    );
    Ok(())
}

/// Logs a finished session and completes its challenge day.
///
/// The history entry is saved first. A challenge day that can no longer be
/// completed is reported as a warning.
fn record_outcome<S: KeyValueStore>(
    progress: &mut ProgressStore<S>,
    category: &str,
    exercise_count: u32,
    outcome: &SessionOutcome,
    challenge_day: Option<u32>,
) {
    if let SessionOutcome::Abandoned = outcome {
        Display::show_workout_abandoned();
        return;
    }

    let minutes = outcome.duration_minutes();
    progress.record_completion(HistoryEntry::completed_at(
        category,
        Utc::now(),
        minutes,
        exercise_count,
    ));
    Display::show_workout_complete(category, minutes, exercise_count);

    if let Some(day) = challenge_day {
        match progress.mark_challenge_day_completed(day) {
            Ok(()) => Display::show_day_completed(day, progress.current_unlocked_day()),
            Err(e) => {
                tracing::warn!(day, error = %e, "workout saved but challenge day not completed");
                Display::show_warning(&format!("Workout saved, but {}", e));
            }
        }
    }
}

/// Shows statistics and history, optionally clearing or seeding it first.
fn show_log(data_dir: Option<&Path>, args: &LogArgs) -> Result<()> {
    let mut progress = open_progress(data_dir)?;

    if args.clear {
        progress.clear_history();
        Display::show_history_cleared();
    }
    if args.sample {
        progress.add_sample_workout();
    }

    Display::show_log(&progress.snapshot(), Local::now().date_naive());
    Ok(())
}

/// Shows or updates the 30-day challenge.
fn run_challenge(data_dir: Option<&Path>, action: Option<ChallengeAction>) -> Result<()> {
    let mut progress = open_progress(data_dir)?;

    match action {
        None => {
            Display::show_challenge(&progress.snapshot());
        }
        Some(ChallengeAction::Check { day }) => {
            let status = progress.check_challenge_day(day)?;
            let slot = progress
                .challenge_days()
                .iter()
                .find(|slot| slot.day == day)
                .ok_or(ProgressError::InvalidDay(day))?;
            Display::show_day_status(slot, status);
        }
        Some(ChallengeAction::Complete { day }) => {
            progress.mark_challenge_day_completed(day)?;
            Display::show_day_completed(day, progress.current_unlocked_day());
        }
    }

    Ok(())
}

/// Shows or changes settings.
fn run_settings(data_dir: Option<&Path>, action: Option<SettingsAction>) -> Result<()> {
    let mut progress = open_progress(data_dir)?;

    match action {
        None => {
            Display::show_settings(&progress.settings());
        }
        Some(SettingsAction::Set { key, value }) => {
            progress.set_setting(key, value);
            Display::show_setting_changed(key, value);
        }
        Some(SettingsAction::ResetAll) => {
            progress.clear_all();
            Display::show_reset_all();
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hanma_workout::progress::MemoryStore;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["hanma"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_start() {
        let cli = Cli::parse_from(["hanma", "start", "abs"]);
        assert!(matches!(cli.command, Some(Commands::Start(_))));
    }

    #[test]
    fn test_open_progress_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();

        let progress = open_progress(Some(dir.path())).unwrap();

        assert!(progress.history().is_empty());
        assert_eq!(progress.current_unlocked_day(), 1);
    }

    #[test]
    fn test_show_log_sample_persists() {
        let dir = tempfile::tempdir().unwrap();
        let args = LogArgs {
            clear: false,
            sample: true,
        };

        show_log(Some(dir.path()), &args).unwrap();

        let progress = open_progress(Some(dir.path())).unwrap();
        assert_eq!(progress.history().len(), 1);
    }

    #[test]
    fn test_run_challenge_rejects_locked_day() {
        let dir = tempfile::tempdir().unwrap();

        let err = run_challenge(Some(dir.path()), Some(ChallengeAction::Complete { day: 2 }))
            .unwrap_err();

        assert!(err.to_string().contains("locked"));
    }

    // ------------------------------------------------------------------------
    // Session Outcome Tests
    // ------------------------------------------------------------------------

    fn completed() -> SessionOutcome {
        SessionOutcome::Completed {
            elapsed_seconds: 600,
        }
    }

    #[test]
    fn test_record_outcome_completes_challenge_day() {
        let mut progress = ProgressStore::load(MemoryStore::new());

        record_outcome(&mut progress, "Full Body", 7, &completed(), Some(1));

        assert_eq!(progress.history().len(), 1);
        assert_eq!(progress.current_unlocked_day(), 2);
    }

    #[test]
    fn test_record_outcome_keeps_workout_when_day_is_locked() {
        let mut progress = ProgressStore::load(MemoryStore::new());

        record_outcome(&mut progress, "Legs", 7, &completed(), Some(3));

        assert_eq!(progress.history().len(), 1);
        assert_eq!(progress.history()[0].workout_type, "Legs");
        assert_eq!(progress.completed_days(), 0);
        assert_eq!(progress.current_unlocked_day(), 1);
    }

    #[test]
    fn test_record_outcome_abandoned_records_nothing() {
        let mut progress = ProgressStore::load(MemoryStore::new());

        record_outcome(&mut progress, "Abs", 7, &SessionOutcome::Abandoned, Some(1));

        assert!(progress.history().is_empty());
        assert_eq!(progress.current_unlocked_day(), 1);
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["hanma", "--verbose", "workouts"]);
        assert!(cli.verbose);
    }
}
