//! Command definitions for the workout CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog;
use crate::types::{SettingKey, CHALLENGE_DAYS, MAX_REST_SECONDS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Hanma Workout - interval workouts and a 30-day challenge in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "hanma",
    version,
    about = "Interval workout timer with progress tracking",
    long_about = "Runs timed bodyweight workouts with rest periods between exercises.\n\
                  Finished workouts are logged and count toward a 30-day challenge.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding progress data (defaults to ~/.hanma)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List workout categories
    Workouts,

    /// Show the exercises of a category
    Show {
        /// Workout category (e.g. "full-body", "abs")
        #[arg(value_parser = validate_category)]
        category: String,
    },

    /// Run a workout session in the foreground
    Start(StartArgs),

    /// Show statistics and workout history
    Log(LogArgs),

    /// Show or update the 30-day challenge
    Challenge {
        #[command(subcommand)]
        action: Option<ChallengeAction>,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Challenge subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeAction {
    /// Tell whether a day can be started
    Check {
        /// Challenge day (1-30)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=CHALLENGE_DAYS as i64))]
        day: u32,
    },

    /// Mark a day as completed
    Complete {
        /// Challenge day (1-30)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=CHALLENGE_DAYS as i64))]
        day: u32,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Change one setting
    Set {
        /// Setting name
        #[arg(value_enum)]
        key: SettingKey,

        /// New value (on/off)
        #[arg(value_parser = parse_toggle, action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Erase history, challenge progress and settings
    ResetAll,
}

// ============================================================================
// Start Command Arguments
// ============================================================================

/// Arguments for the start command
#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// Workout category (e.g. "full-body", "abs"); defaults to the challenge day's workout
    #[arg(value_parser = validate_category, required_unless_present = "challenge_day")]
    pub category: Option<String>,

    /// Rest between exercises in seconds (0-300, 0 disables rest)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(0..=MAX_REST_SECONDS as i64)
    )]
    pub rest: Option<u32>,

    /// Challenge day to run; it is marked completed when the workout finishes
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=CHALLENGE_DAYS as i64)
    )]
    pub challenge_day: Option<u32>,

    /// Start the clock immediately instead of waiting for `p`
    #[arg(short, long)]
    pub autostart: bool,

    /// Do not ring the terminal bell on phase changes
    #[arg(long)]
    pub no_sound: bool,
}

// ============================================================================
// Log Command Arguments
// ============================================================================

/// Arguments for the log command
#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
    /// Delete the workout history before showing it
    #[arg(long)]
    pub clear: bool,

    /// Record a sample workout before showing the log
    #[arg(long, conflicts_with = "clear")]
    pub sample: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Resolves a category name to its canonical catalog spelling.
fn validate_category(s: &str) -> Result<String, String> {
    catalog::find_category(s)
        .map(str::to_string)
        .ok_or_else(|| {
            format!(
                "unknown workout '{}' (available: {})",
                s,
                catalog::category_names().join(", ")
            )
        })
}

/// Parses an on/off toggle.
fn parse_toggle(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(format!("expected 'on' or 'off', got '{}'", s)),
    }
}

// ============================================================================
// Tests
// ============================================================================
