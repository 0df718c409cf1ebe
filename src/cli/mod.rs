//! CLI module for the workout timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;

pub use commands::{ChallengeAction, Cli, Commands, LogArgs, SettingsAction, StartArgs};
pub use display::Display;
