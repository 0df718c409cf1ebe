//! Foreground session runner.
//!
//! Owns the one-second ticker that drives [`WorkoutTimer::tick`], reads user
//! actions line by line, and stops on completion, quit or Ctrl-C. The ticker
//! lives inside [`SessionRunner::run`] and is dropped on every exit path.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::cli::Display;
use crate::types::Exercise;

use super::engine::{TimerEvent, WorkoutTimer};
use super::error::TimerError;

/// Tick cadence.
const TICK: Duration = Duration::from_secs(1);

// ============================================================================
// SessionAction
// ============================================================================

/// User actions accepted while a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Pause or resume
    ToggleRunning,
    /// End the current phase now
    Skip,
    /// Jump to the next exercise
    Next,
    /// Jump to the previous exercise
    Previous,
    /// Restart the current exercise
    Reset,
    /// Leave without saving
    Quit,
}

impl SessionAction {
    /// Parses one input line. Unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" | "resume" | "" => Some(Self::ToggleRunning),
            "s" | "skip" => Some(Self::Skip),
            "n" | "next" => Some(Self::Next),
            "b" | "back" | "prev" => Some(Self::Previous),
            "r" | "reset" => Some(Self::Reset),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every exercise was done
    Completed {
        /// Seconds actually counted down
        elapsed_seconds: u32,
    },
    /// The user left early; nothing is recorded
    Abandoned,
}

impl SessionOutcome {
    /// Whole minutes to log for a completed session, rounded up.
    pub fn duration_minutes(&self) -> u32 {
        match self {
            Self::Completed { elapsed_seconds } => elapsed_seconds.div_ceil(60),
            Self::Abandoned => 0,
        }
    }
}

// ============================================================================
// SessionRunner
// ============================================================================

/// Drives one workout session in the foreground.
pub struct SessionRunner {
    timer: WorkoutTimer,
    event_rx: mpsc::UnboundedReceiver<TimerEvent>,
    sound: bool,
}

impl SessionRunner {
    /// Creates a runner with a started session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the exercise list cannot drive a session.
    pub fn new(
        exercises: Vec<Exercise>,
        rest_seconds: u32,
        autostart: bool,
    ) -> Result<Self, TimerError> {
        let (tx, event_rx) = mpsc::unbounded_channel();
        let mut timer = WorkoutTimer::new(tx);
        timer.start(exercises, rest_seconds)?;
        if autostart {
            timer.toggle_running();
        }

        Ok(Self {
            timer,
            event_rx,
            sound: false,
        })
    }

    /// Rings the terminal bell on phase changes.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound = enabled;
        self
    }

    /// Runs until the workout completes or is abandoned.
    pub async fn run<R>(mut self, input: R) -> Result<SessionOutcome>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut ticker = interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut lines = input.lines();
        let mut input_open = true;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut listen_signal = true;

        Display::show_controls();
        Display::show_snapshot(&self.timer.snapshot());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.timer.tick();
                }
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => self.apply_line(&line),
                    Ok(None) => {
                        tracing::debug!("input closed; session continues on the clock");
                        input_open = false;
                    }
                    Err(e) => {
                        tracing::warn!("failed to read input: {}", e);
                        input_open = false;
                    }
                },
                signal = &mut ctrl_c, if listen_signal => match signal {
                    Ok(()) => self.timer.abandon(),
                    Err(e) => {
                        tracing::warn!("Ctrl-C handler unavailable: {}", e);
                        listen_signal = false;
                    }
                },
            }

            if let Some(outcome) = self.process_events() {
                tracing::info!(?outcome, "workout session ended");
                return Ok(outcome);
            }
        }
    }

    fn apply_line(&mut self, line: &str) {
        let Some(action) = SessionAction::parse(line) else {
            Display::show_controls();
            return;
        };

        match action {
            SessionAction::ToggleRunning => self.timer.toggle_running(),
            SessionAction::Skip => self.timer.skip_current(),
            SessionAction::Next => self.timer.next_exercise(),
            SessionAction::Previous => self.timer.previous_exercise(),
            SessionAction::Reset => self.timer.reset(),
            SessionAction::Quit => self.timer.abandon(),
        }

        if action != SessionAction::Quit {
            Display::show_snapshot(&self.timer.snapshot());
        }
    }

    /// Renders pending events and reports a terminal one.
    fn process_events(&mut self) -> Option<SessionOutcome> {
        let mut outcome = None;

        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                TimerEvent::Tick { .. } => {
                    Display::show_snapshot(&self.timer.snapshot());
                }
                TimerEvent::ExerciseFinished { .. } | TimerEvent::RestFinished { .. } => {
                    self.cue();
                    Display::show_snapshot(&self.timer.snapshot());
                }
                TimerEvent::WorkoutFinished { elapsed_seconds } => {
                    self.cue();
                    outcome = Some(SessionOutcome::Completed { elapsed_seconds });
                }
                TimerEvent::Abandoned => {
                    outcome = Some(SessionOutcome::Abandoned);
                }
                TimerEvent::Started { .. } | TimerEvent::Paused | TimerEvent::Resumed => {}
            }
        }

        outcome
    }

    fn cue(&self) {
        if self.sound {
            Display::bell();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
