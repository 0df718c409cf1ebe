//! Timer engine for workout sessions.
//!
//! This module provides the core countdown functionality:
//! - State transitions (Exercising → Resting → Exercising → … → Completed)
//! - One-second `tick()` driven by an external scheduler
//! - Event firing for display and sound cues
//! - Skip, back/forward navigation and reset

use tokio::sync::mpsc;

use crate::types::{Exercise, TimerPhase, TimerSnapshot, WorkoutSession};

use super::error::TimerError;

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for display and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A new session was initialized
    Started {
        /// Number of exercises in the session
        exercise_count: usize,
    },
    /// Timer resumed counting
    Resumed,
    /// Timer paused
    Paused,
    /// One second elapsed
    Tick {
        /// Remaining seconds in the current phase
        remaining_seconds: u32,
    },
    /// An exercise countdown ended and rest begins
    ExerciseFinished {
        /// Index of the exercise that ended
        index: usize,
    },
    /// A rest period ended and the next exercise begins
    RestFinished {
        /// Index of the exercise now running
        next_index: usize,
    },
    /// The last exercise ended
    WorkoutFinished {
        /// Seconds actually counted during the session
        elapsed_seconds: u32,
    },
    /// The session was discarded before completion
    Abandoned,
}

// ============================================================================
// WorkoutTimer
// ============================================================================

/// Timer engine that owns the active workout session and emits events.
pub struct WorkoutTimer {
    /// Current session state
    session: WorkoutSession,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl WorkoutTimer {
    /// Creates an idle engine with the given event channel.
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            session: WorkoutSession::default(),
            event_tx,
        }
    }

    /// Initializes a new session on the first exercise, not yet running.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the list is empty or an exercise has no duration.
    pub fn start(
        &mut self,
        exercises: Vec<Exercise>,
        rest_duration_seconds: u32,
    ) -> Result<(), TimerError> {
        if exercises.is_empty() {
            return Err(TimerError::InvalidInput(
                "at least one exercise is required".to_string(),
            ));
        }
        if let Some(exercise) = exercises.iter().find(|e| e.duration_seconds == 0) {
            return Err(TimerError::InvalidInput(format!(
                "exercise '{}' has no duration",
                exercise.name
            )));
        }

        let exercise_count = exercises.len();
        self.session = WorkoutSession::new(exercises, rest_duration_seconds);
        tracing::debug!(exercise_count, rest_duration_seconds, "workout session started");

        self.emit(TimerEvent::Started { exercise_count });
        Ok(())
    }

    /// Flips between running and paused.
    ///
    /// Does nothing when no session is active or the workout is complete.
    pub fn toggle_running(&mut self) {
        if !self.session.phase.is_counting() {
            return;
        }

        self.session.running = !self.session.running;
        if self.session.running {
            self.emit(TimerEvent::Resumed);
        } else {
            self.emit(TimerEvent::Paused);
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Performs the phase transition when the countdown reaches zero.
    /// Ticks while paused are ignored.
    pub fn tick(&mut self) {
        if !self.session.running || !self.session.phase.is_counting() {
            return;
        }

        let finished = self.session.tick();
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.session.remaining_seconds,
        });

        if finished {
            self.advance();
        }
    }

    /// Ends the current phase immediately, as if it had counted down.
    pub fn skip_current(&mut self) {
        if !self.session.phase.is_counting() {
            return;
        }
        self.session.remaining_seconds = 0;
        self.advance();
    }

    /// Jumps to the exercise at `index` and stops the clock.
    ///
    /// Out-of-range indices are ignored.
    pub fn go_to_exercise(&mut self, index: usize) {
        if !self.session.phase.is_counting() || index >= self.session.exercises.len() {
            return;
        }
        self.session.start_exercise(index);
        self.session.running = false;
    }

    /// Goes back one exercise. No-op on the first exercise.
    pub fn previous_exercise(&mut self) {
        if let Some(index) = self.session.current_index.checked_sub(1) {
            self.go_to_exercise(index);
        }
    }

    /// Goes forward one exercise. No-op on the last exercise.
    pub fn next_exercise(&mut self) {
        self.go_to_exercise(self.session.current_index + 1);
    }

    /// Restarts the current exercise countdown and stops the clock.
    pub fn reset(&mut self) {
        if !self.session.phase.is_counting() {
            return;
        }
        self.session.start_exercise(self.session.current_index);
        self.session.running = false;
    }

    /// Discards the session without completing it.
    pub fn abandon(&mut self) {
        if self.session.phase == TimerPhase::Idle {
            return;
        }
        tracing::debug!(
            index = self.session.current_index,
            "workout session abandoned"
        );
        self.session = WorkoutSession::default();
        self.emit(TimerEvent::Abandoned);
    }

    /// Returns a snapshot for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from_session(&self.session)
    }

    /// Returns a reference to the current session.
    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.session.phase
    }

    /// Returns true if ticks are being counted.
    pub fn is_running(&self) -> bool {
        self.session.running
    }

    /// Handles a countdown reaching zero.
    fn advance(&mut self) {
        match self.session.phase {
            TimerPhase::Exercising => {
                let index = self.session.current_index;

                if self.session.is_last_exercise() {
                    self.session.complete();
                    self.emit(TimerEvent::WorkoutFinished {
                        elapsed_seconds: self.session.elapsed_seconds,
                    });
                    return;
                }

                self.emit(TimerEvent::ExerciseFinished { index });

                if self.session.rest_duration_seconds == 0 {
                    self.session.start_exercise(index + 1);
                    self.emit(TimerEvent::RestFinished {
                        next_index: index + 1,
                    });
                } else {
                    self.session.start_resting();
                }
            }
            TimerPhase::Resting => {
                let next_index = self.session.current_index + 1;
                self.session.start_exercise(next_index);
                self.emit(TimerEvent::RestFinished { next_index });
            }
            TimerPhase::Idle | TimerPhase::Completed => {}
        }
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("timer event dropped: receiver closed");
        }
    }

    /// Returns a mutable reference to the session (for testing).
    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut WorkoutSession {
        &mut self.session
    }
}

// ============================================================================
// Tests
// ============================================================================
