// ABOUTME: Workout logging dialogue - type from the fixed set, then duration
// ABOUTME: Burn and extra-hydration arithmetic stays in the intelligence module
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Workout Logging Dialogue

use crate::constants::limits;
use crate::dialogue::{parse_positive_integer, Prompt};
use crate::models::WorkoutType;

/// Workout logging progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutState {
    /// Waiting for the workout type
    AwaitType,
    /// Waiting for the duration
    AwaitDuration {
        /// Collected workout type
        workout: WorkoutType,
    },
}

/// Result of feeding one message into the workout dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutAdvance {
    /// Input accepted; ask the next question
    Next {
        /// The advanced state
        state: WorkoutState,
        /// Question for the next step
        prompt: Prompt,
    },
    /// Input rejected; same state, re-prompt with an explanation
    Invalid {
        /// The unchanged state
        state: WorkoutState,
        /// Validation message for the user
        message: String,
    },
    /// Workout fully described
    Done {
        /// Workout type
        workout: WorkoutType,
        /// Duration in minutes
        duration_min: u32,
    },
}

impl WorkoutState {
    /// Initial state plus the first question
    #[must_use]
    pub fn start() -> (Self, Prompt) {
        (Self::AwaitType, Self::AwaitType.prompt())
    }

    /// The question matching the current step
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        match self {
            Self::AwaitType => Prompt::choices(
                "What kind of workout was it?",
                WorkoutType::ALL.iter().map(|w| w.label().into()),
            ),
            Self::AwaitDuration { workout } => {
                Prompt::text(format!("How many minutes of {workout}?"))
            }
        }
    }

    /// Feed one message into the dialogue
    #[must_use]
    pub fn advance(self, input: &str) -> WorkoutAdvance {
        match self {
            Self::AwaitType => match WorkoutType::from_label(input) {
                Some(workout) => {
                    let state = Self::AwaitDuration { workout };
                    let prompt = state.prompt();
                    WorkoutAdvance::Next { state, prompt }
                }
                None => WorkoutAdvance::Invalid {
                    state: Self::AwaitType,
                    message: "Please pick one of the listed workout types.".into(),
                },
            },
            Self::AwaitDuration { workout } => {
                match parse_positive_integer(input, "Duration", limits::MAX_DURATION_MIN, "minutes")
                {
                    Ok(duration_min) => WorkoutAdvance::Done {
                        workout,
                        duration_min,
                    },
                    Err(err) => WorkoutAdvance::Invalid {
                        state: Self::AwaitDuration { workout },
                        message: err.user_message(),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_then_duration() {
        let (state, prompt) = WorkoutState::start();
        assert_eq!(prompt.options.len(), 8);

        let state = match state.advance("running") {
            WorkoutAdvance::Next { state, .. } => state,
            other => panic!("expected Next, got {other:?}"),
        };
        assert_eq!(
            state.advance("30"),
            WorkoutAdvance::Done {
                workout: WorkoutType::Running,
                duration_min: 30,
            }
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            WorkoutState::AwaitType.advance("chess"),
            WorkoutAdvance::Invalid { .. }
        ));
    }

    #[test]
    fn test_duration_must_be_positive_integer() {
        let state = WorkoutState::AwaitDuration {
            workout: WorkoutType::Yoga,
        };
        assert!(matches!(
            state.clone().advance("0"),
            WorkoutAdvance::Invalid { .. }
        ));
        assert!(matches!(
            state.clone().advance("half an hour"),
            WorkoutAdvance::Invalid { .. }
        ));
        assert!(matches!(
            state.advance("45"),
            WorkoutAdvance::Done {
                workout: WorkoutType::Yoga,
                duration_min: 45,
            }
        ));
    }
}
