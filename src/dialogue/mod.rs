// ABOUTME: Guided-input dialogues - typed state machines for onboarding and logging
// ABOUTME: Pure dispatch per step; the engine owns lookups and storage effects
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Guided-Input Dialogues
//!
//! Each dialogue is an explicit tagged union whose variants carry exactly the
//! fields collected so far, so an illegal combination of "step marker" and
//! payload cannot be represented. Advancing is a pure function from
//! `(state, input)`: validation failure returns the unchanged state with a
//! re-prompt message and never loses previously collected fields.
//!
//! Scratch state (an active [`DialogueState`]) is per conversation, created
//! when a guided sequence starts and discarded on completion or cancellation.
//! It is distinct from the committed profile.

pub mod food;
pub mod onboarding;
pub mod water;
pub mod workout;

pub use food::{FoodAdvance, FoodState};
pub use onboarding::{CollectedAttributes, OnboardingAdvance, OnboardingState};
pub use water::{WaterAdvance, WaterState};
pub use workout::{WorkoutAdvance, WorkoutState};

use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// The active dialogue for one conversation
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueState {
    /// Profile onboarding in progress
    Onboarding(OnboardingState),
    /// Water logging in progress
    Water(WaterState),
    /// Food logging in progress
    Food(FoodState),
    /// Workout logging in progress
    Workout(WorkoutState),
}

/// A question for the user, optionally with a fixed set of choices that the
/// transport renders as a reply keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Question text
    pub text: String,
    /// Choice labels; empty for free-text questions
    pub options: Vec<String>,
}

impl Prompt {
    /// Free-text question
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Question with a fixed choice keyboard
    pub fn choices(text: impl Into<String>, options: impl IntoIterator<Item = String>) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().collect(),
        }
    }
}

/// Parse a positive decimal number, accepting a comma decimal separator
///
/// # Errors
///
/// Returns a validation error for non-numeric, non-positive, or
/// over-`max` input; `what`/`unit` name the field in the message.
pub(crate) fn parse_positive_number(
    input: &str,
    what: &str,
    max: f64,
    unit: &str,
) -> AppResult<f64> {
    let normalized = input.trim().replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| AppError::validation(format!("{what} must be a number of {unit}.")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!(
            "{what} must be a positive number of {unit}."
        )));
    }
    if value > max {
        return Err(AppError::out_of_range(format!(
            "{what} of {value} {unit} looks implausible - please check the value."
        )));
    }
    Ok(value)
}

/// Parse a positive whole number with an upper bound
///
/// # Errors
///
/// Returns a validation error for non-integer, zero, or over-`max` input.
pub(crate) fn parse_positive_integer(
    input: &str,
    what: &str,
    max: u32,
    unit: &str,
) -> AppResult<u32> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{what} must be a whole number of {unit}.")))?;
    if value == 0 {
        return Err(AppError::validation(format!(
            "{what} must be greater than zero."
        )));
    }
    if value > max {
        return Err(AppError::out_of_range(format!(
            "{what} of {value} {unit} looks implausible - please check the value."
        )));
    }
    Ok(value)
}

/// Upper bound used when parsing age as an integer
pub(crate) const MAX_AGE: u32 = limits::MAX_AGE_YEARS;
