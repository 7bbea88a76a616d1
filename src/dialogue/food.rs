// ABOUTME: Food logging dialogue - product name then grams eaten
// ABOUTME: The nutrition lookup happens between steps; a miss re-prompts step one
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Food Logging Dialogue
//!
//! Step 1 collects a free-text product name; the engine resolves it through
//! translation and nutrition lookups before constructing [`FoodState::AwaitGrams`]
//! with the energy density. A lookup failure keeps the dialogue in step 1.
//! Step 2 collects grams eaten and yields the portion's calories.

use crate::constants::limits;
use crate::dialogue::{parse_positive_number, Prompt};
use crate::errors::{AppError, AppResult};

/// Food logging progress
#[derive(Debug, Clone, PartialEq)]
pub enum FoodState {
    /// Waiting for the product name
    AwaitName,
    /// Waiting for the portion size
    AwaitGrams {
        /// Resolved product name (as sent to the nutrition lookup)
        name: String,
        /// Energy density from the nutrition lookup (kcal per 100 g)
        kcal_per_100g: f64,
    },
}

/// Result of feeding a portion size into step 2
#[derive(Debug, Clone, PartialEq)]
pub enum FoodAdvance {
    /// Input rejected; re-prompt with an explanation
    Invalid {
        /// The unchanged state
        state: FoodState,
        /// Validation message for the user
        message: String,
    },
    /// Portion accepted
    Logged {
        /// Resolved product name
        name: String,
        /// Grams eaten
        grams: f64,
        /// Calories in the portion (kcal)
        kcal: f64,
    },
}

/// Calories in a portion given energy density per 100 g
#[must_use]
pub fn portion_calories(kcal_per_100g: f64, grams: f64) -> f64 {
    kcal_per_100g * grams / 100.0
}

impl FoodState {
    /// Initial state plus the question
    #[must_use]
    pub fn start() -> (Self, Prompt) {
        (Self::AwaitName, Self::AwaitName.prompt())
    }

    /// The question matching the current step
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        match self {
            Self::AwaitName => Prompt::text("What did you eat?"),
            Self::AwaitGrams { name, .. } => {
                Prompt::text(format!("How many grams of {name} did you have?"))
            }
        }
    }

    /// Validate the product name from step 1 (the lookup itself is the
    /// engine's job)
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn accept_name(input: &str) -> AppResult<String> {
        let name = input.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please type a product name."));
        }
        Ok(name.into())
    }

    /// Feed the portion size into step 2. Calling this in step 1 is a
    /// programming error and re-prompts defensively.
    #[must_use]
    pub fn advance_grams(self, input: &str) -> FoodAdvance {
        match self {
            Self::AwaitName => FoodAdvance::Invalid {
                state: Self::AwaitName,
                message: "Please type a product name first.".into(),
            },
            Self::AwaitGrams {
                name,
                kcal_per_100g,
            } => match parse_positive_number(input, "Portion", limits::MAX_PORTION_G, "grams") {
                Ok(grams) => {
                    let kcal = portion_calories(kcal_per_100g, grams);
                    FoodAdvance::Logged { name, grams, kcal }
                }
                Err(err) => FoodAdvance::Invalid {
                    message: err.user_message(),
                    state: Self::AwaitGrams {
                        name,
                        kcal_per_100g,
                    },
                },
            },
        }
    }
}
