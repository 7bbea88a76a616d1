// ABOUTME: Onboarding dialogue - six strictly ordered steps collecting profile attributes
// ABOUTME: Each variant carries only the fields already validated; no partial bags
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Onboarding Dialogue
//!
//! `AwaitGender → AwaitWeight → AwaitHeight → AwaitAge → AwaitActivity →
//! AwaitCity`, one message per step. The terminal payload
//! ([`CollectedAttributes`]) has every attribute validated; the engine then
//! performs the weather lookup, computes goals, and commits. A failed
//! validation re-prompts without advancing or dropping collected fields.

use crate::constants::limits;
use crate::dialogue::{parse_positive_integer, parse_positive_number, Prompt, MAX_AGE};
use crate::models::{ActivityBucket, Gender};

/// Onboarding progress; each variant holds the attributes collected so far
#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingState {
    /// Waiting for gender
    AwaitGender,
    /// Waiting for weight
    AwaitWeight {
        /// Collected gender
        gender: Gender,
    },
    /// Waiting for height
    AwaitHeight {
        /// Collected gender
        gender: Gender,
        /// Collected weight (kg)
        weight_kg: f64,
    },
    /// Waiting for age
    AwaitAge {
        /// Collected gender
        gender: Gender,
        /// Collected weight (kg)
        weight_kg: f64,
        /// Collected height (cm)
        height_cm: f64,
    },
    /// Waiting for the activity bucket
    AwaitActivity {
        /// Collected gender
        gender: Gender,
        /// Collected weight (kg)
        weight_kg: f64,
        /// Collected height (cm)
        height_cm: f64,
        /// Collected age (years)
        age_years: u32,
    },
    /// Waiting for the city name
    AwaitCity {
        /// Collected gender
        gender: Gender,
        /// Collected weight (kg)
        weight_kg: f64,
        /// Collected height (cm)
        height_cm: f64,
        /// Collected age (years)
        age_years: u32,
        /// Collected activity bucket
        activity: ActivityBucket,
    },
}

/// Fully validated attribute set produced by the final step
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedAttributes {
    /// Gender
    pub gender: Gender,
    /// Weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age_years: u32,
    /// Activity bucket
    pub activity: ActivityBucket,
    /// City for the weather lookup
    pub city: String,
}

/// Result of feeding one message into the onboarding dialogue
#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingAdvance {
    /// Input accepted; ask the next question
    Next {
        /// The advanced state
        state: OnboardingState,
        /// Question for the next step
        prompt: Prompt,
    },
    /// Input rejected; same state, re-prompt with an explanation
    Invalid {
        /// The unchanged state
        state: OnboardingState,
        /// Validation message for the user
        message: String,
    },
    /// All six attributes collected
    Collected(CollectedAttributes),
}

impl OnboardingState {
    /// Initial state plus the first question
    #[must_use]
    pub fn start() -> (Self, Prompt) {
        (Self::AwaitGender, Self::AwaitGender.prompt())
    }

    /// The question matching the current step
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        match self {
            Self::AwaitGender => Prompt::choices(
                "Let's set up your profile. What is your gender?",
                [Gender::Male.to_string(), Gender::Female.to_string()],
            ),
            Self::AwaitWeight { .. } => Prompt::text("What is your weight, in kilograms?"),
            Self::AwaitHeight { .. } => Prompt::text("What is your height, in centimeters?"),
            Self::AwaitAge { .. } => Prompt::text("How old are you?"),
            Self::AwaitActivity { .. } => Prompt::choices(
                "How many hours per week are you active?",
                ActivityBucket::ALL.iter().map(|b| b.label().into()),
            ),
            Self::AwaitCity { .. } => {
                Prompt::text("Which city are you in? I use it to check the weather.")
            }
        }
    }

    /// Feed one message into the dialogue
    #[must_use]
    pub fn advance(self, input: &str) -> OnboardingAdvance {
        match self {
            Self::AwaitGender => match Gender::from_label(input) {
                Some(gender) => {
                    let state = Self::AwaitWeight { gender };
                    let prompt = state.prompt();
                    OnboardingAdvance::Next { state, prompt }
                }
                None => OnboardingAdvance::Invalid {
                    state: Self::AwaitGender,
                    message: "Please answer 'male' or 'female'.".into(),
                },
            },
            Self::AwaitWeight { gender } => {
                match parse_positive_number(input, "Weight", limits::MAX_WEIGHT_KG, "kilograms") {
                    Ok(weight_kg) => {
                        let state = Self::AwaitHeight { gender, weight_kg };
                        let prompt = state.prompt();
                        OnboardingAdvance::Next { state, prompt }
                    }
                    Err(err) => OnboardingAdvance::Invalid {
                        state: Self::AwaitWeight { gender },
                        message: err.user_message(),
                    },
                }
            }
            Self::AwaitHeight { gender, weight_kg } => {
                match parse_positive_number(input, "Height", limits::MAX_HEIGHT_CM, "centimeters") {
                    Ok(height_cm) => {
                        let state = Self::AwaitAge {
                            gender,
                            weight_kg,
                            height_cm,
                        };
                        let prompt = state.prompt();
                        OnboardingAdvance::Next { state, prompt }
                    }
                    Err(err) => OnboardingAdvance::Invalid {
                        state: Self::AwaitHeight { gender, weight_kg },
                        message: err.user_message(),
                    },
                }
            }
            Self::AwaitAge {
                gender,
                weight_kg,
                height_cm,
            } => match parse_positive_integer(input, "Age", MAX_AGE, "years") {
                Ok(age_years) => {
                    let state = Self::AwaitActivity {
                        gender,
                        weight_kg,
                        height_cm,
                        age_years,
                    };
                    let prompt = state.prompt();
                    OnboardingAdvance::Next { state, prompt }
                }
                Err(err) => OnboardingAdvance::Invalid {
                    state: Self::AwaitAge {
                        gender,
                        weight_kg,
                        height_cm,
                    },
                    message: err.user_message(),
                },
            },
            Self::AwaitActivity {
                gender,
                weight_kg,
                height_cm,
                age_years,
            } => match ActivityBucket::from_label(input) {
                Some(activity) => {
                    let state = Self::AwaitCity {
                        gender,
                        weight_kg,
                        height_cm,
                        age_years,
                        activity,
                    };
                    let prompt = state.prompt();
                    OnboardingAdvance::Next { state, prompt }
                }
                None => OnboardingAdvance::Invalid {
                    state: Self::AwaitActivity {
                        gender,
                        weight_kg,
                        height_cm,
                        age_years,
                    },
                    message: "Please pick one of the listed activity ranges.".into(),
                },
            },
            Self::AwaitCity {
                gender,
                weight_kg,
                height_cm,
                age_years,
                activity,
            } => {
                let city = input.trim();
                if city.is_empty() {
                    OnboardingAdvance::Invalid {
                        state: Self::AwaitCity {
                            gender,
                            weight_kg,
                            height_cm,
                            age_years,
                            activity,
                        },
                        message: "Please type your city name.".into(),
                    }
                } else {
                    OnboardingAdvance::Collected(CollectedAttributes {
                        gender,
                        weight_kg,
                        height_cm,
                        age_years,
                        activity,
                        city: city.into(),
                    })
                }
            }
        }
    }
}
