// ABOUTME: Coach engine - command dispatch, per-conversation sessions, effect orchestration
// ABOUTME: Transport-agnostic: one entry point mapping (chat_id, text) to a reply
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Coach Engine
//!
//! Routes each incoming message either to a stateless command or to the
//! conversation's active dialogue, runs the external lookups the dialogues
//! need between steps, and commits results through the profile store. Every
//! failure path produces a chat-facing explanation; nothing here aborts the
//! process.
//!
//! Session handling: the active [`DialogueState`] is removed from the map
//! before any await point and re-inserted only while the dialogue stays
//! active, so a map guard is never held across a lookup.

use std::sync::Arc;

use dashmap::DashMap;

use crate::constants::defaults;
use crate::dialogue::{
    CollectedAttributes, DialogueState, FoodAdvance, FoodState, OnboardingAdvance,
    OnboardingState, Prompt, WaterAdvance, WaterState, WorkoutAdvance, WorkoutState,
};
use crate::errors::AppResult;
use crate::external::{NutritionProvider, TranslationProvider, WeatherProvider};
use crate::intelligence::{
    calorie_goal, extra_hydration_for_workout, hydration_goal, workout_energy_burned,
};
use crate::models::{LedgerField, OnboardingRecord, WorkoutType};
use crate::progress;
use crate::storage::ProfileStore;

/// Top-level bot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Greeting
    Start,
    /// Command overview
    Help,
    /// Begin profile onboarding
    SetProfile,
    /// Begin water logging
    LogWater,
    /// Begin food logging
    LogFood,
    /// Begin workout logging
    LogWorkout,
    /// Show the daily progress summary
    CheckProgress,
}

impl Command {
    /// Parse a command message; `/cmd@botname` suffixes are accepted
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.trim().split_whitespace().next()?;
        let name = first.split('@').next().unwrap_or(first);
        match name {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/set_profile" => Some(Self::SetProfile),
            "/log_water" => Some(Self::LogWater),
            "/log_food" => Some(Self::LogFood),
            "/log_workout" => Some(Self::LogWorkout),
            "/check_progress" => Some(Self::CheckProgress),
            _ => None,
        }
    }
}

/// Outgoing reply for the transport to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text
    Text(String),
    /// Text with a one-shot choice keyboard
    Choices {
        /// Message text
        text: String,
        /// Choice labels
        options: Vec<String>,
    },
}

impl From<Prompt> for Reply {
    fn from(prompt: Prompt) -> Self {
        if prompt.options.is_empty() {
            Self::Text(prompt.text)
        } else {
            Self::Choices {
                text: prompt.text,
                options: prompt.options,
            }
        }
    }
}

/// Prepend a validation message to a re-asked question
fn reprompt(message: &str, prompt: &Prompt) -> Reply {
    let text = format!("{message}\n{}", prompt.text);
    if prompt.options.is_empty() {
        Reply::Text(text)
    } else {
        Reply::Choices {
            text,
            options: prompt.options.clone(),
        }
    }
}

/// Engine behavior toggles resolved from configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct EnginePolicy {
    /// Route city names through translation before the weather lookup
    pub translate_city: bool,
}

/// The conversational core: command router plus dialogue driver
pub struct CoachEngine {
    store: Arc<dyn ProfileStore>,
    weather: Arc<dyn WeatherProvider>,
    translator: Option<Arc<dyn TranslationProvider>>,
    nutrition: Arc<dyn NutritionProvider>,
    policy: EnginePolicy,
    sessions: DashMap<i64, DialogueState>,
}

impl CoachEngine {
    /// Wire an engine from its collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn ProfileStore>,
        weather: Arc<dyn WeatherProvider>,
        translator: Option<Arc<dyn TranslationProvider>>,
        nutrition: Arc<dyn NutritionProvider>,
        policy: EnginePolicy,
    ) -> Self {
        Self {
            store,
            weather,
            translator,
            nutrition,
            policy,
            sessions: DashMap::new(),
        }
    }

    /// Process one incoming message for a conversation
    pub async fn handle_message(&self, chat_id: i64, text: &str) -> Reply {
        let text = text.trim();

        if let Some(command) = Command::parse(text) {
            // Policy: a top-level command always cancels the active dialogue
            if self.sessions.remove(&chat_id).is_some() {
                tracing::debug!(chat_id, ?command, "Canceling active dialogue for command");
            }
            return self.handle_command(chat_id, command);
        }

        match self.sessions.remove(&chat_id) {
            Some((_, state)) => self.handle_dialogue(chat_id, state, text).await,
            None => Reply::Text(
                "I track water, food and workouts against your daily goals. \
                 Send /help to see the commands."
                    .into(),
            ),
        }
    }

    fn handle_command(&self, chat_id: i64, command: Command) -> Reply {
        tracing::debug!(chat_id, ?command, "Handling command");
        match command {
            Command::Start => Reply::Text(
                "Hi! I'm HydroCal, your hydration and calorie coach.\n\
                 Set up your profile with /set_profile, then log your day.\n\
                 Send /help for the full command list."
                    .into(),
            ),
            Command::Help => Reply::Text(
                "Commands:\n\
                 /set_profile - set up your profile and daily goals\n\
                 /log_water - log water you drank\n\
                 /log_food - log something you ate\n\
                 /log_workout - log a workout\n\
                 /check_progress - today's water and calorie totals"
                    .into(),
            ),
            Command::SetProfile => {
                let (state, prompt) = OnboardingState::start();
                self.sessions
                    .insert(chat_id, DialogueState::Onboarding(state));
                prompt.into()
            }
            Command::LogWater => {
                let (state, prompt) = WaterState::start();
                self.sessions.insert(chat_id, DialogueState::Water(state));
                prompt.into()
            }
            Command::LogFood => {
                let (state, prompt) = FoodState::start();
                self.sessions.insert(chat_id, DialogueState::Food(state));
                prompt.into()
            }
            Command::LogWorkout => {
                let (state, prompt) = WorkoutState::start();
                self.sessions
                    .insert(chat_id, DialogueState::Workout(state));
                prompt.into()
            }
            Command::CheckProgress => {
                let profile = self.store.get_or_create(chat_id);
                let summary = progress::report(&profile).to_summary(&profile);
                Reply::Text(summary)
            }
        }
    }

    async fn handle_dialogue(&self, chat_id: i64, state: DialogueState, input: &str) -> Reply {
        match state {
            DialogueState::Onboarding(state) => self.drive_onboarding(chat_id, state, input).await,
            DialogueState::Water(state) => self.drive_water(chat_id, state, input),
            DialogueState::Food(state) => self.drive_food(chat_id, state, input).await,
            DialogueState::Workout(state) => self.drive_workout(chat_id, state, input),
        }
    }

    async fn drive_onboarding(&self, chat_id: i64, state: OnboardingState, input: &str) -> Reply {
        match state.advance(input) {
            OnboardingAdvance::Next { state, prompt } => {
                self.sessions
                    .insert(chat_id, DialogueState::Onboarding(state));
                prompt.into()
            }
            OnboardingAdvance::Invalid { state, message } => {
                let reply = reprompt(&message, &state.prompt());
                self.sessions
                    .insert(chat_id, DialogueState::Onboarding(state));
                reply
            }
            OnboardingAdvance::Collected(attrs) => self.complete_onboarding(chat_id, attrs).await,
        }
    }

    async fn complete_onboarding(&self, chat_id: i64, attrs: CollectedAttributes) -> Reply {
        match self.finish_onboarding(chat_id, &attrs).await {
            Ok(reply) => reply,
            Err(err) => {
                // Scratch state is already discarded; the user restarts from scratch
                tracing::warn!(chat_id, error = %err, "Onboarding aborted");
                Reply::Text(format!(
                    "{} Your profile was not saved - send /set_profile to start over.",
                    err.user_message()
                ))
            }
        }
    }

    async fn finish_onboarding(
        &self,
        chat_id: i64,
        attrs: &CollectedAttributes,
    ) -> AppResult<Reply> {
        let city_query = match (&self.translator, self.policy.translate_city) {
            (Some(translator), true) => translator.translate(&attrs.city).await?,
            _ => attrs.city.clone(),
        };
        let temperature_c = self.weather.current_temperature_c(&city_query).await?;

        let water_goal_ml = hydration_goal(attrs.weight_kg, temperature_c)?;
        let calorie_goal_kcal = calorie_goal(
            attrs.weight_kg,
            attrs.height_cm,
            attrs.age_years,
            attrs.gender,
            attrs.activity.label(),
        )?;

        let profile = self.store.commit_onboarding(
            chat_id,
            OnboardingRecord {
                gender: attrs.gender,
                weight_kg: attrs.weight_kg,
                height_cm: attrs.height_cm,
                age_years: attrs.age_years,
                activity: attrs.activity,
                city: attrs.city.clone(),
                water_goal_ml,
                calorie_goal_kcal,
            },
        );

        tracing::info!(
            chat_id,
            city = %attrs.city,
            temperature_c,
            water_goal_ml,
            calorie_goal_kcal,
            "Onboarding committed"
        );

        Ok(Reply::Text(format!(
            "Your profile is set:\n\
             Gender: {}\nWeight: {:.0} kg\nHeight: {:.0} cm\nAge: {}\n\
             Activity: {} h/week\nCity: {} ({temperature_c:.0}\u{b0}C right now)\n\n\
             Daily water goal: {:.0} ml\nDaily calorie goal: {:.0} kcal",
            attrs.gender,
            attrs.weight_kg,
            attrs.height_cm,
            attrs.age_years,
            attrs.activity,
            attrs.city,
            profile.water_goal_ml,
            profile.calorie_goal_kcal,
        )))
    }

    fn drive_water(&self, chat_id: i64, state: WaterState, input: &str) -> Reply {
        match state.advance(input) {
            WaterAdvance::Invalid { message } => {
                let state = WaterState::AwaitAmount;
                let reply = reprompt(&message, &state.prompt());
                self.sessions.insert(chat_id, DialogueState::Water(state));
                reply
            }
            WaterAdvance::Logged { amount_ml } => {
                match self
                    .store
                    .apply_ledger_delta(chat_id, LedgerField::LoggedWater, amount_ml)
                {
                    Ok(profile) => {
                        let remaining = (profile.water_goal_ml - profile.logged_water_ml).max(0.0);
                        Reply::Text(format!(
                            "Logged {amount_ml:.0} ml. Today: {:.0} of {:.0} ml, {remaining:.0} ml to go.",
                            profile.logged_water_ml, profile.water_goal_ml,
                        ))
                    }
                    Err(err) => {
                        tracing::error!(chat_id, error = %err, "Water ledger update failed");
                        Reply::Text(err.user_message())
                    }
                }
            }
        }
    }

    async fn drive_food(&self, chat_id: i64, state: FoodState, input: &str) -> Reply {
        match state {
            FoodState::AwaitName => match self.resolve_food(input).await {
                Ok((name, kcal_per_100g)) => {
                    let state = FoodState::AwaitGrams {
                        name,
                        kcal_per_100g,
                    };
                    let prompt = state.prompt();
                    self.sessions.insert(chat_id, DialogueState::Food(state));
                    Reply::Text(format!(
                        "{} has about {kcal_per_100g:.0} kcal per 100 g.\n{}",
                        input.trim(),
                        prompt.text,
                    ))
                }
                Err(err) => {
                    // Lookup failure keeps the dialogue in step one
                    let state = FoodState::AwaitName;
                    let reply = reprompt(&err.user_message(), &state.prompt());
                    self.sessions.insert(chat_id, DialogueState::Food(state));
                    reply
                }
            },
            state @ FoodState::AwaitGrams { .. } => match state.advance_grams(input) {
                FoodAdvance::Invalid { state, message } => {
                    let reply = reprompt(&message, &state.prompt());
                    self.sessions.insert(chat_id, DialogueState::Food(state));
                    reply
                }
                FoodAdvance::Logged { name, grams, kcal } => {
                    if kcal <= 0.0 {
                        return Reply::Text(format!(
                            "{grams:.0} g of {name} is essentially zero calories - nothing to log."
                        ));
                    }
                    match self
                        .store
                        .apply_ledger_delta(chat_id, LedgerField::LoggedCalories, kcal)
                    {
                        Ok(profile) => Reply::Text(format!(
                            "Logged {grams:.0} g of {name}: {kcal:.1} kcal. \
                             Today: {:.0} of {:.0} kcal.",
                            profile.logged_calories_kcal, profile.calorie_goal_kcal,
                        )),
                        Err(err) => {
                            tracing::error!(chat_id, error = %err, "Food ledger update failed");
                            Reply::Text(err.user_message())
                        }
                    }
                }
            },
        }
    }

    /// Validate a food name, translate it when configured, and look up its
    /// energy density. Returns the display name and kcal per 100 g.
    async fn resolve_food(&self, input: &str) -> AppResult<(String, f64)> {
        let name = FoodState::accept_name(input)?;
        let query = match &self.translator {
            Some(translator) => translator.translate(&name).await?,
            None => name.clone(),
        };
        let kcal_per_100g = self.nutrition.calories_per_100g(&query).await?;
        Ok((name, kcal_per_100g))
    }

    fn drive_workout(&self, chat_id: i64, state: WorkoutState, input: &str) -> Reply {
        match state.advance(input) {
            WorkoutAdvance::Next { state, prompt } => {
                self.sessions
                    .insert(chat_id, DialogueState::Workout(state));
                prompt.into()
            }
            WorkoutAdvance::Invalid { state, message } => {
                let reply = reprompt(&message, &state.prompt());
                self.sessions
                    .insert(chat_id, DialogueState::Workout(state));
                reply
            }
            WorkoutAdvance::Done {
                workout,
                duration_min,
            } => self.commit_workout(chat_id, workout, duration_min),
        }
    }

    fn commit_workout(&self, chat_id: i64, workout: WorkoutType, duration_min: u32) -> Reply {
        let profile = self.store.get_or_create(chat_id);
        // A profile that never onboarded has no weight; fall back to the
        // documented default rather than failing the log
        let weight_kg = profile.weight_kg.unwrap_or(defaults::WEIGHT_KG);

        let outcome = workout_energy_burned(weight_kg, workout.label(), duration_min)
            .and_then(|burned| {
                extra_hydration_for_workout(duration_min).map(|extra| (burned, extra))
            })
            .and_then(|(burned_kcal, extra_water_ml)| {
                self.store
                    .apply_ledger_delta(chat_id, LedgerField::BurnedCalories, burned_kcal)?;
                let profile = self.store.apply_ledger_delta(
                    chat_id,
                    LedgerField::WaterGoal,
                    extra_water_ml,
                )?;
                Ok((burned_kcal, extra_water_ml, profile))
            });

        match outcome {
            Ok((burned_kcal, extra_water_ml, profile)) => Reply::Text(format!(
                "{duration_min} min of {workout}: about {burned_kcal:.0} kcal burned.\n\
                 I raised today's water goal by {extra_water_ml:.0} ml to {:.0} ml.",
                profile.water_goal_ml,
            )),
            Err(err) => {
                tracing::error!(chat_id, error = %err, "Workout logging failed");
                Reply::Text(err.user_message())
            }
        }
    }

    /// Whether a conversation currently has an active dialogue
    #[must_use]
    pub fn has_active_dialogue(&self, chat_id: i64) -> bool {
        self.sessions.contains_key(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("  /check_progress  "), Some(Command::CheckProgress));
        assert_eq!(Command::parse("/log_water@hydrocal_bot"), Some(Command::LogWater));
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse("350"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_prompt_to_reply_mapping() {
        let plain: Reply = Prompt::text("How much?").into();
        assert_eq!(plain, Reply::Text("How much?".into()));

        let keyboard: Reply = Prompt::choices("Pick one", ["a".into(), "b".into()]).into();
        assert_eq!(
            keyboard,
            Reply::Choices {
                text: "Pick one".into(),
                options: vec!["a".into(), "b".into()],
            }
        );
    }
}
