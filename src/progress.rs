// ABOUTME: Progress reporter - read-only projection of a profile into a daily summary
// ABOUTME: Never mutates and never fails, including for default-initialized profiles
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Progress Reporter

use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

/// Daily progress snapshot derived from a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Water drunk today (ml)
    pub water_drunk_ml: f64,
    /// Water still to drink: `max(goal - drunk, 0)` (ml)
    pub water_remaining_ml: f64,
    /// Calories eaten today (kcal)
    pub calories_consumed_kcal: f64,
    /// Calories burned by workouts today (kcal)
    pub calories_burned_kcal: f64,
    /// Net intake: `consumed - burned` (kcal)
    pub calorie_balance_kcal: f64,
}

/// Project a profile into its daily progress summary
#[must_use]
pub fn report(profile: &UserProfile) -> ProgressReport {
    ProgressReport {
        water_drunk_ml: profile.logged_water_ml,
        water_remaining_ml: (profile.water_goal_ml - profile.logged_water_ml).max(0.0),
        calories_consumed_kcal: profile.logged_calories_kcal,
        calories_burned_kcal: profile.burned_calories_kcal,
        calorie_balance_kcal: profile.logged_calories_kcal - profile.burned_calories_kcal,
    }
}

impl ProgressReport {
    /// Chat-facing summary text
    #[must_use]
    pub fn to_summary(&self, profile: &UserProfile) -> String {
        format!(
            "Today so far:\n\
             Water: {:.0} of {:.0} ml ({:.0} ml to go)\n\
             Calories: {:.0} of {:.0} kcal eaten, {:.0} kcal burned\n\
             Balance: {:.0} kcal",
            self.water_drunk_ml,
            profile.water_goal_ml,
            self.water_remaining_ml,
            self.calories_consumed_kcal,
            profile.calorie_goal_kcal,
            self.calories_burned_kcal,
            self.calorie_balance_kcal,
        )
    }
}
