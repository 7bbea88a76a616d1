// ABOUTME: Core data models - user profile, gender, activity buckets, workout types
// ABOUTME: Strong typing keeps raw chat input out of the formula and storage layers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Models
//!
//! Core data structures shared across the bot. The dialogue layer parses raw
//! chat strings into these types once; everything downstream (formulas,
//! storage, progress reporting) works on validated values.

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Gender for BMR calculation (selects the Mifflin-St Jeor constant term)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male (+5 constant term)
    Male,
    /// Female (-161 constant term)
    Female,
}

impl Gender {
    /// Parse a chat label, case-insensitively
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Weekly activity bucket for the TDEE multiplier
///
/// Buckets are labeled by weekly training hours as presented in chat
/// (`1-2` … `9-10`); multipliers follow the standard activity-factor table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityBucket {
    /// 1-2 hours per week
    Sedentary,
    /// 3-4 hours per week
    LightlyActive,
    /// 5-6 hours per week
    ModeratelyActive,
    /// 7-8 hours per week
    VeryActive,
    /// 9-10 hours per week
    ExtraActive,
}

impl ActivityBucket {
    /// All buckets in ascending order, for choice keyboards
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::VeryActive,
        Self::ExtraActive,
    ];

    /// Parse the chat label for a bucket
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "1-2" => Some(Self::Sedentary),
            "3-4" => Some(Self::LightlyActive),
            "5-6" => Some(Self::ModeratelyActive),
            "7-8" => Some(Self::VeryActive),
            "9-10" => Some(Self::ExtraActive),
            _ => None,
        }
    }

    /// The chat label for this bucket
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "1-2",
            Self::LightlyActive => "3-4",
            Self::ModeratelyActive => "5-6",
            Self::VeryActive => "7-8",
            Self::ExtraActive => "9-10",
        }
    }

    /// Activity factor applied to BMR
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

impl Display for ActivityBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.label())
    }
}

/// Supported workout types for burn calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    /// Running
    Running,
    /// Walking
    Walking,
    /// Cycling
    Cycling,
    /// Swimming
    Swimming,
    /// Strength training
    Strength,
    /// Yoga
    Yoga,
    /// Boxing
    Boxing,
    /// Rowing
    Rowing,
}

impl WorkoutType {
    /// All workout types, for choice keyboards
    pub const ALL: [Self; 8] = [
        Self::Running,
        Self::Walking,
        Self::Cycling,
        Self::Swimming,
        Self::Strength,
        Self::Yoga,
        Self::Boxing,
        Self::Rowing,
    ];

    /// Parse a chat label, case-insensitively
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "running" => Some(Self::Running),
            "walking" => Some(Self::Walking),
            "cycling" => Some(Self::Cycling),
            "swimming" => Some(Self::Swimming),
            "strength" => Some(Self::Strength),
            "yoga" => Some(Self::Yoga),
            "boxing" => Some(Self::Boxing),
            "rowing" => Some(Self::Rowing),
            _ => None,
        }
    }

    /// The chat label for this type
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::Strength => "strength",
            Self::Yoga => "yoga",
            Self::Boxing => "boxing",
            Self::Rowing => "rowing",
        }
    }

    /// Energy burn coefficient in kcal per kg of body weight per minute,
    /// derived from MET tables (kcal/kg/min = MET x 0.0175)
    #[must_use]
    pub fn kcal_per_kg_min(&self) -> f64 {
        match self {
            Self::Running => 0.17,
            Self::Walking => 0.06,
            Self::Cycling => 0.13,
            Self::Swimming => 0.14,
            Self::Strength => 0.10,
            Self::Yoga => 0.05,
            Self::Boxing => 0.16,
            Self::Rowing => 0.12,
        }
    }
}

impl Display for WorkoutType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.label())
    }
}

/// Ledger accumulators that [`crate::storage::ProfileStore::apply_ledger_delta`]
/// may increment. `WaterGoal` is included because workout logging raises the
/// hydration goal as a side effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedgerField {
    /// Water drunk today (ml)
    LoggedWater,
    /// Calories eaten today (kcal)
    LoggedCalories,
    /// Calories burned by workouts today (kcal)
    BurnedCalories,
    /// Daily water goal (ml)
    WaterGoal,
}

/// Validated attribute set committed at the end of onboarding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingRecord {
    /// Gender used for the BMR constant term
    pub gender: Gender,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age_years: u32,
    /// Weekly activity bucket
    pub activity: ActivityBucket,
    /// City used as the weather lookup key
    pub city: String,
    /// Derived daily water goal (ml)
    pub water_goal_ml: f64,
    /// Derived daily calorie goal (kcal)
    pub calorie_goal_kcal: f64,
}

/// Per-user profile: physiological attributes plus the daily ledger
///
/// Attribute fields are `None` until the first onboarding completes; the
/// goals start at the documented defaults so logging commands work before
/// onboarding. The three `logged_*`/`burned_*` accumulators only grow within
/// a tracking period - onboarding is the sole reset point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Gender, set by onboarding
    pub gender: Option<Gender>,
    /// Body weight (kg), set by onboarding
    pub weight_kg: Option<f64>,
    /// Height (cm), set by onboarding
    pub height_cm: Option<f64>,
    /// Age (years), set by onboarding
    pub age_years: Option<u32>,
    /// Weekly activity bucket, set by onboarding
    pub activity: Option<ActivityBucket>,
    /// City used as the weather lookup key
    pub city: Option<String>,
    /// Daily water goal (ml); raised by workout logging
    pub water_goal_ml: f64,
    /// Daily calorie goal (kcal)
    pub calorie_goal_kcal: f64,
    /// Water drunk today (ml)
    pub logged_water_ml: f64,
    /// Calories eaten today (kcal)
    pub logged_calories_kcal: f64,
    /// Calories burned by workouts today (kcal)
    pub burned_calories_kcal: f64,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            gender: None,
            weight_kg: None,
            height_cm: None,
            age_years: None,
            activity: None,
            city: None,
            water_goal_ml: defaults::WATER_GOAL_ML,
            calorie_goal_kcal: defaults::CALORIE_GOAL_KCAL,
            logged_water_ml: 0.0,
            logged_calories_kcal: 0.0,
            burned_calories_kcal: 0.0,
            updated_at: Utc::now(),
        }
    }
}

impl UserProfile {
    /// Whether every attribute required by the formulas is populated
    #[must_use]
    pub fn is_onboarded(&self) -> bool {
        self.gender.is_some()
            && self.weight_kg.is_some()
            && self.height_cm.is_some()
            && self.age_years.is_some()
            && self.activity.is_some()
            && self.city.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_label_parsing() {
        assert_eq!(Gender::from_label("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_label(" FEMALE "), Some(Gender::Female));
        assert_eq!(Gender::from_label("other"), None);
    }

    #[test]
    fn test_activity_bucket_table() {
        let expected = [
            ("1-2", 1.2),
            ("3-4", 1.375),
            ("5-6", 1.55),
            ("7-8", 1.725),
            ("9-10", 1.9),
        ];
        for (label, multiplier) in expected {
            let bucket = ActivityBucket::from_label(label).unwrap();
            assert_eq!(bucket.label(), label);
            assert!((bucket.multiplier() - multiplier).abs() < f64::EPSILON);
        }
        assert_eq!(ActivityBucket::from_label("11-12"), None);
    }

    #[test]
    fn test_workout_type_round_trip() {
        for workout in WorkoutType::ALL {
            assert_eq!(WorkoutType::from_label(workout.label()), Some(workout));
            assert!(workout.kcal_per_kg_min() > 0.0);
        }
        assert_eq!(WorkoutType::from_label("chess"), None);
    }

    #[test]
    fn test_default_profile_uses_documented_goals() {
        let profile = UserProfile::default();
        assert!(!profile.is_onboarded());
        assert!((profile.water_goal_ml - 2000.0).abs() < f64::EPSILON);
        assert!((profile.calorie_goal_kcal - 2000.0).abs() < f64::EPSILON);
        assert!(profile.logged_water_ml.abs() < f64::EPSILON);
    }
}
