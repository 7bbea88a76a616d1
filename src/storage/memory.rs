// ABOUTME: In-memory profile store backed by DashMap
// ABOUTME: Shard-level entry locking provides the per-key atomicity the spec requires
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! In-memory [`ProfileStore`] implementation
//!
//! `DashMap` holds one entry per chat id; every mutation goes through the
//! entry API while the shard lock is held, so concurrent conversations for
//! different users never observe a torn profile.

use chrono::Utc;
use dashmap::DashMap;

use crate::errors::{AppError, AppResult};
use crate::models::{LedgerField, OnboardingRecord, UserProfile};
use crate::storage::ProfileStore;

/// Process-lifetime profile table. No persistence: restarting the bot starts
/// every user from defaults, which matches the product's non-goals.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<i64, UserProfile>,
}

impl MemoryProfileStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profile has been created yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get_or_create(&self, chat_id: i64) -> UserProfile {
        self.profiles.entry(chat_id).or_default().clone()
    }

    fn commit_onboarding(&self, chat_id: i64, record: OnboardingRecord) -> UserProfile {
        let mut entry = self.profiles.entry(chat_id).or_default();
        let profile = entry.value_mut();
        profile.gender = Some(record.gender);
        profile.weight_kg = Some(record.weight_kg);
        profile.height_cm = Some(record.height_cm);
        profile.age_years = Some(record.age_years);
        profile.activity = Some(record.activity);
        profile.city = Some(record.city);
        profile.water_goal_ml = record.water_goal_ml;
        profile.calorie_goal_kcal = record.calorie_goal_kcal;
        // Onboarding is the only reset point for the daily ledger
        profile.logged_water_ml = 0.0;
        profile.logged_calories_kcal = 0.0;
        profile.burned_calories_kcal = 0.0;
        profile.updated_at = Utc::now();
        profile.clone()
    }

    fn apply_ledger_delta(
        &self,
        chat_id: i64,
        field: LedgerField,
        delta: f64,
    ) -> AppResult<UserProfile> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(AppError::invalid_argument(format!(
                "ledger delta must be strictly positive, got {delta}"
            )));
        }

        let mut entry = self.profiles.entry(chat_id).or_default();
        let profile = entry.value_mut();
        match field {
            LedgerField::LoggedWater => profile.logged_water_ml += delta,
            LedgerField::LoggedCalories => profile.logged_calories_kcal += delta,
            LedgerField::BurnedCalories => profile.burned_calories_kcal += delta,
            LedgerField::WaterGoal => profile.water_goal_ml += delta,
        }
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}
