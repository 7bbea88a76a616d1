// ABOUTME: Metabolic and hydration formulas - BMR, TDEE goal, water goal, workout burn
// ABOUTME: Pure and total over documented domains; out-of-domain inputs are rejected
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Metabolic Formula Library
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2).
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//! - `McArdle` et al. (2010) - Exercise Physiology (activity factor table).
//!
//! All functions are pure. Input validation lives here rather than in the
//! dialogue layer so a caller can never produce a negative or nonsensical
//! goal; a validation miss upstream surfaces as `InvalidArgument`, which is a
//! programming-error signal, not a user-facing case.
//!
//! Two lookups deliberately return `0.0` instead of failing: an unrecognized
//! activity bucket and an unrecognized workout label. Callers must treat a
//! zero result as a data-quality signal, never as a valid goal.

use crate::constants::{formulas, limits};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityBucket, Gender, WorkoutType};

fn check_weight(weight_kg: f64) -> AppResult<()> {
    if weight_kg <= 0.0 || weight_kg > limits::MAX_WEIGHT_KG || !weight_kg.is_finite() {
        return Err(AppError::invalid_argument(format!(
            "weight must be in (0, {}] kg, got {weight_kg}",
            limits::MAX_WEIGHT_KG
        )));
    }
    Ok(())
}

fn check_height(height_cm: f64) -> AppResult<()> {
    if height_cm <= 0.0 || height_cm > limits::MAX_HEIGHT_CM || !height_cm.is_finite() {
        return Err(AppError::invalid_argument(format!(
            "height must be in (0, {}] cm, got {height_cm}",
            limits::MAX_HEIGHT_CM
        )));
    }
    Ok(())
}

fn check_age(age_years: u32) -> AppResult<()> {
    if !(limits::MIN_AGE_YEARS..=limits::MAX_AGE_YEARS).contains(&age_years) {
        return Err(AppError::invalid_argument(format!(
            "age must be in [{}, {}] years, got {age_years}",
            limits::MIN_AGE_YEARS,
            limits::MAX_AGE_YEARS
        )));
    }
    Ok(())
}

fn check_duration(duration_min: u32) -> AppResult<()> {
    if duration_min == 0 || duration_min > limits::MAX_DURATION_MIN {
        return Err(AppError::invalid_argument(format!(
            "duration must be in [1, {}] minutes, got {duration_min}",
            limits::MAX_DURATION_MIN
        )));
    }
    Ok(())
}

/// Basal metabolic rate via the Mifflin-St Jeor equation (kcal/day)
///
/// `10·w + 6.25·h − 5·a`, plus `+5` for `Male` and `−161` for `Female`.
///
/// # Errors
///
/// Returns `InvalidArgument` for non-positive or implausible weight, height,
/// or age.
pub fn basal_metabolic_rate(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: Gender,
) -> AppResult<f64> {
    check_weight(weight_kg)?;
    check_height(height_cm)?;
    check_age(age_years)?;

    let constant = match gender {
        Gender::Male => formulas::BMR_MALE_CONSTANT,
        Gender::Female => formulas::BMR_FEMALE_CONSTANT,
    };

    Ok(formulas::BMR_WEIGHT_COEF * weight_kg + formulas::BMR_HEIGHT_COEF * height_cm
        - formulas::BMR_AGE_COEF * f64::from(age_years)
        + constant)
}

/// Activity factor for a bucket label; `0.0` for an unrecognized label
#[must_use]
pub fn activity_multiplier(bucket_label: &str) -> f64 {
    ActivityBucket::from_label(bucket_label).map_or(0.0, |bucket| bucket.multiplier())
}

/// Daily calorie goal: BMR scaled by the activity factor (kcal/day)
///
/// An unrecognized bucket label propagates a zero goal rather than failing.
///
/// # Errors
///
/// Returns `InvalidArgument` for out-of-domain weight, height, or age.
pub fn calorie_goal(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: Gender,
    bucket_label: &str,
) -> AppResult<f64> {
    let bmr = basal_metabolic_rate(weight_kg, height_cm, age_years, gender)?;
    Ok(bmr * activity_multiplier(bucket_label))
}

/// Daily hydration goal from body weight and ambient temperature (ml)
///
/// Tiers are evaluated highest-first, so a reading exactly at a threshold
/// takes the higher tier: `t ≥ 30 °C` adds 1000 ml, `t ≥ 25 °C` adds 500 ml
/// over the 30 ml/kg base.
///
/// # Errors
///
/// Returns `InvalidArgument` for out-of-domain weight.
pub fn hydration_goal(weight_kg: f64, temperature_c: f64) -> AppResult<f64> {
    check_weight(weight_kg)?;

    let base = weight_kg * formulas::HYDRATION_ML_PER_KG;
    let surcharge = if temperature_c >= formulas::HOT_THRESHOLD_C {
        formulas::HOT_SURCHARGE_ML
    } else if temperature_c >= formulas::WARM_THRESHOLD_C {
        formulas::WARM_SURCHARGE_ML
    } else {
        0.0
    };
    Ok(base + surcharge)
}

/// Energy burned by a workout (kcal): per-type coefficient x weight x minutes
///
/// An unrecognized workout label yields `0.0` (same zero-signal policy as
/// [`activity_multiplier`]).
///
/// # Errors
///
/// Returns `InvalidArgument` for out-of-domain weight or duration.
pub fn workout_energy_burned(
    weight_kg: f64,
    workout_label: &str,
    duration_min: u32,
) -> AppResult<f64> {
    check_weight(weight_kg)?;
    check_duration(duration_min)?;

    let coefficient =
        WorkoutType::from_label(workout_label).map_or(0.0, |workout| workout.kcal_per_kg_min());
    Ok(coefficient * weight_kg * f64::from(duration_min))
}

/// Extra hydration requirement from exercise (ml): `6.67 ml` per minute
///
/// # Errors
///
/// Returns `InvalidArgument` for a zero or implausible duration.
pub fn extra_hydration_for_workout(duration_min: u32) -> AppResult<f64> {
    check_duration(duration_min)?;
    Ok(formulas::WORKOUT_HYDRATION_ML_PER_MIN * f64::from(duration_min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_bmr_gender_constant_term() {
        let male = basal_metabolic_rate(70.0, 175.0, 25, Gender::Male).unwrap();
        let female = basal_metabolic_rate(70.0, 175.0, 25, Gender::Female).unwrap();
        assert!((male - 1673.75).abs() < f64::EPSILON);
        // Only the constant term differs between genders: 5 - (-161) = 166
        assert!((male - female - 166.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmr_linear_in_each_input() {
        let base = basal_metabolic_rate(70.0, 175.0, 25, Gender::Male).unwrap();
        let heavier = basal_metabolic_rate(71.0, 175.0, 25, Gender::Male).unwrap();
        let taller = basal_metabolic_rate(70.0, 176.0, 25, Gender::Male).unwrap();
        let older = basal_metabolic_rate(70.0, 175.0, 26, Gender::Male).unwrap();
        assert!((heavier - base - 10.0).abs() < 1e-9);
        assert!((taller - base - 6.25).abs() < 1e-9);
        assert!((older - base + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_rejects_out_of_domain() {
        assert!(basal_metabolic_rate(0.0, 175.0, 25, Gender::Male).is_err());
        assert!(basal_metabolic_rate(-70.0, 175.0, 25, Gender::Male).is_err());
        assert!(basal_metabolic_rate(70.0, 0.0, 25, Gender::Male).is_err());
        assert!(basal_metabolic_rate(70.0, 175.0, 0, Gender::Male).is_err());
        let err = basal_metabolic_rate(70.0, 175.0, 200, Gender::Male).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_hydration_goal_tier_boundaries() {
        // Exactly at a threshold the higher tier wins
        assert!((hydration_goal(70.0, 30.0).unwrap() - 3100.0).abs() < f64::EPSILON);
        assert!((hydration_goal(70.0, 29.9).unwrap() - 2600.0).abs() < f64::EPSILON);
        assert!((hydration_goal(70.0, 25.0).unwrap() - 2600.0).abs() < f64::EPSILON);
        assert!((hydration_goal(70.0, 24.9).unwrap() - 2100.0).abs() < f64::EPSILON);
        assert!((hydration_goal(70.0, -10.0).unwrap() - 2100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calorie_goal_exact_formula() {
        let goal = calorie_goal(70.0, 175.0, 25, Gender::Male, "5-6").unwrap();
        assert!((goal - (10.0 * 70.0 + 6.25 * 175.0 - 5.0 * 25.0 + 5.0) * 1.55).abs() < 1e-9);
        assert!((goal - 2594.3125).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_bucket_propagates_zero_goal() {
        assert!(activity_multiplier("0-0").abs() < f64::EPSILON);
        let goal = calorie_goal(70.0, 175.0, 25, Gender::Male, "0-0").unwrap();
        assert!(goal.abs() < f64::EPSILON);
    }

    #[test]
    fn test_workout_energy_burned() {
        let burned = workout_energy_burned(70.0, "running", 30).unwrap();
        assert!((burned - 0.17 * 70.0 * 30.0).abs() < 1e-9);
        // Unknown workout type is a zero-signal, not an error
        let unknown = workout_energy_burned(70.0, "chess", 30).unwrap();
        assert!(unknown.abs() < f64::EPSILON);
        assert!(workout_energy_burned(70.0, "running", 0).is_err());
    }

    #[test]
    fn test_extra_hydration_linear_rule() {
        assert!((extra_hydration_for_workout(30).unwrap() - 200.1).abs() < 1e-9);
        assert!((extra_hydration_for_workout(1).unwrap() - 6.67).abs() < 1e-9);
        assert!(extra_hydration_for_workout(0).is_err());
    }
}
