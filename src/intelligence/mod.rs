// ABOUTME: Goal-computation intelligence - metabolic and hydration formulas
// ABOUTME: Pure arithmetic only; no state, no I/O
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Goal-Computation Intelligence
//!
//! Pure functions turning validated profile attributes (and an external
//! temperature reading) into daily goals and per-activity burn figures.

pub mod metabolics;

pub use metabolics::{
    activity_multiplier, basal_metabolic_rate, calorie_goal, extra_hydration_for_workout,
    hydration_goal, workout_energy_burned,
};
