// ABOUTME: End-to-end logging and progress tests - water, food, workouts, cancellation
// ABOUTME: Exercises default-goal fallbacks for users who never onboarded
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

mod common;

use std::sync::Arc;

use common::{engine_with, onboard_default_user, reply_text, test_engine};
use hydrocal::engine::EnginePolicy;
use hydrocal::external::{MockNutritionProvider, MockWeatherProvider};

const CHAT: i64 = 2002;

#[tokio::test]
async fn water_logging_before_onboarding_uses_default_goal() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/log_water").await;
    let reply = engine.handle_message(CHAT, "350").await;
    let text = reply_text(&reply);
    // Default goal 2000 ml: 2000 - 350 = 1650 remaining
    assert!(text.contains("350 of 2000"), "unexpected reply: {text}");
    assert!(text.contains("1650 ml to go"));
}

#[tokio::test]
async fn water_remaining_is_floored_at_zero() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/log_water").await;
    engine.handle_message(CHAT, "1900").await;
    engine.handle_message(CHAT, "/log_water").await;
    let reply = engine.handle_message(CHAT, "500").await;
    let text = reply_text(&reply);
    assert!(text.contains("2400 of 2000"));
    assert!(text.contains("0 ml to go"));
}

#[tokio::test]
async fn rejected_water_input_leaves_ledger_unchanged() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/log_water").await;
    let reply = engine.handle_message(CHAT, "-250").await;
    assert!(reply_text(&reply).contains("Amount"));

    // Still on the same step; a valid amount goes through now
    let reply = engine.handle_message(CHAT, "250").await;
    assert!(reply_text(&reply).contains("250 of 2000"));

    let reply = engine.handle_message(CHAT, "/check_progress").await;
    assert!(reply_text(&reply).contains("250 of 2000"));
}

#[tokio::test]
async fn food_logging_scales_energy_density_by_portion() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/log_food").await;
    let reply = engine.handle_message(CHAT, "banana").await;
    let text = reply_text(&reply);
    assert!(text.contains("89 kcal per 100 g"), "unexpected reply: {text}");
    assert!(text.contains("grams"));

    // 89 * 150 / 100 = 133.5 kcal
    let reply = engine.handle_message(CHAT, "150").await;
    let text = reply_text(&reply);
    assert!(text.contains("133.5 kcal"), "unexpected reply: {text}");
}

#[tokio::test]
async fn unknown_food_reprompts_first_step_without_logging() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/log_food").await;
    let reply = engine.handle_message(CHAT, "granite").await;
    assert!(reply_text(&reply).contains("What did you eat?"));

    // The dialogue is still on step one and recovers with a known food
    let reply = engine.handle_message(CHAT, "banana").await;
    assert!(reply_text(&reply).contains("89 kcal per 100 g"));
    engine.handle_message(CHAT, "100").await;

    let reply = engine.handle_message(CHAT, "/check_progress").await;
    let text = reply_text(&reply);
    assert!(text.contains("89 of 2000 kcal"), "unexpected summary: {text}");
}

#[tokio::test]
async fn workout_logs_burn_and_raises_water_goal() {
    let engine = test_engine();
    onboard_default_user(&engine, CHAT).await;

    engine.handle_message(CHAT, "/log_workout").await;
    let reply = engine.handle_message(CHAT, "running").await;
    assert!(reply_text(&reply).contains("minutes"));

    // burn = 0.17 * 70 * 30 = 357 kcal; extra water = 6.67 * 30 ≈ 200 ml
    let reply = engine.handle_message(CHAT, "30").await;
    let text = reply_text(&reply);
    assert!(text.contains("357 kcal"), "unexpected reply: {text}");
    assert!(text.contains("3300 ml"), "water goal not raised: {text}");

    let reply = engine.handle_message(CHAT, "/check_progress").await;
    let text = reply_text(&reply);
    assert!(text.contains("357 kcal burned"));
    assert!(text.contains("-357 kcal"));
}

#[tokio::test]
async fn workout_before_onboarding_falls_back_to_default_weight() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/log_workout").await;
    engine.handle_message(CHAT, "yoga").await;
    // 0.05 * 70 * 60 = 210 kcal with the documented default weight
    let reply = engine.handle_message(CHAT, "60").await;
    assert!(reply_text(&reply).contains("210 kcal"));
}

#[tokio::test]
async fn top_level_command_cancels_active_dialogue() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/set_profile").await;
    engine.handle_message(CHAT, "male").await;
    assert!(engine.has_active_dialogue(CHAT));

    // A command mid-dialogue cancels the onboarding outright
    let reply = engine.handle_message(CHAT, "/check_progress").await;
    assert!(reply_text(&reply).contains("Today so far"));
    assert!(!engine.has_active_dialogue(CHAT));

    // The next number is not treated as a weight answer
    let reply = engine.handle_message(CHAT, "70").await;
    assert!(reply_text(&reply).contains("/help"));
}

#[tokio::test]
async fn progress_report_is_idempotent() {
    let engine = engine_with(
        Arc::new(MockWeatherProvider::with_temperature(10.0)),
        None,
        Arc::new(MockNutritionProvider::with_foods(&[("banana", 89.0)])),
        EnginePolicy::default(),
    );
    onboard_default_user(&engine, CHAT).await;
    engine.handle_message(CHAT, "/log_water").await;
    engine.handle_message(CHAT, "500").await;

    let first = engine.handle_message(CHAT, "/check_progress").await;
    let second = engine.handle_message(CHAT, "/check_progress").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn help_lists_every_command() {
    let engine = test_engine();
    let reply = engine.handle_message(CHAT, "/help").await;
    let text = reply_text(&reply);
    for command in [
        "/set_profile",
        "/log_water",
        "/log_food",
        "/log_workout",
        "/check_progress",
    ] {
        assert!(text.contains(command), "missing {command}");
    }
}
