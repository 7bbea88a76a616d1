// ABOUTME: End-to-end onboarding tests driven through the engine over mock lookups
// ABOUTME: Covers goal derivation, validation re-prompts, aborts, and re-onboarding resets
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

mod common;

use std::sync::Arc;

use common::{engine_with, mock_foods, onboard_default_user, reply_text, test_engine};
use hydrocal::engine::{EnginePolicy, Reply};
use hydrocal::external::{MockTranslationProvider, MockWeatherProvider};

const CHAT: i64 = 1001;

#[tokio::test]
async fn onboarding_derives_goals_from_formula_and_weather() {
    let engine = test_engine();

    // 32 °C: hot tier, so water = 70*30 + 1000; calories = 1673.75 * 1.55
    let reply = onboard_default_user(&engine, CHAT).await;
    let text = reply_text(&reply);
    assert!(text.contains("3100"), "water goal missing: {text}");
    assert!(text.contains("2594"), "calorie goal missing: {text}");
    assert!(text.contains("Lisbon"));

    // Goals drive the progress summary immediately
    let reply = engine.handle_message(CHAT, "/check_progress").await;
    let text = reply_text(&reply);
    assert!(text.contains("0 of 3100"), "unexpected summary: {text}");
}

#[tokio::test]
async fn onboarding_asks_questions_in_strict_order() {
    let engine = test_engine();

    let reply = engine.handle_message(CHAT, "/set_profile").await;
    match reply {
        Reply::Choices { ref options, .. } => {
            assert_eq!(options, &["male".to_owned(), "female".to_owned()]);
        }
        Reply::Text(text) => panic!("expected gender keyboard, got text: {text}"),
    }

    let reply = engine.handle_message(CHAT, "female").await;
    assert!(reply_text(&reply).contains("weight"));
    let reply = engine.handle_message(CHAT, "62").await;
    assert!(reply_text(&reply).contains("height"));
    let reply = engine.handle_message(CHAT, "168").await;
    assert!(reply_text(&reply).contains("old"));
    let reply = engine.handle_message(CHAT, "31").await;
    assert!(reply_text(&reply).contains("active"));
}

#[tokio::test]
async fn invalid_step_input_reprompts_without_losing_progress() {
    let engine = test_engine();

    engine.handle_message(CHAT, "/set_profile").await;
    engine.handle_message(CHAT, "male").await;

    // Three bad weights in a row; the dialogue must stay on the weight step
    for bad in ["heavy", "-3", "0"] {
        let reply = engine.handle_message(CHAT, bad).await;
        assert!(reply_text(&reply).contains("Weight"), "input {bad:?}");
    }

    // Recovery continues from where we were, not from the beginning
    let reply = engine.handle_message(CHAT, "70").await;
    assert!(reply_text(&reply).contains("height"));
}

#[tokio::test]
async fn weather_failure_aborts_without_committing() {
    let engine = engine_with(
        Arc::new(MockWeatherProvider::failing()),
        None,
        Arc::new(mock_foods()),
        EnginePolicy::default(),
    );

    let reply = onboard_default_user(&engine, CHAT).await;
    let text = reply_text(&reply);
    assert!(text.contains("not saved"), "expected abort notice: {text}");
    assert!(!engine.has_active_dialogue(CHAT));

    // Nothing was committed: progress still shows the default goals
    let reply = engine.handle_message(CHAT, "/check_progress").await;
    assert!(reply_text(&reply).contains("of 2000 ml"));
}

#[tokio::test]
async fn city_translation_failure_aborts_when_policy_enabled() {
    let engine = engine_with(
        Arc::new(MockWeatherProvider::with_temperature(20.0)),
        Some(Arc::new(MockTranslationProvider::failing())),
        Arc::new(mock_foods()),
        EnginePolicy {
            translate_city: true,
        },
    );

    let reply = onboard_default_user(&engine, CHAT).await;
    assert!(reply_text(&reply).contains("not saved"));
}

#[tokio::test]
async fn untranslated_city_policy_ignores_broken_translator() {
    // Default policy: the translator is not consulted for cities, so a broken
    // one must not affect onboarding
    let engine = engine_with(
        Arc::new(MockWeatherProvider::with_temperature(20.0)),
        Some(Arc::new(MockTranslationProvider::failing())),
        Arc::new(mock_foods()),
        EnginePolicy::default(),
    );

    let reply = onboard_default_user(&engine, CHAT).await;
    // 20 °C: base tier, water = 70*30
    assert!(reply_text(&reply).contains("2100"));
}

#[tokio::test]
async fn repeated_onboarding_resets_accumulators() {
    let engine = test_engine();
    onboard_default_user(&engine, CHAT).await;

    engine.handle_message(CHAT, "/log_water").await;
    engine.handle_message(CHAT, "600").await;

    let reply = engine.handle_message(CHAT, "/check_progress").await;
    assert!(reply_text(&reply).contains("600 of 3100"));

    // Onboarding again wipes the daily ledger both times
    onboard_default_user(&engine, CHAT).await;
    let reply = engine.handle_message(CHAT, "/check_progress").await;
    assert!(reply_text(&reply).contains("0 of 3100"));
}
