// ABOUTME: Shared test utilities - engine builders over mock providers
// ABOUTME: No network and no Telegram; every flow is driven through handle_message
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(dead_code)]

//! Shared test utilities for `hydrocal`

use std::sync::{Arc, Once};

use hydrocal::engine::{CoachEngine, EnginePolicy, Reply};
use hydrocal::external::{
    MockNutritionProvider, MockTranslationProvider, MockWeatherProvider, NutritionProvider,
    TranslationProvider, WeatherProvider,
};
use hydrocal::storage::MemoryProfileStore;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Default food table used by the mock nutrition provider
pub fn mock_foods() -> MockNutritionProvider {
    MockNutritionProvider::with_foods(&[("banana", 89.0), ("buckwheat", 343.0), ("water", 0.0)])
}

/// Engine over mocks: 32 °C weather, identity translation, default policy
pub fn test_engine() -> CoachEngine {
    engine_with(
        Arc::new(MockWeatherProvider::with_temperature(32.0)),
        Some(Arc::new(MockTranslationProvider::identity())),
        Arc::new(mock_foods()),
        EnginePolicy::default(),
    )
}

/// Engine with explicit collaborators
pub fn engine_with(
    weather: Arc<dyn WeatherProvider>,
    translator: Option<Arc<dyn TranslationProvider>>,
    nutrition: Arc<dyn NutritionProvider>,
    policy: EnginePolicy,
) -> CoachEngine {
    init_test_logging();
    CoachEngine::new(
        Arc::new(MemoryProfileStore::new()),
        weather,
        translator,
        nutrition,
        policy,
    )
}

/// Unwrap a reply's text, whichever variant it is
pub fn reply_text(reply: &Reply) -> &str {
    match reply {
        Reply::Text(text) | Reply::Choices { text, .. } => text,
    }
}

/// Drive a full onboarding for `chat_id` with fixed attributes
/// (male, 70 kg, 175 cm, 25 y, "5-6", Lisbon)
pub async fn onboard_default_user(engine: &CoachEngine, chat_id: i64) -> Reply {
    engine.handle_message(chat_id, "/set_profile").await;
    engine.handle_message(chat_id, "male").await;
    engine.handle_message(chat_id, "70").await;
    engine.handle_message(chat_id, "175").await;
    engine.handle_message(chat_id, "25").await;
    engine.handle_message(chat_id, "5-6").await;
    engine.handle_message(chat_id, "Lisbon").await
}
