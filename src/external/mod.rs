// ABOUTME: External API clients (weather, translation, nutrition) and their trait seams
// ABOUTME: The engine depends on the traits; reqwest-backed clients and mocks implement them
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External API Clients
//!
//! The three lookup collaborators the core consumes. Each is reachable through
//! a narrow request/response trait, with a reqwest-backed client and a mock
//! twin per module. All clients share the same failure contract: non-success
//! responses and timeouts surface as recoverable lookup errors, never panics.

pub mod nutrition_client;
pub mod translation_client;
pub mod weather_client;

pub use nutrition_client::{MockNutritionProvider, NutritionClient, NutritionClientConfig};
pub use translation_client::{MockTranslationProvider, TranslationClient, TranslationClientConfig};
pub use weather_client::{MockWeatherProvider, WeatherClient, WeatherClientConfig};

use async_trait::async_trait;

use crate::errors::AppResult;

/// Current-temperature lookup for a city name
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current temperature for `city` in degrees Celsius
    ///
    /// # Errors
    ///
    /// Returns a lookup error on non-success status, a missing field, or a
    /// timeout.
    async fn current_temperature_c(&self, city: &str) -> AppResult<f64>;
}

/// Text normalization into the canonical lookup language
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` using the provider's configured language pair
    ///
    /// # Errors
    ///
    /// Returns a lookup error embedding the upstream status code on
    /// non-success, or a timeout error.
    async fn translate(&self, text: &str) -> AppResult<String>;
}

/// Food-energy lookup by (translated) product name
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Kilocalories per 100 g for the best-matching product
    ///
    /// # Errors
    ///
    /// Returns a lookup error when no matching product exposes an energy
    /// value, on non-success status, or on timeout.
    async fn calories_per_100g(&self, food_name: &str) -> AppResult<f64>;
}
