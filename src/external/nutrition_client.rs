// ABOUTME: OpenFoodFacts product-search client for kcal-per-100g lookups
// ABOUTME: Scans matched products for the first usable energy value; mock twin for tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! OpenFoodFacts Client
//!
//! Resolves a (translated) food name to kilocalories per 100 g through the
//! legacy search endpoint:
//! `GET /cgi/search.pl?search_terms={food}&search_simple=1&action=process&json=1`.
//! Matched products without an `energy-kcal_100g` nutriment are skipped; an
//! empty or energy-less result set is a lookup failure, which the food
//! dialogue answers by re-prompting for another product name.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::external::NutritionProvider;

const SERVICE: &str = "nutrition";

/// Nutrition API client configuration
#[derive(Debug, Clone)]
pub struct NutritionClientConfig {
    /// Base URL (default: <https://world.openfoodfacts.org>)
    pub base_url: String,
    /// Number of products to scan for an energy value
    pub page_size: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NutritionClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::NUTRITION_BASE_URL.into(),
            page_size: 5,
            timeout_secs: defaults::LOOKUP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(default)]
    nutriments: Nutriments,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
}

/// OpenFoodFacts API client
pub struct NutritionClient {
    config: NutritionClientConfig,
    http_client: reqwest::Client,
}

impl NutritionClient {
    /// Create a new nutrition client
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(config: NutritionClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::config("failed to build nutrition HTTP client").with_source(e)
            })?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl NutritionProvider for NutritionClient {
    async fn calories_per_100g(&self, food_name: &str) -> AppResult<f64> {
        if food_name.trim().is_empty() {
            return Err(AppError::validation("Food name cannot be empty"));
        }

        let url = format!("{}/cgi/search.pl", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("search_terms", food_name),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", &self.config.page_size.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::lookup_timeout(SERVICE)
                } else {
                    AppError::lookup(SERVICE, e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(AppError::lookup(
                SERVICE,
                format!("HTTP {}", response.status()),
            ));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::lookup(SERVICE, format!("JSON parse error: {e}")))?;

        search
            .products
            .iter()
            .find_map(|product| product.nutriments.energy_kcal_100g)
            .filter(|kcal| kcal.is_finite() && *kcal >= 0.0)
            .ok_or_else(|| {
                AppError::lookup(SERVICE, format!("no energy data for {food_name:?}"))
            })
    }
}

/// Mock nutrition provider for tests (no API calls)
#[derive(Debug, Clone, Default)]
pub struct MockNutritionProvider {
    foods: Vec<(String, f64)>,
}

impl MockNutritionProvider {
    /// Build a mock with a fixed food table (kcal per 100 g)
    #[must_use]
    pub fn with_foods(foods: &[(&str, f64)]) -> Self {
        Self {
            foods: foods
                .iter()
                .map(|(name, kcal)| ((*name).into(), *kcal))
                .collect(),
        }
    }
}

#[async_trait]
impl NutritionProvider for MockNutritionProvider {
    async fn calories_per_100g(&self, food_name: &str) -> AppResult<f64> {
        self.foods
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(food_name))
            .map(|(_, kcal)| *kcal)
            .ok_or_else(|| AppError::lookup(SERVICE, format!("no energy data for {food_name:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_field_deserialization() {
        let body = r#"{"products":[{"nutriments":{}},{"nutriments":{"energy-kcal_100g":52.0}}]}"#;
        let search: SearchResponse = serde_json::from_str(body).unwrap();
        let kcal = search
            .products
            .iter()
            .find_map(|p| p.nutriments.energy_kcal_100g)
            .unwrap();
        assert!((kcal - 52.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_mock_lookup_and_miss() {
        let provider = MockNutritionProvider::with_foods(&[("banana", 89.0)]);
        assert!((provider.calories_per_100g("Banana").await.unwrap() - 89.0).abs() < f64::EPSILON);
        let err = provider.calories_per_100g("granite").await.unwrap_err();
        assert!(err.is_recoverable());
    }
}
