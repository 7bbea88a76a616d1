// ABOUTME: OpenWeatherMap current-weather client for city temperature lookups
// ABOUTME: Metric units, conservative request timeout, mock twin for tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! OpenWeatherMap Client
//!
//! Fetches the current temperature for a city, which is the only weather
//! datum the goal computation needs. The free-tier endpoint is used:
//! `GET /data/2.5/weather?q={city}&appid={key}&units=metric`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::external::WeatherProvider;

const SERVICE: &str = "weather";

/// Weather API client configuration
#[derive(Debug, Clone)]
pub struct WeatherClientConfig {
    /// OpenWeatherMap API key
    pub api_key: String,
    /// Base URL (default: <https://api.openweathermap.org/data/2.5>)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for WeatherClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: defaults::WEATHER_BASE_URL.into(),
            timeout_secs: defaults::LOOKUP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

/// OpenWeatherMap API client
pub struct WeatherClient {
    config: WeatherClientConfig,
    http_client: reqwest::Client,
}

impl WeatherClient {
    /// Create a new weather client
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(config: WeatherClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config("failed to build weather HTTP client").with_source(e))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_temperature_c(&self, city: &str) -> AppResult<f64> {
        if city.trim().is_empty() {
            return Err(AppError::validation("City name cannot be empty"));
        }

        let url = format!("{}/weather", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", &self.config.api_key),
                ("units", "metric"),
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
                format!("HTTP {} for city {city:?}", response.status()),
            ));
        }

        let weather: WeatherResponse = response
            .json()
            .await
            .map_err(|e| AppError::lookup(SERVICE, format!("JSON parse error: {e}")))?;

        tracing::debug!(city = %city, temp_c = weather.main.temp, "Weather lookup succeeded");
        Ok(weather.main.temp)
    }
}

/// Mock weather provider for tests (no API calls)
#[derive(Debug, Clone)]
pub struct MockWeatherProvider {
    temperature_c: f64,
    fail: bool,
}

impl MockWeatherProvider {
    /// Always report the given temperature
    #[must_use]
    pub fn with_temperature(temperature_c: f64) -> Self {
        Self {
            temperature_c,
            fail: false,
        }
    }

    /// Always fail the lookup
    #[must_use]
    pub fn failing() -> Self {
        Self {
            temperature_c: 0.0,
            fail: true,
        }
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn current_temperature_c(&self, city: &str) -> AppResult<f64> {
        if self.fail {
            return Err(AppError::lookup(SERVICE, format!("HTTP 503 for city {city:?}")));
        }
        Ok(self.temperature_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_reports_configured_temperature() {
        let provider = MockWeatherProvider::with_temperature(32.0);
        let temp = provider.current_temperature_c("Lisbon").await.unwrap();
        assert!((temp - 32.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_mock_failure_is_recoverable() {
        let provider = MockWeatherProvider::failing();
        let err = provider.current_temperature_c("Lisbon").await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_empty_city_rejected_without_request() {
        let client = WeatherClient::new(WeatherClientConfig::default()).unwrap();
        assert!(client.current_temperature_c("  ").await.is_err());
    }
}
