// ABOUTME: MyMemory translation client normalizing city and food names before lookups
// ABOUTME: Upstream status codes are embedded in the error message on non-success
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! MyMemory Translation Client
//!
//! Normalizes user-typed city and product names into the canonical lookup
//! language: `GET /get?q={text}&langpair={src}|{dst}`. MyMemory reports its
//! own status inside the JSON body (`responseStatus`), separate from the HTTP
//! status; both are checked.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::external::TranslationProvider;

const SERVICE: &str = "translation";

/// Translation API client configuration
#[derive(Debug, Clone)]
pub struct TranslationClientConfig {
    /// Base URL (default: <https://api.mymemory.translated.net>)
    pub base_url: String,
    /// Source language code (e.g. `ru`)
    pub source_lang: String,
    /// Target language code (e.g. `en`)
    pub target_lang: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TranslationClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::TRANSLATION_BASE_URL.into(),
            source_lang: defaults::TRANSLATION_SOURCE_LANG.into(),
            target_lang: defaults::TRANSLATION_TARGET_LANG.into(),
            timeout_secs: defaults::LOOKUP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
    // Number on success, sometimes a quoted string on quota errors
    #[serde(rename = "responseStatus")]
    response_status: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

fn status_as_i64(status: &Value) -> i64 {
    status
        .as_i64()
        .or_else(|| status.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

/// MyMemory translation API client
pub struct TranslationClient {
    config: TranslationClientConfig,
    http_client: reqwest::Client,
}

impl TranslationClient {
    /// Create a new translation client
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(config: TranslationClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::config("failed to build translation HTTP client").with_source(e)
            })?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl TranslationProvider for TranslationClient {
    async fn translate(&self, text: &str) -> AppResult<String> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Text to translate cannot be empty"));
        }

        let langpair = format!("{}|{}", self.config.source_lang, self.config.target_lang);
        let url = format!("{}/get", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", text), ("langpair", &langpair)])
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

        let translation: TranslationResponse = response
            .json()
            .await
            .map_err(|e| AppError::lookup(SERVICE, format!("JSON parse error: {e}")))?;

        let status = status_as_i64(&translation.response_status);
        if status != 200 {
            return Err(AppError::lookup(SERVICE, format!("status {status}")));
        }

        Ok(translation.response_data.translated_text)
    }
}

/// Mock translation provider for tests (no API calls)
#[derive(Debug, Clone, Default)]
pub struct MockTranslationProvider {
    mappings: Vec<(String, String)>,
    fail: bool,
}

impl MockTranslationProvider {
    /// Echo input back unchanged
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Translate via a fixed mapping table; unmatched input is echoed back
    #[must_use]
    pub fn with_mappings(mappings: &[(&str, &str)]) -> Self {
        Self {
            mappings: mappings
                .iter()
                .map(|(from, to)| ((*from).into(), (*to).into()))
                .collect(),
            fail: false,
        }
    }

    /// Always fail the lookup with an embedded status code
    #[must_use]
    pub fn failing() -> Self {
        Self {
            mappings: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl TranslationProvider for MockTranslationProvider {
    async fn translate(&self, text: &str) -> AppResult<String> {
        if self.fail {
            return Err(AppError::lookup(SERVICE, "status 429"));
        }
        Ok(self
            .mappings
            .iter()
            .find(|(from, _)| from == text)
            .map_or_else(|| text.into(), |(_, to)| to.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_accepts_number_and_string() {
        assert_eq!(status_as_i64(&Value::from(200)), 200);
        assert_eq!(status_as_i64(&Value::from("403")), 403);
        assert_eq!(status_as_i64(&Value::from("garbled")), 0);
    }

    #[tokio::test]
    async fn test_mock_mapping_and_fallthrough() {
        let provider = MockTranslationProvider::with_mappings(&[("гречка", "buckwheat")]);
        assert_eq!(provider.translate("гречка").await.unwrap(), "buckwheat");
        assert_eq!(provider.translate("banana").await.unwrap(), "banana");
    }

    #[tokio::test]
    async fn test_mock_failure_embeds_status() {
        let provider = MockTranslationProvider::failing();
        let err = provider.translate("anything").await.unwrap_err();
        assert!(err.message.contains("429"));
    }
}
