// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses env vars into typed config sections with a redacted startup summary
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management
//!
//! The bot is configured exclusively through environment variables (names in
//! [`crate::constants::env_names`]). Two are required: the Telegram bot token
//! and the weather API key. Everything else has working defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::constants::{defaults, env_names};
use crate::engine::EnginePolicy;
use crate::external::{NutritionClientConfig, TranslationClientConfig, WeatherClientConfig};
use crate::transport::TelegramClientConfig;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default level
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }

    /// Directive string for `EnvFilter`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Telegram transport settings
    pub telegram: TelegramClientConfig,
    /// Weather lookup settings
    pub weather: WeatherClientConfig,
    /// Translation settings; `None` disables translation entirely
    pub translation: Option<TranslationClientConfig>,
    /// Nutrition lookup settings
    pub nutrition: NutritionClientConfig,
    /// Behavior policies
    pub policy: EnginePolicy,
}

fn env_or(name: &str, fallback: &str) -> String {
    env::var(name).unwrap_or_else(|_| fallback.into())
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

impl BotConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Fails when a required variable (bot token, weather API key) is unset
    /// or when an override cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var(env_names::TELEGRAM_BOT_TOKEN)
            .with_context(|| format!("{} must be set", env_names::TELEGRAM_BOT_TOKEN))?;
        let weather_api_key = env::var(env_names::WEATHER_API_KEY)
            .with_context(|| format!("{} must be set", env_names::WEATHER_API_KEY))?;

        let timeout_secs = match env::var(env_names::LOOKUP_TIMEOUT_SECS) {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("{} must be an integer", env_names::LOOKUP_TIMEOUT_SECS))?,
            Err(_) => defaults::LOOKUP_TIMEOUT_SECS,
        };

        let translation = if env_flag(env_names::TRANSLATION_DISABLED) {
            None
        } else {
            let langpair = env_or(
                env_names::TRANSLATION_LANGPAIR,
                &format!(
                    "{}|{}",
                    defaults::TRANSLATION_SOURCE_LANG,
                    defaults::TRANSLATION_TARGET_LANG
                ),
            );
            let (source_lang, target_lang) = langpair.split_once('|').with_context(|| {
                format!(
                    "{} must look like 'ru|en'",
                    env_names::TRANSLATION_LANGPAIR
                )
            })?;
            Some(TranslationClientConfig {
                base_url: env_or(
                    env_names::TRANSLATION_BASE_URL,
                    defaults::TRANSLATION_BASE_URL,
                ),
                source_lang: source_lang.into(),
                target_lang: target_lang.into(),
                timeout_secs,
            })
        };

        let policy = EnginePolicy {
            translate_city: env_flag(env_names::TRANSLATE_CITY),
        };
        if policy.translate_city && translation.is_none() {
            warn!(
                "{} is set but translation is disabled; city names will be sent untranslated",
                env_names::TRANSLATE_CITY
            );
        }

        let log_level = env::var(env_names::LOG_LEVEL)
            .or_else(|_| env::var("RUST_LOG"))
            .map(|raw| LogLevel::from_str_or_default(&raw))
            .unwrap_or_default();

        Ok(Self {
            log_level,
            telegram: TelegramClientConfig {
                bot_token,
                base_url: env_or(env_names::TELEGRAM_BASE_URL, defaults::TELEGRAM_BASE_URL),
                poll_timeout_secs: defaults::POLL_TIMEOUT_SECS,
            },
            weather: WeatherClientConfig {
                api_key: weather_api_key,
                base_url: env_or(env_names::WEATHER_BASE_URL, defaults::WEATHER_BASE_URL),
                timeout_secs,
            },
            translation,
            nutrition: NutritionClientConfig {
                base_url: env_or(env_names::NUTRITION_BASE_URL, defaults::NUTRITION_BASE_URL),
                timeout_secs,
                ..NutritionClientConfig::default()
            },
            policy,
        })
    }

    /// One-line startup summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "log_level={} weather={} translation={} translate_city={} nutrition={}",
            self.log_level,
            self.weather.base_url,
            self.translation
                .as_ref()
                .map_or_else(|| "disabled".into(), |t| format!(
                    "{}|{}",
                    t.source_lang, t.target_lang
                )),
            self.policy.translate_city,
            self.nutrition.base_url,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
    }

    #[test]
    fn test_summary_never_contains_secrets() {
        let config = BotConfig {
            log_level: LogLevel::Info,
            telegram: TelegramClientConfig {
                bot_token: "123:secret-token".into(),
                ..TelegramClientConfig::default()
            },
            weather: WeatherClientConfig {
                api_key: "secret-key".into(),
                ..WeatherClientConfig::default()
            },
            translation: Some(TranslationClientConfig::default()),
            nutrition: NutritionClientConfig::default(),
            policy: EnginePolicy::default(),
        };
        let summary = config.summary();
        assert!(!summary.contains("secret"));
        assert!(summary.contains("ru|en"));
    }
}
