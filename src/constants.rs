// ABOUTME: Application constants - default goals, validation limits, formula coefficients
// ABOUTME: Centralizes every magic number so formulas and validators share one source
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Application constants and configuration values

/// Default values applied before onboarding or when configuration is absent
pub mod defaults {
    /// Daily water goal for a profile that has not completed onboarding (ml)
    pub const WATER_GOAL_ML: f64 = 2000.0;

    /// Daily calorie goal for a profile that has not completed onboarding (kcal)
    pub const CALORIE_GOAL_KCAL: f64 = 2000.0;

    /// Body weight assumed for workout burn when no onboarding has happened (kg)
    pub const WEIGHT_KG: f64 = 70.0;

    /// Request timeout applied to all external lookup clients (seconds)
    pub const LOOKUP_TIMEOUT_SECS: u64 = 10;

    /// Telegram long-poll timeout (seconds)
    pub const POLL_TIMEOUT_SECS: u64 = 30;

    /// OpenWeatherMap API base URL
    pub const WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

    /// MyMemory translation API base URL
    pub const TRANSLATION_BASE_URL: &str = "https://api.mymemory.translated.net";

    /// OpenFoodFacts API base URL
    pub const NUTRITION_BASE_URL: &str = "https://world.openfoodfacts.org";

    /// Telegram Bot API base URL
    pub const TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

    /// Source language for translation lookups
    pub const TRANSLATION_SOURCE_LANG: &str = "ru";

    /// Target language for translation lookups
    pub const TRANSLATION_TARGET_LANG: &str = "en";
}

/// Plausibility limits for user-supplied attributes. Values outside these
/// bounds are rejected during validation, before any formula runs.
pub mod limits {
    /// Maximum accepted body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 300.0;

    /// Maximum accepted height (cm)
    pub const MAX_HEIGHT_CM: f64 = 250.0;

    /// Minimum accepted age (years)
    pub const MIN_AGE_YEARS: u32 = 1;

    /// Maximum accepted age (years)
    pub const MAX_AGE_YEARS: u32 = 120;

    /// Maximum accepted workout duration (minutes) - one full day
    pub const MAX_DURATION_MIN: u32 = 1440;

    /// Maximum accepted single water intake (ml)
    pub const MAX_WATER_INTAKE_ML: f64 = 10_000.0;

    /// Maximum accepted single food portion (g)
    pub const MAX_PORTION_G: f64 = 5_000.0;
}

/// Coefficients for the goal-computation formulas
pub mod formulas {
    /// Mifflin-St Jeor weight coefficient (kcal per kg)
    pub const BMR_WEIGHT_COEF: f64 = 10.0;

    /// Mifflin-St Jeor height coefficient (kcal per cm)
    pub const BMR_HEIGHT_COEF: f64 = 6.25;

    /// Mifflin-St Jeor age coefficient (kcal per year, subtracted)
    pub const BMR_AGE_COEF: f64 = 5.0;

    /// Mifflin-St Jeor male constant term
    pub const BMR_MALE_CONSTANT: f64 = 5.0;

    /// Mifflin-St Jeor female constant term
    pub const BMR_FEMALE_CONSTANT: f64 = -161.0;

    /// Base hydration requirement (ml per kg of body weight)
    pub const HYDRATION_ML_PER_KG: f64 = 30.0;

    /// Temperature at or above which the hot-weather surcharge applies (°C)
    pub const HOT_THRESHOLD_C: f64 = 30.0;

    /// Temperature at or above which the warm-weather surcharge applies (°C)
    pub const WARM_THRESHOLD_C: f64 = 25.0;

    /// Hot-weather hydration surcharge (ml)
    pub const HOT_SURCHARGE_ML: f64 = 1000.0;

    /// Warm-weather hydration surcharge (ml)
    pub const WARM_SURCHARGE_ML: f64 = 500.0;

    /// Extra hydration requirement per minute of exercise (ml)
    pub const WORKOUT_HYDRATION_ML_PER_MIN: f64 = 6.67;
}

/// Environment variable names read by [`crate::config::environment`]
pub mod env_names {
    /// Telegram bot token
    pub const TELEGRAM_BOT_TOKEN: &str = "HYDROCAL_BOT_TOKEN";

    /// Telegram Bot API base URL override
    pub const TELEGRAM_BASE_URL: &str = "HYDROCAL_TELEGRAM_BASE_URL";

    /// OpenWeatherMap API key
    pub const WEATHER_API_KEY: &str = "HYDROCAL_WEATHER_API_KEY";

    /// Weather API base URL override
    pub const WEATHER_BASE_URL: &str = "HYDROCAL_WEATHER_BASE_URL";

    /// Translation API base URL override
    pub const TRANSLATION_BASE_URL: &str = "HYDROCAL_TRANSLATION_BASE_URL";

    /// Translation language pair, e.g. `ru|en`
    pub const TRANSLATION_LANGPAIR: &str = "HYDROCAL_TRANSLATION_LANGPAIR";

    /// Disable the translation client entirely
    pub const TRANSLATION_DISABLED: &str = "HYDROCAL_TRANSLATION_DISABLED";

    /// Nutrition API base URL override
    pub const NUTRITION_BASE_URL: &str = "HYDROCAL_NUTRITION_BASE_URL";

    /// Route city names through translation before the weather lookup
    pub const TRANSLATE_CITY: &str = "HYDROCAL_TRANSLATE_CITY";

    /// Lookup timeout override (seconds)
    pub const LOOKUP_TIMEOUT_SECS: &str = "HYDROCAL_LOOKUP_TIMEOUT_SECS";

    /// Log level (falls back to `RUST_LOG`)
    pub const LOG_LEVEL: &str = "HYDROCAL_LOG_LEVEL";

    /// Log output format: `json`, `pretty`, or `compact`
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

/// Service identity used in logs
pub mod service_names {
    /// This service
    pub const HYDROCAL_BOT: &str = "hydrocal-bot";
}
