// ABOUTME: HydroCal bot binary - wires config, logging, clients, engine, and transport
// ABOUTME: Runs the Telegram long-poll loop until interrupted
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # HydroCal Bot Binary
//!
//! Starts the hydration and calorie coaching bot against the Telegram Bot
//! API. All configuration comes from environment variables; see
//! `hydrocal::constants::env_names`.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use hydrocal::config::BotConfig;
use hydrocal::engine::CoachEngine;
use hydrocal::external::{
    NutritionClient, NutritionProvider, TranslationClient, TranslationProvider, WeatherClient,
};
use hydrocal::logging;
use hydrocal::storage::MemoryProfileStore;
use hydrocal::transport::{self, TelegramClient};

#[derive(Parser)]
#[command(name = "hydrocal-bot")]
#[command(about = "HydroCal - conversational hydration and calorie coaching bot")]
struct Args {
    /// Route city names through translation before the weather lookup
    /// (overrides HYDROCAL_TRANSLATE_CITY)
    #[arg(long)]
    translate_city: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = BotConfig::from_env()?;
    if args.translate_city {
        config.policy.translate_city = true;
    }

    logging::init_from_env(config.log_level)?;
    info!("Starting HydroCal bot");
    info!("{}", config.summary());

    let store = Arc::new(MemoryProfileStore::new());
    let weather = Arc::new(WeatherClient::new(config.weather.clone())?);
    let translator: Option<Arc<dyn TranslationProvider>> = match config.translation.clone() {
        Some(translation_config) => Some(Arc::new(TranslationClient::new(translation_config)?)),
        None => None,
    };
    let nutrition: Arc<dyn NutritionProvider> =
        Arc::new(NutritionClient::new(config.nutrition.clone())?);

    let engine = CoachEngine::new(store, weather, translator, nutrition, config.policy);

    let telegram = TelegramClient::new(config.telegram.clone())?;
    info!("Polling for updates - press Ctrl-C to stop");

    tokio::select! {
        result = transport::run(&engine, &telegram) => {
            if let Err(err) = result {
                error!(error = %err, "Transport loop terminated");
                return Err(err.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, stopping");
        }
    }

    Ok(())
}
