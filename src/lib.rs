// ABOUTME: Library entry point for the HydroCal coaching bot
// ABOUTME: Domain logic lives here; the binary only wires config, logging, and transport
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # HydroCal
//!
//! A conversational hydration and calorie coach. The bot collects a user's
//! physiological profile through a guided dialogue, derives daily water and
//! calorie goals from the Mifflin-St Jeor formula combined with live weather
//! for the user's city, and tracks logged water, food, and workouts against
//! those goals.
//!
//! ## Architecture
//!
//! - **Intelligence**: pure goal-computation formulas
//! - **Storage**: per-user profile table behind a trait seam
//! - **Dialogues**: typed state machines for guided input
//! - **Engine**: command routing and collaborator orchestration
//! - **External**: weather / translation / nutrition lookup clients
//! - **Transport**: a thin Telegram long-polling loop
//!
//! The engine is transport-agnostic: `handle_message(chat_id, text)` returns
//! a [`engine::Reply`], so the whole conversation surface is testable without
//! a network.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hydrocal::engine::{CoachEngine, EnginePolicy};
//! use hydrocal::external::{MockNutritionProvider, MockTranslationProvider, MockWeatherProvider};
//! use hydrocal::storage::MemoryProfileStore;
//!
//! # async fn example() {
//! let engine = CoachEngine::new(
//!     Arc::new(MemoryProfileStore::new()),
//!     Arc::new(MockWeatherProvider::with_temperature(21.0)),
//!     Some(Arc::new(MockTranslationProvider::identity())),
//!     Arc::new(MockNutritionProvider::with_foods(&[("banana", 89.0)])),
//!     EnginePolicy::default(),
//! );
//! let reply = engine.handle_message(42, "/check_progress").await;
//! println!("{reply:?}");
//! # }
//! ```

/// Configuration management (environment-only)
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Guided-input dialogue state machines
pub mod dialogue;

/// Command routing and effect orchestration
pub mod engine;

/// Unified error handling system with standard error codes
pub mod errors;

/// External API clients (weather, translation, nutrition)
pub mod external;

/// Goal-computation formulas
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// Core data models
pub mod models;

/// Daily progress reporting
pub mod progress;

/// Profile storage abstraction and in-memory implementation
pub mod storage;

/// Telegram chat transport
pub mod transport;
