// ABOUTME: Configuration management - environment-only, no config files
// ABOUTME: Every deployment knob is an env var listed in constants::env_names
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration management

pub mod environment;

pub use environment::{BotConfig, LogLevel};
