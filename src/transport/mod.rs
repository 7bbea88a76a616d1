// ABOUTME: Chat transport layer - the only module that knows about Telegram
// ABOUTME: Contains no domain logic; feeds messages to the engine and renders replies
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Chat Transport
//!
//! The transport delivers one message at a time per conversation and renders
//! [`crate::engine::Reply`] values as text or one-shot reply keyboards. The
//! engine never imports from here.

pub mod telegram;

pub use telegram::{run, TelegramClient, TelegramClientConfig};
