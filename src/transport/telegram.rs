// ABOUTME: Minimal Telegram Bot API client - long polling plus message sending
// ABOUTME: Only the handful of fields the bot consumes are deserialized
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Telegram Bot API Client
//!
//! Long-polls `getUpdates` and dispatches each text message into the engine
//! sequentially, which is what guarantees the one-message-at-a-time-per-
//! conversation processing model the dialogues rely on. Choice prompts are
//! rendered as one-time reply keyboards.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::constants::defaults;
use crate::engine::{CoachEngine, Reply};
use crate::errors::{AppError, AppResult};

const SERVICE: &str = "telegram";

/// Telegram client configuration
#[derive(Debug, Clone)]
pub struct TelegramClientConfig {
    /// Bot token from `@BotFather`
    pub bot_token: String,
    /// API base URL (default: <https://api.telegram.org>)
    pub base_url: String,
    /// Long-poll timeout in seconds
    pub poll_timeout_secs: u64,
}

impl Default for TelegramClientConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            base_url: defaults::TELEGRAM_BASE_URL.into(),
            poll_timeout_secs: defaults::POLL_TIMEOUT_SECS,
        }
    }
}

/// One incoming update from `getUpdates`
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier, used as the next poll offset
    pub update_id: i64,
    /// The message payload, when the update is a message
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

/// An incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// Originating chat
    pub chat: Chat,
    /// Message text; absent for stickers, photos, etc.
    #[serde(default)]
    pub text: Option<String>,
}

/// Chat identity
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat identifier, used as the user key throughout the bot
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

/// Telegram Bot API client
pub struct TelegramClient {
    config: TelegramClientConfig,
    http_client: reqwest::Client,
}

impl TelegramClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(config: TelegramClientConfig) -> AppResult<Self> {
        // The request timeout must outlive the long poll itself
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs + 10))
            .build()
            .map_err(|e| AppError::config("failed to build telegram HTTP client").with_source(e))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.config.base_url, self.config.bot_token
        )
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> AppResult<T> {
        let response = self
            .http_client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("{method}: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::transport(format!(
                "{method}: HTTP {}",
                response.status()
            )));
        }

        let api: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::transport(format!("{method}: JSON parse error: {e}")))?;

        if !api.ok {
            return Err(AppError::transport(format!(
                "{method}: {}",
                api.description.unwrap_or_else(|| "unknown API error".into())
            )));
        }
        api.result
            .ok_or_else(|| AppError::transport(format!("{method}: empty result")))
    }

    /// Drop any configured webhook so long polling can receive updates
    ///
    /// # Errors
    ///
    /// Returns a transport error on API failure.
    pub async fn delete_webhook(&self) -> AppResult<()> {
        let _: bool = self.call("deleteWebhook", json!({})).await?;
        Ok(())
    }

    /// Long-poll for updates starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns a transport error on API failure.
    pub async fn get_updates(&self, offset: i64) -> AppResult<Vec<Update>> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": self.config.poll_timeout_secs,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    /// Send a reply, rendering choices as a one-time reply keyboard
    ///
    /// # Errors
    ///
    /// Returns a transport error on API failure.
    pub async fn send_reply(&self, chat_id: i64, reply: &Reply) -> AppResult<()> {
        let body = match reply {
            Reply::Text(text) => json!({
                "chat_id": chat_id,
                "text": text,
                "reply_markup": { "remove_keyboard": true },
            }),
            Reply::Choices { text, options } => {
                let keyboard: Vec<Vec<serde_json::Value>> = options
                    .iter()
                    .map(|option| vec![json!({ "text": option })])
                    .collect();
                json!({
                    "chat_id": chat_id,
                    "text": text,
                    "reply_markup": {
                        "keyboard": keyboard,
                        "one_time_keyboard": true,
                        "resize_keyboard": true,
                    },
                })
            }
        };
        let _: serde_json::Value = self.call("sendMessage", body).await?;
        Ok(())
    }
}

/// Long-poll loop: feed every text message into the engine and send back the
/// reply. Runs until the surrounding task is cancelled.
///
/// # Errors
///
/// Currently never returns; poll failures are logged and retried with backoff.
pub async fn run(engine: &CoachEngine, client: &TelegramClient) -> AppResult<()> {
    client.delete_webhook().await?;
    let mut offset = 0_i64;

    loop {
        let updates = match client.get_updates(offset).await {
            Ok(updates) => updates,
            Err(err) => {
                warn!(error = %err, "getUpdates failed; backing off");
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                debug!(chat_id = message.chat.id, "Ignoring non-text message");
                continue;
            };

            let reply = engine.handle_message(message.chat.id, &text).await;
            if let Err(err) = client.send_reply(message.chat.id, &reply).await {
                warn!(chat_id = message.chat.id, error = %err, "Failed to send reply");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserialization_tolerates_missing_fields() {
        let body = r#"{"update_id": 7, "message": {"chat": {"id": 42}}}"#;
        let update: Update = serde_json::from_str(body).unwrap();
        assert_eq!(update.update_id, 7);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert!(message.text.is_none());

        let bare = r#"{"update_id": 8}"#;
        let update: Update = serde_json::from_str(bare).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_method_url_embeds_token() {
        let client = TelegramClient::new(TelegramClientConfig {
            bot_token: "123:abc".into(),
            ..TelegramClientConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.method_url("getUpdates"),
            "https://api.telegram.org/bot123:abc/getUpdates"
        );
    }
}
