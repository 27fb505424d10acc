//! Outbound calls to the Telegram Bot API.
//!
//! Every reply action is a single POST to
//! `<base>/bot<token>/<method>` with a JSON body. Reply actions never
//! propagate provider errors to the dispatch path: a failed call is
//! logged and reported as a [`CallOutcome::Failed`], and the webhook
//! response to Telegram stays 200 regardless.

use serde_json::json;
use thiserror::Error;

use crate::telegram::games::GameDescriptor;
use crate::telegram::types::InlineKeyboardMarkup;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Telegram API returned status {status}: {description}")]
    Status {
        status: reqwest::StatusCode,
        description: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Result of one fire-and-forget reply action.
///
/// Failures carry the reason so tests and logs can inspect them, but
/// callers are not expected to retry or surface them upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Delivered,
    Failed(String),
}

impl CallOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, CallOutcome::Delivered)
    }
}

/// Thin client over the Bot API HTTP surface.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    /// `<base>/bot<token>`, no trailing slash.
    api_base: String,
}

impl TelegramClient {
    /// Client against the production Bot API.
    pub fn new(bot_token: &str) -> Self {
        Self::with_base_url("https://api.telegram.org", bot_token)
    }

    /// Client against an arbitrary API host. Used by tests to point at
    /// a mock server.
    pub fn with_base_url(base_url: &str, bot_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: format!("{}/bot{}", base_url.trim_end_matches('/'), bot_token),
        }
    }

    /// Plain text reply into a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> CallOutcome {
        self.fire(
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": text,
            }),
        )
        .await
    }

    /// Send a game card with its invite keyboard.
    pub async fn send_game(
        &self,
        chat_id: i64,
        game: &GameDescriptor,
        keyboard: &InlineKeyboardMarkup,
    ) -> CallOutcome {
        self.fire(
            "sendGame",
            json!({
                "chat_id": chat_id,
                "game_short_name": game.short_name,
                "reply_markup": keyboard,
            }),
        )
        .await
    }

    /// Answer an inline query with a single result of type "game".
    pub async fn answer_inline_query(&self, query_id: &str, game: &GameDescriptor) -> CallOutcome {
        self.fire(
            "answerInlineQuery",
            json!({
                "inline_query_id": query_id,
                "results": [{
                    "type": "game",
                    "id": game.slug,
                    "game_short_name": game.short_name,
                }],
            }),
        )
        .await
    }

    /// Acknowledge a callback query, opening `url` on the client.
    /// Used for game launches from inline-message context, where there
    /// is no chat to send a game card into.
    pub async fn answer_callback_query_with_url(&self, query_id: &str, url: &str) -> CallOutcome {
        self.fire(
            "answerCallbackQuery",
            json!({
                "callback_query_id": query_id,
                "url": url,
            }),
        )
        .await
    }

    /// Acknowledge a callback query with a short toast text.
    pub async fn answer_callback_query_with_text(&self, query_id: &str, text: &str) -> CallOutcome {
        self.fire(
            "answerCallbackQuery",
            json!({
                "callback_query_id": query_id,
                "text": text,
            }),
        )
        .await
    }

    /// Register the webhook URL with Telegram. One-shot startup call;
    /// unlike the reply actions the caller gets the error and decides.
    pub async fn set_webhook(&self, url: &str) -> Result<(), ApiError> {
        self.call("setWebhook", json!({ "url": url })).await
    }

    /// Fire-and-forget wrapper: log the failure, hand back a typed
    /// outcome, never an Err.
    async fn fire(&self, method: &str, body: serde_json::Value) -> CallOutcome {
        match self.call(method, body).await {
            Ok(()) => CallOutcome::Delivered,
            Err(e) => {
                log::error!("Telegram {} call failed: {}", method, e);
                CallOutcome::Failed(e.to_string())
            }
        }
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.api_base, method);
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Telegram puts the human-readable reason in "description".
            let description = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("description").and_then(|d| d.as_str()).map(String::from))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(ApiError::Status {
                status,
                description,
            });
        }

        Ok(())
    }
}
