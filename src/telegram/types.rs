//! Wire types for the Telegram Bot API.
//!
//! Field names here must match the Bot API JSON exactly; serde renames
//! are deliberately absent so the struct fields double as the wire
//! contract.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound payloads (webhook)
// ---------------------------------------------------------------------------

/// Top-level webhook payload. Telegram sends exactly one of the three
/// optional branches per update; anything else is an update kind we do
/// not handle.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub message: Option<Message>,
    pub inline_query: Option<InlineQuery>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineQuery {
    pub id: String,
}

/// Fired when a user taps an inline keyboard button.
///
/// `message` is set when the button lived on a regular chat message;
/// for buttons on inline-mode results only `inline_message_id` is
/// present and there is no chat to reply into. A tap on the native
/// launch button of a game card carries `game_short_name` instead of
/// `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub data: Option<String>,
    pub message: Option<Message>,
    pub inline_message_id: Option<String>,
    pub game_short_name: Option<String>,
}

/// One webhook event reduced to the fields dispatch needs.
///
/// Transient: built from an [`Update`], consumed by one dispatch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    TextCommand {
        chat_id: i64,
        text: String,
    },
    InlineQuery {
        query_id: String,
    },
    CallbackQuery {
        query_id: String,
        data: Option<String>,
        game_short_name: Option<String>,
        /// Absent for callbacks raised from inline-mode messages.
        chat_id: Option<i64>,
    },
}

impl InboundEvent {
    /// Reduce a webhook [`Update`] to an event, or `None` if the update
    /// carries nothing we route on (no text on the message, or an
    /// update kind outside the three we recognize).
    pub fn from_update(update: Update) -> Option<Self> {
        if let Some(message) = update.message {
            let text = message.text?;
            return Some(InboundEvent::TextCommand {
                chat_id: message.chat.id,
                text,
            });
        }

        if let Some(query) = update.inline_query {
            return Some(InboundEvent::InlineQuery { query_id: query.id });
        }

        if let Some(callback) = update.callback_query {
            return Some(InboundEvent::CallbackQuery {
                query_id: callback.id,
                data: callback.data,
                game_short_name: callback.game_short_name,
                chat_id: callback.message.map(|m| m.chat.id),
            });
        }

        None
    }
}

// ---------------------------------------------------------------------------
// Outbound payloads (reply markup)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One inline keyboard button. Exactly one of the optional fields is
/// set; Telegram rejects buttons carrying several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_game: Option<CallbackGame>,
}

/// Placeholder object for the native game-launch button; serializes
/// to `{}` as the Bot API requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallbackGame {}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            callback_game: None,
        }
    }

    pub fn game_launch(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
            callback_game: Some(CallbackGame {}),
        }
    }
}
