//! Telegram Bot API integration: wire types, outbound client,
//! game registry, and the webhook event dispatcher.

pub mod api;
pub mod dispatcher;
pub mod games;
pub mod types;

// Re-exports for convenience
pub use api::{ApiError, CallOutcome, TelegramClient};
pub use dispatcher::{BotService, DispatchOutcome, ReplyAction};
pub use games::{GameDescriptor, GameRegistry};
pub use types::{InboundEvent, Update};
