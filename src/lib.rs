//! gamehub-bot - Telegram message-routing layer for three static
//! web games (Fruit Catcher, Endless Runner, Card Matcher).
//!
//! # Module Structure
//!
//! - `core`: Configuration, logging, web server, keep-alive
//! - `storage`: Score persistence
//! - `telegram`: Bot API wire types, client, and dispatch

pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{build_router, Config};
pub use crate::storage::{create_pool, get_connection, DbConnection, DbPool, ScoreRecord};
pub use crate::telegram::{BotService, DispatchOutcome, GameRegistry, InboundEvent, TelegramClient};
