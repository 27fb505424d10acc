//! Webhook event routing.
//!
//! One [`InboundEvent`] in, zero or one reply action out. Routing is
//! best-effort by design: anything unroutable is logged and reported
//! as [`DispatchOutcome::Unhandled`], never an error, because Telegram
//! retries updates that are not acknowledged with 200 and a retry of
//! an unknown button press cannot go better than the first attempt.

use std::sync::Arc;

use crate::storage::db::{self, DbPool};
use crate::telegram::api::{CallOutcome, TelegramClient};
use crate::telegram::games::{GameDescriptor, GameRegistry};
use crate::telegram::types::InboundEvent;

pub const WELCOME_TEXT: &str = "Welcome to the game! Type /play to start playing.";
pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Type /start to begin.";
pub const NO_SCORES_TEXT: &str = "No scores available.";

/// Which reply action dispatch selected for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyAction {
    Welcome,
    UnknownCommand,
    ScoreBoard,
    /// Game card sent into a chat.
    GameInvite { slug: String },
    /// Single "game" result answering an inline query.
    InlineGameResult { slug: String },
    /// Callback answered with the game URL (inline-message context).
    LaunchUrl { slug: String },
    /// Callback answered with a toast (no chat to reply into).
    HelpToast,
}

/// What one dispatch call did, including the delivery result of the
/// chosen reply action. `Unhandled` is the logged no-op path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Replied {
        action: ReplyAction,
        delivery: CallOutcome,
    },
    Unhandled {
        reason: String,
    },
}

/// The bot's dependencies, explicitly constructed at startup and shared
/// across request handlers. No ambient globals.
pub struct BotService {
    db: Arc<DbPool>,
    api: TelegramClient,
    games: GameRegistry,
}

impl BotService {
    pub fn new(db: Arc<DbPool>, api: TelegramClient, games: GameRegistry) -> Self {
        Self { db, api, games }
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn db(&self) -> &Arc<DbPool> {
        &self.db
    }

    /// Route one event. Never returns an error; failures of the chosen
    /// reply action are carried in the outcome.
    pub async fn dispatch(&self, event: InboundEvent) -> DispatchOutcome {
        match event {
            InboundEvent::TextCommand { chat_id, text } => self.dispatch_text(chat_id, &text).await,
            InboundEvent::InlineQuery { query_id } => {
                let game = self.games.default_game();
                let delivery = self.api.answer_inline_query(&query_id, game).await;
                DispatchOutcome::Replied {
                    action: ReplyAction::InlineGameResult {
                        slug: game.slug.clone(),
                    },
                    delivery,
                }
            }
            InboundEvent::CallbackQuery {
                query_id,
                data,
                game_short_name,
                chat_id,
            } => {
                self.dispatch_callback(&query_id, data.as_deref(), game_short_name.as_deref(), chat_id)
                    .await
            }
        }
    }

    async fn dispatch_text(&self, chat_id: i64, text: &str) -> DispatchOutcome {
        match text {
            "/start" => DispatchOutcome::Replied {
                action: ReplyAction::Welcome,
                delivery: self.api.send_message(chat_id, WELCOME_TEXT).await,
            },
            "/play" => self.send_invite(chat_id, self.games.default_game()).await,
            "/score" => DispatchOutcome::Replied {
                action: ReplyAction::ScoreBoard,
                delivery: self.api.send_message(chat_id, &self.render_scoreboard()).await,
            },
            _ => DispatchOutcome::Replied {
                action: ReplyAction::UnknownCommand,
                delivery: self.api.send_message(chat_id, UNKNOWN_COMMAND_TEXT).await,
            },
        }
    }

    async fn dispatch_callback(
        &self,
        query_id: &str,
        data: Option<&str>,
        game_short_name: Option<&str>,
        chat_id: Option<i64>,
    ) -> DispatchOutcome {
        // Native launch button tap: no data, just the game short name.
        // Answer with the game URL so the client opens it.
        if let Some(short_name) = game_short_name {
            return match self.games.by_short_name(short_name) {
                Some(game) => self.answer_with_url(query_id, game).await,
                None => self.unhandled(format!("launch for unknown game {:?}", short_name)),
            };
        }

        match data {
            Some("help") => match chat_id {
                Some(chat_id) => DispatchOutcome::Replied {
                    action: ReplyAction::Welcome,
                    delivery: self.api.send_message(chat_id, WELCOME_TEXT).await,
                },
                None => DispatchOutcome::Replied {
                    action: ReplyAction::HelpToast,
                    delivery: self
                        .api
                        .answer_callback_query_with_text(query_id, WELCOME_TEXT)
                        .await,
                },
            },
            Some(data) => match self.games.by_callback_data(data) {
                Some(game) => match chat_id {
                    Some(chat_id) => self.send_invite(chat_id, game).await,
                    // Inline-message context: no chat to send a card
                    // into, open the game directly instead.
                    None => self.answer_with_url(query_id, game).await,
                },
                None => self.unhandled(format!("unknown callback data {:?}", data)),
            },
            None => self.unhandled("callback query without data".to_string()),
        }
    }

    async fn send_invite(&self, chat_id: i64, game: &GameDescriptor) -> DispatchOutcome {
        let keyboard = self.games.invite_keyboard(game);
        let delivery = self.api.send_game(chat_id, game, &keyboard).await;
        DispatchOutcome::Replied {
            action: ReplyAction::GameInvite {
                slug: game.slug.clone(),
            },
            delivery,
        }
    }

    async fn answer_with_url(&self, query_id: &str, game: &GameDescriptor) -> DispatchOutcome {
        let delivery = self
            .api
            .answer_callback_query_with_url(query_id, &game.url)
            .await;
        DispatchOutcome::Replied {
            action: ReplyAction::LaunchUrl {
                slug: game.slug.clone(),
            },
            delivery,
        }
    }

    fn unhandled(&self, reason: String) -> DispatchOutcome {
        log::warn!("Unhandled webhook event: {}", reason);
        DispatchOutcome::Unhandled { reason }
    }

    /// Render the top-10 list for `/score`. A failed read degrades to
    /// the empty-board text; `/score` must never take a chat down with
    /// a database problem.
    fn render_scoreboard(&self) -> String {
        let records = db::get_connection(&self.db)
            .map_err(anyhow::Error::from)
            .and_then(|conn| db::top_scores(&conn, 10).map_err(anyhow::Error::from));

        match records {
            Ok(records) if records.is_empty() => NO_SCORES_TEXT.to_string(),
            Ok(records) => {
                let mut board = String::from("Top 10 Scores:\n");
                for (rank, record) in records.iter().enumerate() {
                    board.push_str(&format!("{}. {}: {}\n", rank + 1, record.username, record.score));
                }
                board
            }
            Err(e) => {
                log::error!("Failed to read top scores: {}", e);
                NO_SCORES_TEXT.to_string()
            }
        }
    }

    /// Record a score submitted by one of the game web apps.
    pub fn record_score(&self, username: &str, score: i64) -> anyhow::Result<()> {
        let conn = db::get_connection(&self.db)?;
        db::record_score(&conn, username, score)?;
        Ok(())
    }
}
