//! Static registry of the supported games and their keyboards.
//!
//! The three games are static web apps registered with BotFather; the
//! bot only knows their short names, labels, and launch URLs. The
//! first registry entry is the default game for `/play` and inline
//! queries.

use crate::telegram::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// One provider-registered game. Static configuration, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescriptor {
    /// Short name registered with BotFather, e.g. "FruitCatcher".
    pub short_name: String,
    /// Human-readable label used on keyboard buttons.
    pub label: String,
    /// Callback data slug, e.g. "fruit_catcher" -> "play_fruit_catcher".
    pub slug: String,
    /// Where the game itself is hosted.
    pub url: String,
}

impl GameDescriptor {
    /// Callback data for this game's "switch to" button.
    pub fn callback_data(&self) -> String {
        format!("play_{}", self.slug)
    }
}

/// Ordered list of supported games. Order matters: the first entry is
/// the default game, and keyboard rotation follows registry order.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    games: Vec<GameDescriptor>,
}

impl GameRegistry {
    /// Build the standard three-game registry with the given launch URLs.
    pub fn new(fruit_catcher_url: String, endless_runner_url: String, card_matcher_url: String) -> Self {
        Self {
            games: vec![
                GameDescriptor {
                    short_name: "FruitCatcher".to_string(),
                    label: "Fruit Catcher".to_string(),
                    slug: "fruit_catcher".to_string(),
                    url: fruit_catcher_url,
                },
                GameDescriptor {
                    short_name: "EndlessRunner".to_string(),
                    label: "Endless Runner".to_string(),
                    slug: "endless_runner".to_string(),
                    url: endless_runner_url,
                },
                GameDescriptor {
                    short_name: "CardMatcher".to_string(),
                    label: "Card Matcher".to_string(),
                    slug: "card_matcher".to_string(),
                    url: card_matcher_url,
                },
            ],
        }
    }

    pub fn games(&self) -> &[GameDescriptor] {
        &self.games
    }

    /// The game `/play` and inline queries default to.
    pub fn default_game(&self) -> &GameDescriptor {
        &self.games[0]
    }

    /// Resolve `play_<slug>` callback data to a game.
    pub fn by_callback_data(&self, data: &str) -> Option<&GameDescriptor> {
        let slug = data.strip_prefix("play_")?;
        self.games.iter().find(|g| g.slug == slug)
    }

    /// Resolve a provider short name to a game.
    pub fn by_short_name(&self, short_name: &str) -> Option<&GameDescriptor> {
        self.games.iter().find(|g| g.short_name == short_name)
    }

    /// Build the invite keyboard for `game`.
    ///
    /// Pure function of the requested game: row 1 is the native launch
    /// button for `game`, then one "switch to" row per other game in
    /// registry order starting after `game` (wrapping), then Help.
    pub fn invite_keyboard(&self, game: &GameDescriptor) -> InlineKeyboardMarkup {
        let mut rows = vec![vec![InlineKeyboardButton::game_launch(format!(
            "Play {}",
            game.label
        ))]];

        let start = self
            .games
            .iter()
            .position(|g| g.slug == game.slug)
            .unwrap_or(0);
        for offset in 1..self.games.len() {
            let other = &self.games[(start + offset) % self.games.len()];
            rows.push(vec![InlineKeyboardButton::callback(
                format!("Play {}", other.label),
                other.callback_data(),
            )]);
        }

        rows.push(vec![InlineKeyboardButton::callback("Help", "help")]);
        InlineKeyboardMarkup {
            inline_keyboard: rows,
        }
    }
}
