//! Environment-sourced configuration, validated once at startup.

use anyhow::{Context, Result};
use std::env;

/// Default launch URLs for the three games; each can be overridden per
/// deployment via its environment variable.
const DEFAULT_FRUIT_CATCHER_URL: &str = "https://fruit-catchers.vercel.app/";
const DEFAULT_ENDLESS_RUNNER_URL: &str = "https://endless-runner-rust.vercel.app/";
const DEFAULT_CARD_MATCHER_URL: &str = "https://card-matching-eight.vercel.app/";

/// Everything the bot needs from the environment.
///
/// `BOT_TOKEN` and `PUBLIC_URL` are required and have no defaults; the
/// token in particular must never ship embedded in the binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// BotFather token, e.g. "123456:ABC-...".
    pub bot_token: String,
    /// Externally reachable base URL, used for webhook registration
    /// and keep-alive pings.
    pub public_url: String,
    pub port: u16,
    pub database_path: String,
    pub log_file_path: String,
    pub fruit_catcher_url: String,
    pub endless_runner_url: String,
    pub card_matcher_url: String,
    /// Ping our own public URL periodically to keep free-tier hosting
    /// from idling the process. Off unless KEEP_ALIVE=1.
    pub keep_alive: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").context("BOT_TOKEN is not set")?;
        let public_url = env::var("PUBLIC_URL").context("PUBLIC_URL is not set")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {:?}", raw))?,
            Err(_) => 3000,
        };

        Ok(Self {
            bot_token,
            public_url: public_url.trim_end_matches('/').to_string(),
            port,
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "gamehub.sqlite".to_string()),
            log_file_path: env::var("LOG_FILE").unwrap_or_else(|_| "gamehub-bot.log".to_string()),
            fruit_catcher_url: env::var("FRUIT_CATCHER_URL")
                .unwrap_or_else(|_| DEFAULT_FRUIT_CATCHER_URL.to_string()),
            endless_runner_url: env::var("ENDLESS_RUNNER_URL")
                .unwrap_or_else(|_| DEFAULT_ENDLESS_RUNNER_URL.to_string()),
            card_matcher_url: env::var("CARD_MATCHER_URL")
                .unwrap_or_else(|_| DEFAULT_CARD_MATCHER_URL.to_string()),
            keep_alive: env::var("KEEP_ALIVE").map(|v| v == "1").unwrap_or(false),
        })
    }

    /// Full webhook URL registered with Telegram.
    pub fn webhook_url(&self) -> String {
        format!("{}/webhook", self.public_url)
    }
}
