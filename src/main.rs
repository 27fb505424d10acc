use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;

use gamehub_bot::core::{config::Config, init_logger, keep_alive, web_server};
use gamehub_bot::storage::create_pool;
use gamehub_bot::telegram::{BotService, GameRegistry, TelegramClient};

/// Main entry point for the bot.
///
/// # Errors
/// Returns an error if initialization fails (logging, config,
/// database, server bind). Nothing past startup is fatal.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Config::from_env()?;

    init_logger(&config.log_file_path)?;

    let db = Arc::new(create_pool(&config.database_path)?);
    log::info!("Database ready at {}", config.database_path);

    let games = GameRegistry::new(
        config.fruit_catcher_url.clone(),
        config.endless_runner_url.clone(),
        config.card_matcher_url.clone(),
    );
    let api = TelegramClient::new(&config.bot_token);

    // One-shot webhook registration. A failure here means Telegram
    // keeps delivering to whatever URL was registered before, so warn
    // loudly but keep serving.
    match api.set_webhook(&config.webhook_url()).await {
        Ok(()) => log::info!("Webhook registered: {}", config.webhook_url()),
        Err(e) => log::warn!("Failed to register webhook: {}", e),
    }

    if config.keep_alive {
        let interval = Duration::from_secs(keep_alive::PING_INTERVAL_SECS);
        keep_alive::spawn(config.public_url.clone(), interval);
        log::info!("Keep-alive pinger enabled ({}s interval)", interval.as_secs());
    }

    let service = Arc::new(BotService::new(db, api, games));
    web_server::serve(config.port, service).await
}
