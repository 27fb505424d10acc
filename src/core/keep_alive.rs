//! Periodic self-ping to keep free-tier hosting from idling the bot.
//!
//! Correctness does not depend on this task: a failed ping only means
//! the next webhook may hit a cold process.

use std::time::Duration;
use tokio::time::interval;

/// Default ping interval. Free hosting tiers idle processes after
/// 10-15 minutes without traffic.
pub const PING_INTERVAL_SECS: u64 = 300;

/// Spawn the keep-alive loop pinging `url` every `period`.
pub fn spawn(url: String, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut ticker = interval(period);
        // First tick fires immediately; skip it, the process is
        // obviously awake at startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match client.get(&url).send().await {
                Ok(response) => {
                    log::debug!("Keep-alive ping: {}", response.status());
                }
                Err(e) => {
                    log::debug!("Keep-alive ping failed: {}", e);
                }
            }
        }
    })
}
