//! HTTP surface: health check, Telegram webhook, score submission.
//!
//! The webhook handler is a catch-all boundary. Telegram delivers
//! updates at-least-once and retries anything not acknowledged with
//! 200, so every path through `/webhook` ends in a 200, including
//! malformed bodies and failed outbound calls.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::telegram::types::{InboundEvent, Update};
use crate::telegram::BotService;

/// Shared state for the web server.
#[derive(Clone)]
struct WebState {
    service: Arc<BotService>,
}

/// Score submission body posted by the game web apps.
#[derive(Debug, Deserialize)]
struct ScoreSubmission {
    username: String,
    score: i64,
}

/// Build the router. Split out from [`serve`] so tests can drive it
/// without binding a socket.
pub fn build_router(service: Arc<BotService>) -> Router {
    let state = WebState { service };

    Router::new()
        .route("/", get(root_handler))
        .route("/webhook", post(webhook_handler))
        .route("/score", post(score_handler))
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(port: u16, service: Arc<BotService>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = build_router(service);

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /         - Health check");
    log::info!("  /webhook  - Telegram webhook (POST)");
    log::info!("  /score    - Score submission (POST)");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET / — static liveness text.
async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, "Server is running")
}

/// POST /webhook — parse, dispatch, acknowledge. Always 200.
async fn webhook_handler(State(state): State<WebState>, body: String) -> StatusCode {
    let update: Update = match serde_json::from_str(&body) {
        Ok(update) => update,
        Err(e) => {
            log::warn!("Ignoring unparseable webhook payload: {}", e);
            return StatusCode::OK;
        }
    };

    match InboundEvent::from_update(update) {
        Some(event) => {
            let outcome = state.service.dispatch(event).await;
            log::debug!("Dispatched webhook event: {:?}", outcome);
        }
        None => {
            log::debug!("Webhook payload carried no routable event");
        }
    }

    StatusCode::OK
}

/// POST /score — record a score from one of the games.
///
/// Malformed bodies get 400 so a broken game client notices; a storage
/// failure is logged and still acknowledged, matching the webhook's
/// containment policy.
async fn score_handler(State(state): State<WebState>, body: String) -> StatusCode {
    let submission: ScoreSubmission = match serde_json::from_str(&body) {
        Ok(submission) => submission,
        Err(e) => {
            log::warn!("Rejecting malformed score submission: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    if let Err(e) = state
        .service
        .record_score(&submission.username, submission.score)
    {
        log::error!(
            "Failed to record score {} for {}: {}",
            submission.score,
            submission.username,
            e
        );
    }

    StatusCode::OK
}
