//! Shared fixtures for integration tests.

// Each test binary compiles its own copy; not all of them use every helper.
#![allow(dead_code)]

use std::sync::Arc;

use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gamehub_bot::storage::create_pool;
use gamehub_bot::telegram::{BotService, GameRegistry, TelegramClient};
use gamehub_bot::DbPool;

pub const TEST_TOKEN: &str = "TESTTOKEN";

/// Service wired to a wiremock Telegram API and a scratch database.
/// The temp file must stay alive as long as the pool does.
pub fn test_service(api_base: &str) -> (NamedTempFile, Arc<DbPool>, Arc<BotService>) {
    let db_file = NamedTempFile::new().unwrap();
    let pool = Arc::new(create_pool(db_file.path().to_str().unwrap()).unwrap());

    let api = TelegramClient::with_base_url(api_base, TEST_TOKEN);
    let games = GameRegistry::new(
        "https://fruit.example/".to_string(),
        "https://runner.example/".to_string(),
        "https://cards.example/".to_string(),
    );

    let service = Arc::new(BotService::new(pool.clone(), api, games));
    (db_file, pool, service)
}

/// Mount a 200 `{"ok": true}` stub for one Bot API method.
pub async fn mock_api_ok(server: &MockServer, api_method: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/{}", TEST_TOKEN, api_method)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(server)
        .await;
}

/// Mount a failing stub for one Bot API method.
pub async fn mock_api_error(server: &MockServer, api_method: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/{}", TEST_TOKEN, api_method)))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            serde_json::json!({ "ok": false, "description": "Internal Server Error" }),
        ))
        .mount(server)
        .await;
}

/// JSON bodies of all requests the mock API received for `api_method`.
pub async fn requests_to(server: &MockServer, api_method: &str) -> Vec<serde_json::Value> {
    let wanted = format!("/bot{}/{}", TEST_TOKEN, api_method);
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == wanted)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
