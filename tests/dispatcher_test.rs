//! Dispatcher integration tests against a mocked Telegram API.
//!
//! Run with: cargo test --test dispatcher_test

mod common;

use pretty_assertions::assert_eq;
use wiremock::MockServer;

use common::{mock_api_error, mock_api_ok, requests_to, test_service};
use gamehub_bot::storage::{get_connection, record_score};
use gamehub_bot::telegram::api::CallOutcome;
use gamehub_bot::telegram::{DispatchOutcome, InboundEvent, ReplyAction};

fn text_command(text: &str) -> InboundEvent {
    InboundEvent::TextCommand {
        chat_id: 100,
        text: text.to_string(),
    }
}

fn callback(data: &str, chat_id: Option<i64>) -> InboundEvent {
    InboundEvent::CallbackQuery {
        query_id: "cb1".to_string(),
        data: Some(data.to_string()),
        game_short_name: None,
        chat_id,
    }
}

#[tokio::test]
async fn start_command_sends_welcome_text() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "sendMessage").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service.dispatch(text_command("/start")).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::Welcome,
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["chat_id"], 100);
    assert_eq!(
        sent[0]["text"],
        "Welcome to the game! Type /play to start playing."
    );
}

#[tokio::test]
async fn play_command_sends_default_game_invite() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "sendGame").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service.dispatch(text_command("/play")).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::GameInvite {
                slug: "fruit_catcher".to_string()
            },
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "sendGame").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["game_short_name"], "FruitCatcher");

    let keyboard = &sent[0]["reply_markup"]["inline_keyboard"];
    assert_eq!(keyboard.as_array().unwrap().len(), 4);
    // Launch row first, then switch rows in rotation order, then Help.
    assert_eq!(keyboard[0][0]["callback_game"], serde_json::json!({}));
    assert_eq!(keyboard[1][0]["callback_data"], "play_endless_runner");
    assert_eq!(keyboard[2][0]["callback_data"], "play_card_matcher");
    assert_eq!(keyboard[3][0]["callback_data"], "help");
}

#[tokio::test]
async fn unknown_command_never_selects_a_game_action() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "sendMessage").await;
    let (_db, _pool, service) = test_service(&server.uri());

    for text in ["/help", "/scores", "hello", "play", "/START"] {
        let outcome = service.dispatch(text_command(text)).await;
        assert_eq!(
            outcome,
            DispatchOutcome::Replied {
                action: ReplyAction::UnknownCommand,
                delivery: CallOutcome::Delivered,
            },
            "text {:?} must route to the unknown-command reply",
            text
        );
    }

    assert!(requests_to(&server, "sendGame").await.is_empty());
    let sent = requests_to(&server, "sendMessage").await;
    assert!(sent
        .iter()
        .all(|body| body["text"] == "Unknown command. Type /start to begin."));
}

#[tokio::test]
async fn score_command_renders_ranked_list() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "sendMessage").await;
    let (_db, pool, service) = test_service(&server.uri());

    {
        let conn = get_connection(&pool).unwrap();
        record_score(&conn, "alice", 10).unwrap();
        record_score(&conn, "bob", 30).unwrap();
        record_score(&conn, "carol", 20).unwrap();
    }

    let outcome = service.dispatch(text_command("/score")).await;
    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::ScoreBoard,
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "sendMessage").await;
    assert_eq!(
        sent[0]["text"],
        "Top 10 Scores:\n1. bob: 30\n2. carol: 20\n3. alice: 10\n"
    );
}

#[tokio::test]
async fn score_command_with_empty_store_reports_no_scores() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "sendMessage").await;
    let (_db, _pool, service) = test_service(&server.uri());

    service.dispatch(text_command("/score")).await;

    let sent = requests_to(&server, "sendMessage").await;
    assert_eq!(sent[0]["text"], "No scores available.");
}

#[tokio::test]
async fn inline_query_answers_with_default_game() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "answerInlineQuery").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service
        .dispatch(InboundEvent::InlineQuery {
            query_id: "q7".to_string(),
        })
        .await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::InlineGameResult {
                slug: "fruit_catcher".to_string()
            },
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "answerInlineQuery").await;
    assert_eq!(sent[0]["inline_query_id"], "q7");
    let results = sent[0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["type"], "game");
    assert_eq!(results[0]["game_short_name"], "FruitCatcher");
}

#[tokio::test]
async fn known_play_callback_sends_that_games_invite() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "sendGame").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service.dispatch(callback("play_card_matcher", Some(5))).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::GameInvite {
                slug: "card_matcher".to_string()
            },
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "sendGame").await;
    assert_eq!(sent[0]["chat_id"], 5);
    assert_eq!(sent[0]["game_short_name"], "CardMatcher");
}

#[tokio::test]
async fn unknown_play_callback_is_a_no_op() {
    let server = MockServer::start().await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service.dispatch(callback("play_tetris", Some(5))).await;

    assert!(matches!(outcome, DispatchOutcome::Unhandled { .. }));
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn help_callback_sends_welcome_into_chat() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "sendMessage").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service.dispatch(callback("help", Some(8))).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::Welcome,
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "sendMessage").await;
    assert_eq!(sent[0]["chat_id"], 8);
}

#[tokio::test]
async fn play_callback_from_inline_context_opens_game_url() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "answerCallbackQuery").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service.dispatch(callback("play_endless_runner", None)).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::LaunchUrl {
                slug: "endless_runner".to_string()
            },
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "answerCallbackQuery").await;
    assert_eq!(sent[0]["callback_query_id"], "cb1");
    assert_eq!(sent[0]["url"], "https://runner.example/");
}

#[tokio::test]
async fn game_launch_tap_answers_with_game_url() {
    let server = MockServer::start().await;
    mock_api_ok(&server, "answerCallbackQuery").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service
        .dispatch(InboundEvent::CallbackQuery {
            query_id: "cb9".to_string(),
            data: None,
            game_short_name: Some("CardMatcher".to_string()),
            chat_id: None,
        })
        .await;

    assert_eq!(
        outcome,
        DispatchOutcome::Replied {
            action: ReplyAction::LaunchUrl {
                slug: "card_matcher".to_string()
            },
            delivery: CallOutcome::Delivered,
        }
    );

    let sent = requests_to(&server, "answerCallbackQuery").await;
    assert_eq!(sent[0]["url"], "https://cards.example/");
}

#[tokio::test]
async fn provider_failure_is_reported_not_raised() {
    let server = MockServer::start().await;
    mock_api_error(&server, "sendMessage").await;
    let (_db, _pool, service) = test_service(&server.uri());

    let outcome = service.dispatch(text_command("/start")).await;

    match outcome {
        DispatchOutcome::Replied {
            action: ReplyAction::Welcome,
            delivery: CallOutcome::Failed(reason),
        } => assert!(reason.contains("500"), "reason should carry the status: {}", reason),
        other => panic!("expected a failed Welcome reply, got {:?}", other),
    }
}
