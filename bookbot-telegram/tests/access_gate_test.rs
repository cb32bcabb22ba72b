//! Integration tests for [`bookbot_telegram::AccessGate`]: the teloxide bot is
//! pointed at a mockito server standing in for the Telegram Bot API, so the
//! membership query and the denial notice are exercised over HTTP.
//!
//! Paths must match teloxide requests: `/bot<token>/getChatMember`,
//! `/bot<token>/sendMessage`.

use bookbot_core::{Chat, Message, Middleware, User};
use bookbot_telegram::AccessGate;
use chrono::Utc;

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";
const CORPORATE_CHAT_ID: i64 = -100123456;

fn gate_against(server: &mockito::ServerGuard) -> AccessGate {
    let url = reqwest::Url::parse(&server.url()).expect("mock server url");
    let bot = teloxide::Bot::new(TEST_BOT_TOKEN).set_api_url(url);
    AccessGate::new(bot, CORPORATE_CHAT_ID)
}

fn message(user_id: i64, text: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: Some("reader".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat { id: user_id },
        content: text.to_string(),
        created_at: Utc::now(),
    }
}

/// Registers a getChatMember mock answering with the given status, for both
/// verbs so the test does not depend on how teloxide issues the request.
fn mock_membership(server: &mut mockito::ServerGuard, status: &str) -> (mockito::Mock, mockito::Mock) {
    let path = format!("/bot{}/getChatMember", TEST_BOT_TOKEN);
    let body = format!(
        r#"{{"ok": true, "result": {{"status": "{}", "user": {{"id": 42, "is_bot": false, "first_name": "Reader"}}}}}}"#,
        status
    );
    let post = server
        .mock("POST", path.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.clone())
        .create();
    let get = server
        .mock("GET", path.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create();
    (post, get)
}

fn mock_send_message(server: &mut mockito::ServerGuard) -> mockito::Mock {
    let path = format!("/bot{}/sendMessage", TEST_BOT_TOKEN);
    server
        .mock("POST", path.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "ok": true,
            "result": {
                "message_id": 1,
                "date": 1706529600,
                "chat": {"id": 42, "type": "private"},
                "from": {"id": 123456789, "is_bot": true, "first_name": "TestBot", "username": "testbot"},
                "text": "denied"
            }
        }"#,
        )
        .create()
}

/// **Test: A corporate-chat member passes the gate.**
#[tokio::test]
async fn member_is_allowed() {
    let mut server = mockito::Server::new_async().await;
    let _membership = mock_membership(&mut server, "member");
    let gate = gate_against(&server);

    let allowed = gate.before(&message(42, "find me a book")).await.unwrap();
    assert!(allowed);
}

/// **Test: A non-member is denied and gets the fixed notice.**
#[tokio::test]
async fn non_member_is_denied_with_notice() {
    let mut server = mockito::Server::new_async().await;
    let _membership = mock_membership(&mut server, "left");
    let send = mock_send_message(&mut server);
    let gate = gate_against(&server);

    let allowed = gate.before(&message(42, "find me a book")).await.unwrap();
    assert!(!allowed);
    send.assert_async().await;
}

/// **Test: A failing membership query denies, never allows.**
#[tokio::test]
async fn membership_query_error_denies() {
    let mut server = mockito::Server::new_async().await;
    let path = format!("/bot{}/getChatMember", TEST_BOT_TOKEN);
    let _post = server.mock("POST", path.as_str()).with_status(500).create();
    let _get = server.mock("GET", path.as_str()).with_status(500).create();
    let _send = mock_send_message(&mut server);
    let gate = gate_against(&server);

    let allowed = gate.before(&message(42, "find me a book")).await.unwrap();
    assert!(!allowed);
}

/// **Test: The help command is exempt from the membership check.**
///
/// No Telegram mocks are registered, so any membership query would fail and
/// deny; passing proves the gate short-circuits before calling out.
#[tokio::test]
async fn help_is_exempt_without_membership_query() {
    let server = mockito::Server::new_async().await;
    let gate = gate_against(&server);

    let allowed = gate.before(&message(42, "/help")).await.unwrap();
    assert!(allowed);
}
