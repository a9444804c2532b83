//! `POST /api/chat` through the full router.

mod common;

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use common::{json_request, Script, TestApp};

#[tokio::test]
async fn test_anonymous_chat_returns_model_reply() {
    let app = TestApp::new(false).await;

    let (status, json) = app
        .send(json_request("POST", "/api/chat", r#"{"message":"What is Edge AI?"}"#, None))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "echo: What is Edge AI?");
    assert!(json.get("_debug").is_none());
    assert_eq!(app.cache.get_or_create("web-anon").await.turns.len(), 2);
}

#[tokio::test]
async fn test_anonymous_session_id_selects_cache_entry() {
    let app = TestApp::new(false).await;

    app.send(json_request(
        "POST",
        "/api/chat",
        r#"{"message":"hi","sessionId":"tab-9"}"#,
        None,
    ))
    .await;

    assert!(app.cache.contains("tab-9").await);
    assert!(!app.cache.contains("web-anon").await);
}

#[tokio::test]
async fn test_signed_in_chat_is_persisted() {
    let app = TestApp::new(false).await;
    let token = app.sign_in("42", "Ada", "a@x.com").await;

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/chat",
            r#"{"message":"hello","sessionId":"ignored"}"#,
            Some(&token),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "echo: hello");
    let rows = app.db.conversations().find_by_session("user-42").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].role, "user");
    assert_eq!(rows[1].role, "assistant");
    assert!(app.cache.is_empty().await);
}

#[tokio::test]
async fn test_debug_block_only_in_development_for_signed_in_users() {
    let app = TestApp::new(true).await;
    let token = app.sign_in("42", "Ada", "a@x.com").await;

    let (_, anonymous) = app
        .send(json_request("POST", "/api/chat", r#"{"message":"hi"}"#, None))
        .await;
    assert!(anonymous.get("_debug").is_none());

    let (_, signed_in) = app
        .send(json_request("POST", "/api/chat", r#"{"message":"hi"}"#, Some(&token)))
        .await;
    let debug = &signed_in["_debug"];
    assert_eq!(debug["sessionKey"], "user-42");
    assert_eq!(debug["historyLength"], 0);
    assert_eq!(debug["userContext"]["email"], "a@x.com");
    assert_eq!(debug["userContext"]["role"], "user");
    assert_eq!(debug["userContext"]["isAdmin"], false);
}

#[tokio::test]
async fn test_empty_message_is_bad_request() {
    let app = TestApp::new(false).await;

    let (status, json) = app
        .send(json_request("POST", "/api/chat", r#"{"message":"   "}"#, None))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reply"], "Please enter a message.");
    assert_eq!(app.llm.calls.load(Ordering::SeqCst), 0);
    assert!(app.cache.is_empty().await);
}

#[tokio::test]
async fn test_missing_message_field_is_bad_request() {
    let app = TestApp::new(false).await;

    let (status, json) = app
        .send(json_request("POST", "/api/chat", r#"{"sessionId":"x"}"#, None))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reply"], "Please enter a message.");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request_with_reply() {
    let app = TestApp::new(false).await;

    let (status, json) = app
        .send(json_request("POST", "/api/chat", "{not json", None))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reply"], "Please enter a message.");
}

#[tokio::test]
async fn test_completion_failure_is_success_with_apology() {
    let app = TestApp::new(false).await;
    app.script(Script::Fail);

    let (status, json) = app
        .send(json_request("POST", "/api/chat", r#"{"message":"hello"}"#, None))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "Sorry, something went wrong.");
    assert!(app.cache.get_or_create("web-anon").await.turns.is_empty());
}

#[tokio::test]
async fn test_panic_becomes_internal_error_with_reply() {
    let app = TestApp::new(false).await;
    app.script(Script::Panic);

    let (status, json) = app
        .send(json_request("POST", "/api/chat", r#"{"message":"boom"}"#, None))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["reply"],
        "Something went wrong. Please try again or contact hello@edge-ai.space."
    );
}

#[tokio::test]
async fn test_expired_session_is_treated_as_anonymous() {
    let app = TestApp::new(false).await;
    app.db.accounts().create_user("42", "Ada", "a@x.com").await.unwrap();
    let token = app
        .db
        .sessions()
        .create("42", chrono::Duration::seconds(-1))
        .await
        .unwrap();

    let (status, _) = app
        .send(json_request("POST", "/api/chat", r#"{"message":"hi"}"#, Some(&token)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.db.conversations().count().await.unwrap(), 0);
    assert!(app.cache.contains("web-anon").await);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(false).await;

    let (status, json) = app.send(common::get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "edge-server");
}

#[tokio::test]
async fn test_wildcard_cors_origin_is_a_router_error() {
    let app = TestApp::new(false).await;
    let state = common::app_state(&app.db, &app.cache, app.llm.clone(), false);

    let result = edge_server::build_router(state, &["*".to_string()]);

    assert!(result.is_err());
}
