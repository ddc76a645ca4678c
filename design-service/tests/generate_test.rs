mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{send_request, TestApp, TEST_USER_ID};
use design_service::models::Design;
use design_service::services::providers::mock::MockCompletionProvider;
use design_service::services::providers::MessagePart;
use serde_json::json;

#[tokio::test]
async fn empty_prompt_returns_400() {
    let app = TestApp::spawn();
    let design = app.seed_design(TEST_USER_ID, "Poster").await;

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": "", "id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "'prompt' is required in request body");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn non_string_prompt_returns_400() {
    let app = TestApp::spawn();
    let design = app.seed_design(TEST_USER_ID, "Poster").await;

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": 5, "id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "'prompt' is required in request body");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn object_prompt_returns_400() {
    let app = TestApp::spawn();
    let design = app.seed_design(TEST_USER_ID, "Poster").await;

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": {"text": "make it pop"}, "id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "'prompt' is required in request body");
}

#[tokio::test]
async fn missing_prompt_returns_400() {
    let app = TestApp::spawn();
    let design = app.seed_design(TEST_USER_ID, "Poster").await;

    let (status, _) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_design_returns_404() {
    let app = TestApp::spawn();

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": "make it pop", "id": "no-such-id"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Design not found! or you don't have permission to view it."
    );
}

#[tokio::test]
async fn missing_id_returns_404() {
    let app = TestApp::spawn();

    let (status, _) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": "make it pop"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_api_key_returns_500() {
    let app = TestApp::without_api_key();
    let design = app.seed_design(TEST_USER_ID, "Poster").await;

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": "make it pop", "id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server missing AI API key");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn regeneration_overwrites_canvas_data_with_raw_text() {
    let app = TestApp::with_provider(MockCompletionProvider::new("X"));

    let mut design = Design::new(
        TEST_USER_ID.into(),
        "Poster".into(),
        Some(json!({"objects": ["old"]})),
        Some(800.0),
        Some(600.0),
        None,
    );
    design.updated_at = Utc::now() - Duration::minutes(5);
    let before = design.updated_at;
    app.store.put(design.clone()).await;

    // No caller identity on purpose: this path applies no owner filter.
    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": "make it pop", "id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "successfully"}));

    let stored = app.store.get(&design.id).await.expect("design missing");
    assert_eq!(stored.canvas_data, Some(json!("X")));
    assert_eq!(stored.name, "Poster");
    assert_eq!(stored.width, Some(800.0));
    assert!(stored.updated_at > before);
}

#[tokio::test]
async fn regeneration_sends_design_and_prompt_to_provider() {
    let app = TestApp::spawn();
    let design = app.seed_design(TEST_USER_ID, "Poster").await;

    let (status, _) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": "add a headline", "id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let messages = app.provider.last_messages().expect("provider not called");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "system");
    assert_eq!(messages[1].role, "user");

    let user_text: String = messages[1]
        .content
        .iter()
        .map(|part| match part {
            MessagePart::Text { text } => text.as_str(),
        })
        .collect();
    assert!(user_text.contains(&design.id));
    assert!(user_text.contains("add a headline"));
}

#[tokio::test]
async fn provider_failure_returns_500_and_leaves_design_unchanged() {
    let app = TestApp::with_provider(MockCompletionProvider::failing("upstream timeout"));

    let mut design = Design::new(TEST_USER_ID.into(), "Poster".into(), None, None, None, None);
    design.canvas_data = Some(json!({"objects": ["old"]}));
    app.store.put(design.clone()).await;

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/designs/generate",
        None,
        Some(json!({"prompt": "make it pop", "id": design.id})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to generate AI response");

    let stored = app.store.get(&design.id).await.expect("design missing");
    assert_eq!(stored.canvas_data, Some(json!({"objects": ["old"]})));
}
