mod common;

use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use sqlx::Row;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/register")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "password": "pass_word!",
            "language": "fa"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["language"], "fa");
    assert_eq!(body["data"]["token_type"], "bearer");

    let token = body["data"]["access_token"].as_str().unwrap();
    let claims = app.token_service.verify(token).expect("Token must verify");
    assert_eq!(claims.sub, "nicola");
}

#[tokio::test]
async fn test_register_defaults_language_to_english() {
    let app = TestApp::spawn().await;

    let body = app.register("nicola", "pass_word!").await;

    assert_eq!(body["data"]["language"], "en");
}

#[tokio::test]
async fn test_register_stores_bcrypt_hash() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let row = sqlx::query("SELECT password_hash FROM users WHERE username = ?")
        .bind("nicola")
        .fetch_one(&app.pool)
        .await
        .expect("User row must exist");
    let hash: String = row.get("password_hash");
    assert!(hash.starts_with("$2b$04$"));
    assert!(!hash.contains("pass_word!"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let response = app
        .post("/api/register")
        .json(&json!({
            "username": "nicola",
            "email": "other@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Username already registered");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let response = app
        .post("/api/register")
        .json(&json!({
            "username": "nicola2",
            "email": "nicola@example.com",
            "password": "pass_word!2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email already registered");
}

#[tokio::test]
async fn test_register_invalid_input() {
    let app = TestApp::spawn().await;

    for (body, fragment) in [
        (
            json!({"username": "n", "email": "n@example.com", "password": "pw"}),
            "minimum 3 characters",
        ),
        (
            json!({"username": "nicola", "email": "not-an-email", "password": "pw"}),
            "email",
        ),
        (
            json!({"username": "nicola", "email": "n@example.com", "password": "pw", "language": "de"}),
            "language",
        ),
    ] {
        let response = app
            .post("/api/register")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains(fragment));
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    app.register("nicola", "correct horse battery staple").await;

    let response = app
        .post("/api/login")
        .json(&json!({
            "username": "nicola",
            "password": "correct horse battery staple"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["token_type"], "bearer");

    let claims = app
        .token_service
        .verify(body["data"]["access_token"].as_str().unwrap())
        .expect("Token must verify");
    assert_eq!(claims.exp - claims.iat.unwrap(), 30 * 60);
}

#[tokio::test]
async fn test_login_with_long_password() {
    let app = TestApp::spawn().await;
    let password = "x".repeat(100);

    app.register("nicola", &password).await;

    let response = app
        .post("/api/login")
        .json(&json!({ "username": "nicola", "password": password }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Same 72-byte prefix, different tail
    let response = app
        .post("/api/login")
        .json(&json!({ "username": "nicola", "password": "x".repeat(99) + "y" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.register("nicola", "Correct_Password!").await;

    let wrong_password = app
        .post("/api/login")
        .json(&json!({
            "username": "nicola",
            "password": "Wrong_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_user = app
        .post("/api/login")
        .json(&json!({
            "username": "nonexistent",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(
        wrong_password["data"]["message"],
        "Incorrect username or password"
    );
}

#[tokio::test]
async fn test_current_user_with_bearer_header() {
    let app = TestApp::spawn().await;

    let registered = app.register("nicola", "pass_word!").await;
    let token = registered["data"]["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/user/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["language"], "en");
    assert!(body["data"]["id"].is_i64());
}

#[tokio::test]
async fn test_current_user_with_lowercase_scheme() {
    let app = TestApp::spawn().await;

    let registered = app.register("nicola", "pass_word!").await;
    let token = registered["data"]["access_token"].as_str().unwrap();

    for scheme in ["bearer", "BEARER"] {
        let response = app
            .get("/api/user/me")
            .header(
                reqwest::header::AUTHORIZATION,
                format!("{} {}", scheme, token),
            )
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_current_user_with_other_scheme() {
    let app = TestApp::spawn().await;

    let registered = app.register("nicola", "pass_word!").await;
    let token = registered["data"]["access_token"].as_str().unwrap();

    let response = app
        .get("/api/user/me")
        .header(reqwest::header::AUTHORIZATION, format!("Basic {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_query_token() {
    let app = TestApp::spawn().await;

    let registered = app.register("nicola", "pass_word!").await;
    let token = registered["data"]["access_token"].as_str().unwrap();

    let response = app
        .get(&format!("/api/user/me?token={}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_current_user_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/user/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_invalid_tokens() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let expired = app
        .token_service
        .issue("nicola", Some(Duration::zero()))
        .unwrap()
        .access_token;
    let foreign = auth::TokenService::new(b"another-secret-key-at-least-32-bytes-long")
        .issue("nicola", None)
        .unwrap()
        .access_token;

    for token in [expired.as_str(), foreign.as_str(), "not.a.token"] {
        let response = app
            .get_authenticated("/api/user/me", token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["message"], "Invalid token");
    }
}

#[tokio::test]
async fn test_current_user_for_deleted_account() {
    let app = TestApp::spawn().await;

    // Valid signature, but no such account
    let token = app
        .token_service
        .issue("ghost", Some(Duration::seconds(60)))
        .unwrap()
        .access_token;

    let response = app
        .get_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "User not found");
}
