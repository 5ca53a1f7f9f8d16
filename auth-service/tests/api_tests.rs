mod common;

use auth::Claims;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pass_word!",
            "name": "Alice"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert!(body["user"]["id"].is_string());
    assert!(body["user"]["created_at"].is_string());
    assert!(!body["token"].as_str().unwrap().is_empty());

    // Safe projection only: the hash never leaves the server
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register_user("alice@example.com", "pass_word!", "Alice")
        .await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "other_password",
            "name": "Also Alice"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_register_concurrent_duplicate_email() {
    let app = TestApp::spawn().await;

    let payload = json!({
        "email": "alice@example.com",
        "password": "pass_word!",
        "name": "Alice"
    });

    let first = app.post("/register").json(&payload).send();
    let second = app.post("/register").json(&payload).send();

    let (first, second) = tokio::join!(first, second);
    let mut statuses = [
        first.expect("Failed to execute request").status(),
        second.expect("Failed to execute request").status(),
    ];
    statuses.sort();

    // The unique index decides the race: exactly one wins
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "pass_word!",
            "name": "Alice"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "12345",
            "name": "Alice"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("at least 6"));
}

#[tokio::test]
async fn test_register_missing_field_is_json_400() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Undeserializable bodies follow the same error contract as every
    // other validation failure
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_register_invalid_json_syntax_is_json_400() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_login_missing_field_is_json_400() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({ "email": "alice@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_register_blank_name() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pass_word!",
            "name": "   "
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let registered = app
        .register_user("alice@example.com", "pass_word!", "Alice")
        .await;

    let response = app
        .post("/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["id"], registered["user"]["id"]);

    // Issued token validates and carries the identity
    let token = body["token"].as_str().unwrap();
    let claims = app.jwt_handler.decode(token).expect("Token should be valid");
    assert_eq!(claims.user_id, registered["user"]["id"].as_str().unwrap());
    assert_eq!(claims.email, "alice@example.com");
}

#[tokio::test]
async fn test_login_uniform_error_for_unknown_email_and_wrong_password() {
    let app = TestApp::spawn().await;

    app.register_user("alice@example.com", "correct_password", "Alice")
        .await;

    let unknown_email = app
        .post("/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "correct_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_password = app
        .post("/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Identical status and identical body: no account enumeration
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let body_unknown: serde_json::Value =
        unknown_email.json().await.expect("Failed to parse response");
    let body_wrong: serde_json::Value = wrong_password
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body_unknown, body_wrong);
}

#[tokio::test]
async fn test_me_success() {
    let app = TestApp::spawn().await;

    let registered = app
        .register_user("alice@example.com", "pass_word!", "Alice")
        .await;
    let token = registered["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["id"], registered["user"]["id"]);
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_missing_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Authorization header is required");
}

#[tokio::test]
async fn test_me_wrong_scheme() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/me")
        .header("Authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["error"],
        "Authorization header format must be Bearer {token}"
    );
}

#[tokio::test]
async fn test_me_tampered_token() {
    let app = TestApp::spawn().await;

    let registered = app
        .register_user("alice@example.com", "pass_word!", "Alice")
        .await;
    let token = registered["token"].as_str().unwrap();

    // Flip the last signature character
    let mut tampered = token.to_string();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = app
        .get_authenticated("/me", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_me_expired_token() {
    let app = TestApp::spawn().await;

    let registered = app
        .register_user("alice@example.com", "pass_word!", "Alice")
        .await;
    let user_id = registered["user"]["id"].as_str().unwrap();

    // Correctly signed but already expired
    let now = Utc::now().timestamp();
    let claims = Claims {
        user_id: user_id.to_string(),
        email: "alice@example.com".to_string(),
        iat: now - 7200,
        nbf: now - 7200,
        exp: now - 3600,
    };
    let expired_token = app.jwt_handler.encode(&claims).unwrap();

    let response = app
        .get_authenticated("/me", &expired_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_me_user_deleted_after_token_issue() {
    let app = TestApp::spawn().await;

    let registered = app
        .register_user("alice@example.com", "pass_word!", "Alice")
        .await;
    let token = registered["token"].as_str().unwrap();

    // The token stays valid, but the identity behind it is gone
    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind("alice@example.com")
        .execute(&app.db.pool)
        .await
        .expect("Failed to delete user");

    let response = app
        .get_authenticated("/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "User not found");
}
