mod common;

use auth::AccessClaims;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_returns_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "name": "alice",
            "email": "alice@example.com",
            "password": "secret-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    let token = body["data"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_register_twice_conflicts() {
    let app = TestApp::spawn().await;
    app.register("alice").await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "name": "alice",
            "email": "alice@example.com",
            "password": "secret-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::spawn().await;
    app.register("alice").await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "name": "alice2",
            "email": "alice@example.com",
            "password": "secret-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_without_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "name": "alice",
            "email": "alice@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["errors"]["password"][0],
        "The password field is required."
    );
    assert!(body["errors"].get("name").is_none());
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "name": "not valid",
            "email": "not-an-email",
            "password": "123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_and_login_with_form_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .form(&[
            ("name", "alice"),
            ("email", "alice@example.com"),
            ("password", "secret-password"),
        ])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/api/user/login")
        .form(&[("name", "alice"), ("password", "secret-password")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["data"].as_str().expect("Login did not return a token");

    let response = app
        .get_authenticated("/api/user", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_without_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_login_returns_usable_token() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    let response = app
        .post("/api/user/login")
        .json(&json!({
            "name": user.name,
            "password": user.password
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["data"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/api/user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    let response = app
        .post("/api/user/login")
        .json(&json!({
            "name": user.name,
            "password": format!("{}.", user.password)
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/login")
        .json(&json!({
            "name": "nobody",
            "password": "secret-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/login")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    let response = app
        .get_authenticated("/api/user", &format!("{}.", user.token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_prefix_accepted() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    let response = app
        .get("/api/user")
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/user")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Unauthenticated.");

    let response = app
        .post("/api/user/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    let response = app
        .post_authenticated("/api/user/logout", &user.token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated("/api/user", &user.token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_keeps_other_tokens() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    let response = app
        .post("/api/user/login")
        .json(&json!({"name": user.name, "password": user.password}))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let second_token = body["data"].as_str().unwrap().to_string();

    app.post_authenticated("/api/user/logout", &user.token)
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated("/api/user", &second_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    // Re-sign the real claims with an expiry in the past.
    let claims: AccessClaims = app.jwt_handler.decode(&user.token).unwrap();
    let expired = AccessClaims::issued_at(
        claims.sub,
        claims.jti,
        claims.name,
        chrono::Utc::now() - chrono::Duration::hours(2),
        chrono::Duration::hours(1),
    );
    let token = app.jwt_handler.encode(&expired).unwrap();

    let response = app
        .get_authenticated("/api/user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signed_token_without_record_rejected() {
    let app = TestApp::spawn().await;
    let user = app.register("alice").await;

    let claims: AccessClaims = app.jwt_handler.decode(&user.token).unwrap();
    let forged = AccessClaims::new(
        claims.sub,
        uuid::Uuid::new_v4(),
        claims.name,
        chrono::Duration::hours(1),
    );
    let token = app.jwt_handler.encode(&forged).unwrap();

    let response = app
        .get_authenticated("/api/user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_other_subject_rejected() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    // Alice's token record, but claiming to be Bob.
    let alice_claims: AccessClaims = app.jwt_handler.decode(&alice.token).unwrap();
    let bob_claims: AccessClaims = app.jwt_handler.decode(&bob.token).unwrap();
    let mixed = AccessClaims::new(
        bob_claims.sub,
        alice_claims.jti,
        bob_claims.name,
        chrono::Duration::hours(1),
    );
    let token = app.jwt_handler.encode(&mixed).unwrap();

    let response = app
        .get_authenticated("/api/user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "ok");
}
