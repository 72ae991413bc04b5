//! Integration tests for registration, password login, sessions, and logout.

use http::StatusCode;

use authhub_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "a-long-password",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["email"], "alice@example.com");
    assert_eq!(response.body["data"]["role"], "USER");
    // The password record must never appear in a response.
    assert!(response.body["data"].get("password_hash").is_none());

    let (token, cookie) = app.login("alice@example.com", "a-long-password").await;
    assert!(!token.is_empty());
    assert!(cookie.starts_with("session_id="));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.create_user("dup@example.com", "password-one", UserRole::User)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Dup",
                "email": "dup@example.com",
                "password": "password-two",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_attaches_password_to_federated_account() {
    let app = TestApp::new();
    let federated = app
        .state
        .directory
        .create(authhub_entity::user::NewUser {
            name: "Fed Only".to_string(),
            email: "fed@example.com".to_string(),
            role: UserRole::User,
            password_hash: None,
            federated_id: Some("github_12345".to_string()),
            avatar_url: None,
        })
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Fed Only",
                "email": "fed@example.com",
                "password": "now-with-password",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["id"], federated.id);

    // Both login methods now work for the one account.
    let (token, _) = app.login("fed@example.com", "now-with-password").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Shorty",
                "email": "short@example.com",
                "password": "short",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.create_user("known@example.com", "right-password", UserRole::User)
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "known@example.com",
                "password": "wrong-password",
            })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "whatever-at-all",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    // Identical bodies: the response must not reveal which accounts exist.
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_session_cookie_resolves_user() {
    let app = TestApp::new();
    app.create_user("sess@example.com", "some-password", UserRole::User)
        .await;
    let (_, cookie) = app.login("sess@example.com", "some-password").await;

    let response = app
        .send("GET", "/api/auth/session", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "sess@example.com");
}

#[tokio::test]
async fn test_session_requires_cookie() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/auth/session", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = TestApp::new();
    app.create_user("bye@example.com", "some-password", UserRole::User)
        .await;
    let (_, cookie) = app.login("bye@example.com", "some-password").await;

    let logout = app
        .send("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    // The old cookie no longer resolves to a session.
    let after = app
        .send("GET", "/api/auth/session", None, None, Some(&cookie))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    // Logging out again with the dead cookie is still fine.
    let again = app
        .send("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let app = TestApp::new();
    app.create_user("token@example.com", "some-password", UserRole::User)
        .await;
    let (token, _) = app.login("token@example.com", "some-password").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "token@example.com");
}

#[tokio::test]
async fn test_me_rejects_garbage_token() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_healthz() {
    let app = TestApp::new();
    let response = app.request("GET", "/healthz", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
