//! Integration tests for the per-method authorization gate and the user
//! administration surface behind it.

use http::StatusCode;

use authhub_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_users_requires_credential() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/users", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_requires_admin_role() {
    let app = TestApp::new();
    let user = app
        .create_user("plain@example.com", "some-password", UserRole::User)
        .await;
    let token = app.issue_token(&user);

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_lists_users() {
    let app = TestApp::new();
    app.create_user("a@example.com", "some-password", UserRole::User)
        .await;
    let admin = app
        .create_user("root@example.com", "some-password", UserRole::Admin)
        .await;
    let token = app.issue_token(&admin);

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn test_admin_crud_on_user() {
    let app = TestApp::new();
    let target = app
        .create_user("target@example.com", "some-password", UserRole::User)
        .await;
    let admin = app
        .create_user("root@example.com", "some-password", UserRole::Admin)
        .await;
    let token = app.issue_token(&admin);

    let get = app
        .request(
            "GET",
            &format!("/api/users/{}", target.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(get.status, StatusCode::OK);
    assert_eq!(get.body["data"]["email"], "target@example.com");

    let update = app
        .request(
            "PUT",
            &format!("/api/users/{}", target.id),
            Some(serde_json::json!({ "name": "Renamed", "role": "ADMIN" })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["name"], "Renamed");
    assert_eq!(update.body["data"]["role"], "ADMIN");

    let delete = app
        .request(
            "DELETE",
            &format!("/api/users/{}", target.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::OK);

    let gone = app
        .request(
            "GET",
            &format!("/api/users/{}", target.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_unknown_role() {
    let app = TestApp::new();
    let target = app
        .create_user("t@example.com", "some-password", UserRole::User)
        .await;
    let admin = app
        .create_user("root@example.com", "some-password", UserRole::Admin)
        .await;
    let token = app.issue_token(&admin);

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}", target.id),
            Some(serde_json::json!({ "role": "WIZARD" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_missing_user_is_not_found() {
    let app = TestApp::new();
    let admin = app
        .create_user("root@example.com", "some-password", UserRole::Admin)
        .await;
    let token = app.issue_token(&admin);

    let response = app
        .request("DELETE", "/api/users/9999", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
