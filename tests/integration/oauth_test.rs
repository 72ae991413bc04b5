//! Integration tests for the federated login flow.
//!
//! Uses a stub identity provider so the whole redirect, state, and
//! account-resolution path runs without network access.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::user::{User, UserDirectory, UserRole};
use authhub_oauth::provider::{IdentityProvider, Profile, resolve_account};
use authhub_oauth::registry::ProviderRegistry;

use crate::helpers::TestApp;

const GOOD_CODE: &str = "good-code";
const ACCESS_TOKEN: &str = "stub-access-token";

struct StubProvider {
    directory: Arc<dyn UserDirectory>,
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn name(&self) -> &str {
        "github"
    }

    fn enabled(&self) -> bool {
        true
    }

    fn auth_url(&self, state: &str) -> AppResult<String> {
        Ok(format!("https://provider.test/authorize?state={state}"))
    }

    async fn exchange(&self, code: &str) -> AppResult<String> {
        if code == GOOD_CODE {
            Ok(ACCESS_TOKEN.to_string())
        } else {
            Err(AppError::unauthenticated("Code rejected"))
        }
    }

    async fn user_info(&self, access_token: &str) -> AppResult<Profile> {
        if access_token != ACCESS_TOKEN {
            return Err(AppError::unauthenticated("Access token rejected"));
        }
        Ok(Profile {
            federated_id: "github_777".to_string(),
            name: "Octo Cat".to_string(),
            email: "octo@example.com".to_string(),
            avatar_url: None,
        })
    }

    async fn login(&self, profile: &Profile) -> AppResult<User> {
        resolve_account(&self.directory, profile).await
    }
}

fn stub_app() -> TestApp {
    TestApp::with_state_mutation(|state| {
        let registry = ProviderRegistry::from_providers(vec![Arc::new(StubProvider {
            directory: Arc::clone(&state.directory),
        })]);
        TestApp::set_providers(state, registry);
    })
}

/// Starts a login and returns the state parameter from the redirect.
async fn start_login(app: &TestApp) -> String {
    let response = app.request("GET", "/api/auth/github/login", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);

    let location = response.headers["location"].to_str().unwrap();
    location
        .split("state=")
        .nth(1)
        .expect("No state in redirect")
        .split('&')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_full_oauth_flow_creates_account() {
    let app = stub_app();
    let state = start_login(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/api/auth/github/callback?code={GOOD_CODE}&state={state}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["user"]["email"], "octo@example.com");
    assert_eq!(response.body["data"]["user"]["has_federated_identity"], true);
    assert!(response.session_cookie().is_some());

    // The bearer token from the callback works against the RPC surface.
    let token = response.body["data"]["token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_state_cannot_be_replayed() {
    let app = stub_app();
    let state = start_login(&app).await;
    let path = format!("/api/auth/github/callback?code={GOOD_CODE}&state={state}");

    let first = app.request("GET", &path, None, None).await;
    assert_eq!(first.status, StatusCode::OK);

    let replay = app.request("GET", &path, None, None).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forged_state_rejected() {
    let app = stub_app();
    let response = app
        .request(
            "GET",
            &format!("/api/auth/github/callback?code={GOOD_CODE}&state=bm90LXJlYWw"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_code_rejected_and_state_stays_consumed() {
    let app = stub_app();
    let state = start_login(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/api/auth/github/callback?code=bad-code&state={state}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // The state was consumed before the exchange; retrying with the good
    // code must not work either.
    let retry = app
        .request(
            "GET",
            &format!("/api/auth/github/callback?code={GOOD_CODE}&state={state}"),
            None,
            None,
        )
        .await;
    assert_eq!(retry.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_oauth_links_to_existing_email_account() {
    let app = stub_app();
    let existing = app
        .create_user("octo@example.com", "local-password", UserRole::User)
        .await;

    let state = start_login(&app).await;
    let response = app
        .request(
            "GET",
            &format!("/api/auth/github/callback?code={GOOD_CODE}&state={state}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["id"], existing.id);

    // Both login methods now work for the account.
    let (_, _cookie) = app.login("octo@example.com", "local-password").await;
    let linked = app
        .state
        .directory
        .find_by_id(existing.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(linked.federated_id.as_deref(), Some("github_777"));
}

#[tokio::test]
async fn test_unknown_provider() {
    let app = stub_app();
    let response = app.request("GET", "/api/auth/gitlab/login", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
