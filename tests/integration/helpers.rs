//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use authhub_api::AppState;
use authhub_cache::CacheManager;
use authhub_cache::memory::MemoryCacheProvider;
use authhub_core::config::AppConfig;
use authhub_directory::MemoryDirectory;
use authhub_entity::user::{NewUser, User, UserDirectory, UserRole};
use authhub_oauth::ProviderRegistry;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared application state for direct component access
    pub state: AppState,
}

/// Configuration mirroring config/default.toml, with fast password costs.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.password.time_cost = 1;
    config.auth.password.memory_cost_kib = 8;
    config.auth.password.parallelism = 1;

    config.acl.public_methods = vec![
        "POST /api/auth/register".to_string(),
        "POST /api/auth/login".to_string(),
        "POST /api/auth/logout".to_string(),
        "GET /api/auth/session".to_string(),
        "GET /api/auth/{provider}/login".to_string(),
        "GET /api/auth/{provider}/callback".to_string(),
    ];
    let mut rules = HashMap::new();
    rules.insert(
        "GET /api/auth/me".to_string(),
        vec!["USER".to_string(), "ADMIN".to_string()],
    );
    for method in [
        "GET /api/users",
        "GET /api/users/{id}",
        "PUT /api/users/{id}",
        "DELETE /api/users/{id}",
    ] {
        rules.insert(method.to_string(), vec!["ADMIN".to_string()]);
    }
    config.acl.rules = rules;

    config
}

impl TestApp {
    /// Create a test application on in-memory backends.
    pub fn new() -> Self {
        Self::with_state_mutation(|_| {})
    }

    /// Create a test application, adjusting the assembled state first
    /// (e.g. to swap in a fake identity provider registry).
    pub fn with_state_mutation(mutate: impl FnOnce(&mut AppState)) -> Self {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&test_config().cache.memory),
        )));
        let directory: Arc<dyn UserDirectory> = MemoryDirectory::shared();

        let mut state = AppState::assemble(test_config(), cache, directory)
            .expect("Failed to assemble test state");
        mutate(&mut state);

        Self {
            router: authhub_api::build_router(state.clone()),
            state,
        }
    }

    /// Swap the identity provider registry.
    pub fn set_providers(state: &mut AppState, registry: ProviderRegistry) {
        state.providers = Arc::new(registry);
    }

    /// Create a user directly in the directory.
    pub async fn create_user(&self, email: &str, password: &str, role: UserRole) -> User {
        let hash = self
            .state
            .hasher
            .hash_password(password)
            .expect("Failed to hash password");

        self.state
            .directory
            .create(NewUser {
                name: email.split('@').next().unwrap_or("user").to_string(),
                email: email.to_string(),
                role,
                password_hash: Some(hash),
                federated_id: None,
                avatar_url: None,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Issue a bearer token directly, bypassing the login flow.
    pub fn issue_token(&self, user: &User) -> String {
        let (token, _) = self
            .state
            .encoder
            .issue(user.id, user.role)
            .expect("Failed to issue token");
        token
    }

    /// Login via the API and return the bearer token and session cookie.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let token = response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string();
        let cookie = response
            .session_cookie()
            .expect("No session cookie in login response");
        (token, cookie)
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body, token, None).await
    }

    /// Make an HTTP request with an optional session cookie.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(cookie) = cookie {
            req = req.header("Cookie", cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when not JSON).
    pub body: Value,
}

impl TestResponse {
    /// The `name=value` part of the session Set-Cookie header, if present.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("session_id="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}
