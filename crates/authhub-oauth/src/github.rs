//! GitHub OAuth identity provider.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::config::oauth::OAuthProviderConfig;
use authhub_core::result::AppResult;
use authhub_entity::user::{User, UserDirectory};

use crate::provider::{IdentityProvider, Profile, resolve_account};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_USER_URL: &str = "https://api.github.com/user";
const API_EMAILS_URL: &str = "https://api.github.com/user/emails";

const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: u64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// GitHub OAuth provider.
pub struct GithubProvider {
    config: OAuthProviderConfig,
    http: reqwest::Client,
    directory: Arc<dyn UserDirectory>,
}

impl GithubProvider {
    /// Creates a GitHub provider from configuration.
    pub fn new(
        config: OAuthProviderConfig,
        directory: Arc<dyn UserDirectory>,
    ) -> AppResult<Self> {
        // GitHub's API rejects requests without a User-Agent.
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent("authhub")
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            config,
            http,
            directory,
        })
    }

    fn transport_error(e: reqwest::Error) -> AppError {
        AppError::with_source(
            ErrorKind::ProviderUnavailable,
            "GitHub is unreachable",
            e,
        )
    }

    async fn primary_verified_email(&self, access_token: &str) -> AppResult<String> {
        let response = self
            .http
            .get(API_EMAILS_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::provider_unavailable(format!(
                "GitHub email lookup failed with status {}",
                response.status()
            )));
        }

        let emails: Vec<GithubEmail> = response.json().await.map_err(Self::transport_error)?;
        emails
            .into_iter()
            .find(|e| e.primary && e.verified)
            .map(|e| e.email)
            .ok_or_else(|| {
                AppError::invalid_argument("GitHub account has no verified primary email")
            })
    }
}

#[async_trait]
impl IdentityProvider for GithubProvider {
    fn name(&self) -> &str {
        "github"
    }

    fn enabled(&self) -> bool {
        !self.config.client_id.is_empty() && !self.config.client_secret.is_empty()
    }

    fn auth_url(&self, state: &str) -> AppResult<String> {
        if !self.enabled() {
            return Err(AppError::provider_unavailable(
                "GitHub provider is not configured",
            ));
        }

        let scope = self.config.scopes.join(" ");
        let url = reqwest::Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("scope", scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::internal(format!("Failed to build authorization URL: {e}")))?;

        Ok(url.into())
    }

    async fn exchange(&self, code: &str) -> AppResult<String> {
        if !self.enabled() {
            return Err(AppError::provider_unavailable(
                "GitHub provider is not configured",
            ));
        }

        let response = self
            .http
            .post(TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::provider_unavailable(format!(
                "GitHub token exchange failed with status {}",
                response.status()
            )));
        }

        // GitHub reports a bad code as a 200 with an error body.
        let token: TokenResponse = response.json().await.map_err(Self::transport_error)?;
        if let Some(error) = token.error {
            debug!(error, description = ?token.error_description, "GitHub rejected the authorization code");
            return Err(AppError::unauthenticated(
                "GitHub rejected the authorization code",
            ));
        }

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthenticated("GitHub returned no access token"))
    }

    async fn user_info(&self, access_token: &str) -> AppResult<Profile> {
        let response = self
            .http
            .get(API_USER_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::unauthenticated("GitHub access token rejected"));
        }
        if !response.status().is_success() {
            return Err(AppError::provider_unavailable(format!(
                "GitHub profile lookup failed with status {}",
                response.status()
            )));
        }

        let user: GithubUser = response.json().await.map_err(Self::transport_error)?;

        let email = match user.email.filter(|e| !e.is_empty()) {
            Some(email) => email,
            // The profile email is absent when the user hides it; the
            // emails endpoint still lists it for the user:email scope.
            None => self.primary_verified_email(access_token).await?,
        };

        Ok(Profile {
            federated_id: format!("github_{}", user.id),
            name: user.name.filter(|n| !n.is_empty()).unwrap_or(user.login),
            email,
            avatar_url: user.avatar_url,
        })
    }

    async fn login(&self, profile: &Profile) -> AppResult<User> {
        resolve_account(&self.directory, profile).await
    }
}
