//! Identity provider abstraction and the shared account-matching rule.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use authhub_core::result::AppResult;
use authhub_entity::user::{NewUser, User, UserDirectory, UserRole};

/// Normalized profile fetched from an identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Provider-qualified identity id, e.g. `github_583231`.
    pub federated_id: String,
    /// Display name; falls back to the account handle.
    pub name: String,
    /// Verified email address.
    pub email: String,
    /// Avatar image URL, if the provider exposes one.
    pub avatar_url: Option<String>,
}

/// One federated login backend.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Provider name as used in routes and configuration.
    fn name(&self) -> &str;

    /// Whether client credentials are configured.
    fn enabled(&self) -> bool;

    /// Builds the provider's authorization URL carrying the encoded state.
    fn auth_url(&self, state: &str) -> AppResult<String>;

    /// Exchanges a callback authorization code for an access token.
    async fn exchange(&self, code: &str) -> AppResult<String>;

    /// Fetches the account profile for an access token.
    async fn user_info(&self, access_token: &str) -> AppResult<Profile>;

    /// Resolves a fetched profile to a directory account.
    async fn login(&self, profile: &Profile) -> AppResult<User>;
}

/// Resolves a profile against the user directory.
///
/// Match precedence is fixed: an account already linked to this federated
/// identity wins; otherwise an account with the same email gets the
/// identity linked; otherwise a new account is created with the `USER`
/// role.
pub async fn resolve_account(
    directory: &Arc<dyn UserDirectory>,
    profile: &Profile,
) -> AppResult<User> {
    if let Some(user) = directory.find_by_federated_id(&profile.federated_id).await? {
        return Ok(user);
    }

    if let Some(user) = directory.find_by_email(&profile.email).await? {
        info!(user_id = user.id, federated_id = %profile.federated_id, "Linking federated identity to existing account");
        return directory.link_federated_id(user.id, &profile.federated_id).await;
    }

    info!(federated_id = %profile.federated_id, "Creating account from federated login");
    directory
        .create(NewUser {
            name: profile.name.clone(),
            email: profile.email.clone(),
            role: UserRole::User,
            password_hash: None,
            federated_id: Some(profile.federated_id.clone()),
            avatar_url: profile.avatar_url.clone(),
        })
        .await
}
