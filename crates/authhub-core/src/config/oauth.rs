//! OAuth identity provider configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level OAuth configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// TTL in minutes for the anti-replay state marker stored per login attempt.
    #[serde(default = "default_state_ttl")]
    pub state_ttl_minutes: u64,
    /// Per-provider client credentials, keyed by provider name (e.g. `"github"`).
    #[serde(default)]
    pub providers: HashMap<String, OAuthProviderConfig>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            state_ttl_minutes: default_state_ttl(),
            providers: HashMap::new(),
        }
    }
}

/// Client credentials for one identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthProviderConfig {
    /// OAuth application client id. Empty means the provider is disabled.
    #[serde(default)]
    pub client_id: String,
    /// OAuth application client secret. Empty means the provider is disabled.
    #[serde(default)]
    pub client_secret: String,
    /// Callback URL registered with the provider.
    #[serde(default)]
    pub redirect_url: String,
    /// OAuth scopes to request.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_state_ttl() -> u64 {
    10
}

fn default_scopes() -> Vec<String> {
    vec!["user:email".to_string(), "read:user".to_string()]
}
