//! OAuth CSRF state: codec plus one-shot consumption.
//!
//! The state blob round-trips through the provider's `state` query
//! parameter. It is not encrypted; the CSRF token inside it is protected
//! by unguessability. Replay protection comes from a marker in the shared
//! store that is consumed with an atomic get-and-delete.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use authhub_cache::CacheManager;
use authhub_cache::keys;
use authhub_core::config::oauth::OAuthConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::traits::CacheProvider;

/// Per-login-attempt state carried through the OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    /// Unguessable random token, 256 bits of entropy.
    pub csrf_token: String,
    /// Provider this attempt was started against.
    pub provider: String,
}

impl OAuthState {
    /// Creates a state with a fresh random token for the given provider.
    pub fn new(provider: &str) -> Self {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        Self {
            csrf_token: URL_SAFE_NO_PAD.encode(bytes),
            provider: provider.to_string(),
        }
    }

    /// Serializes the state to a URL-safe opaque blob.
    pub fn encode(&self) -> AppResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Inverse of [`encode`](Self::encode).
    pub fn decode(encoded: &str) -> AppResult<Self> {
        let json = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| AppError::invalid_argument(format!("Malformed state parameter: {e}")))?;
        serde_json::from_slice(&json)
            .map_err(|e| AppError::invalid_argument(format!("Malformed state parameter: {e}")))
    }
}

/// Issues states and enforces their single use.
#[derive(Debug, Clone)]
pub struct StateManager {
    /// Shared store holding the one-shot markers.
    cache: Arc<CacheManager>,
    /// Marker TTL.
    ttl: Duration,
}

impl StateManager {
    /// Creates a state manager from OAuth configuration.
    pub fn new(cache: Arc<CacheManager>, config: &OAuthConfig) -> Self {
        Self {
            cache,
            ttl: Duration::from_secs(config.state_ttl_minutes * 60),
        }
    }

    /// Starts a login attempt: stores a marker for a fresh state and
    /// returns the encoded blob to send to the provider.
    pub async fn issue(&self, provider: &str) -> AppResult<String> {
        let state = OAuthState::new(provider);
        self.cache
            .set(&keys::oauth_state(&state.csrf_token), "1", self.ttl)
            .await?;
        debug!(provider, "Issued OAuth state marker");
        state.encode()
    }

    /// Consumes a callback's state parameter exactly once.
    ///
    /// The marker lookup and deletion are a single atomic store operation,
    /// so of two racing callbacks with the same state at most one gets the
    /// decoded state back; the other is rejected as a replay.
    pub async fn consume(&self, encoded: &str) -> AppResult<OAuthState> {
        let state = OAuthState::decode(encoded)
            .map_err(|e| AppError::unauthenticated(format!("Invalid OAuth state: {}", e.message)))?;

        let marker = self
            .cache
            .get_del(&keys::oauth_state(&state.csrf_token))
            .await?;
        if marker.is_none() {
            return Err(AppError::unauthenticated(
                "OAuth state is unknown, expired, or already used",
            ));
        }

        Ok(state)
    }
}
