//! Session storage over the key-value store.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use authhub_cache::CacheManager;
use authhub_cache::keys;
use authhub_core::config::session::SessionConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::traits::CacheProvider;
use authhub_entity::session::Session;

/// Manages session records in the key-value store.
///
/// Sessions expire through store TTLs rather than a reaper task. Every
/// successful read slides the expiration back to the full window.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Backing key-value store.
    cache: Arc<CacheManager>,
    /// Session configuration.
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(cache: Arc<CacheManager>, config: SessionConfig) -> Self {
        Self { cache, config }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_hours * 3600)
    }

    /// Creates a new session for the given user and returns it.
    ///
    /// The session id is an unguessable random UUID; it carries no user
    /// information itself.
    pub async fn create(&self, user_id: i64) -> AppResult<Session> {
        let session = Session::new(Uuid::new_v4().to_string(), user_id);
        let key = keys::session(&session.id);
        let payload = serde_json::to_string(&session)?;

        if let Err(e) = self.cache.set(&key, &payload, self.ttl()).await {
            // Nothing half-written may outlive a failed create.
            if let Err(del_err) = self.cache.delete(&key).await {
                warn!(session_id = %session.id, error = %del_err, "Failed to clean up session after write failure");
            }
            return Err(e);
        }

        Ok(session)
    }

    /// Fetches a session by id, sliding its expiration on success.
    ///
    /// Returns `Ok(None)` for unknown or expired ids. A failure to slide
    /// the expiration is logged but does not fail the read.
    pub async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        let key = keys::session(session_id);
        let Some(payload) = self.cache.get(&key).await? else {
            return Ok(None);
        };

        let session: Session = match serde_json::from_str(&payload) {
            Ok(s) => s,
            Err(e) => {
                warn!(session_id, error = %e, "Dropping undecodable session record");
                self.cache.delete(&key).await?;
                return Ok(None);
            }
        };

        if let Err(e) = self.cache.expire(&key, self.ttl()).await {
            warn!(session_id, error = %e, "Failed to slide session expiration");
        }

        if session.id != session_id {
            return Err(AppError::cache(format!(
                "Session record id mismatch for key {session_id}"
            )));
        }

        Ok(Some(session))
    }

    /// Deletes a session. Deleting an unknown id is not an error.
    pub async fn delete(&self, session_id: &str) -> AppResult<()> {
        self.cache.delete(&keys::session(session_id)).await
    }

    /// Name of the browser cookie carrying the session id.
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Full session lifetime, for cookie max-age.
    pub fn ttl_seconds(&self) -> u64 {
        self.config.ttl_hours * 3600
    }
}
