//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use authhub_auth::acl::{AclTable, AuthInterceptor};
use authhub_auth::jwt::{JwtDecoder, JwtEncoder};
use authhub_auth::password::PasswordHasher;
use authhub_auth::session::SessionStore;
use authhub_cache::CacheManager;
use authhub_core::config::AppConfig;
use authhub_core::result::AppResult;
use authhub_entity::user::UserDirectory;
use authhub_oauth::registry::ProviderRegistry;
use authhub_oauth::state::StateManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Key-value store manager.
    pub cache: Arc<CacheManager>,
    /// User directory.
    pub directory: Arc<dyn UserDirectory>,
    /// Password hasher (Argon2id).
    pub hasher: Arc<PasswordHasher>,
    /// Token encoder.
    pub encoder: Arc<JwtEncoder>,
    /// Token decoder and validator.
    pub decoder: Arc<JwtDecoder>,
    /// Session store.
    pub sessions: Arc<SessionStore>,
    /// OAuth state manager.
    pub states: Arc<StateManager>,
    /// Identity provider registry.
    pub providers: Arc<ProviderRegistry>,
    /// Per-method authorization interceptor.
    pub interceptor: Arc<AuthInterceptor>,
}

impl AppState {
    /// Wires up all shared components on top of an already-connected
    /// store and directory.
    pub fn assemble(
        config: AppConfig,
        cache: Arc<CacheManager>,
        directory: Arc<dyn UserDirectory>,
    ) -> AppResult<Self> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth.password)?);
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));
        let sessions = Arc::new(SessionStore::new(
            Arc::clone(&cache),
            config.session.clone(),
        ));
        let states = Arc::new(StateManager::new(Arc::clone(&cache), &config.oauth));
        let providers = Arc::new(ProviderRegistry::from_config(
            &config.oauth,
            Arc::clone(&directory),
        )?);
        let interceptor = Arc::new(AuthInterceptor::new(
            AclTable::from_config(&config.acl),
            Arc::clone(&decoder),
        ));

        Ok(Self {
            config: Arc::new(config),
            cache,
            directory,
            hasher,
            encoder,
            decoder,
            sessions,
            states,
            providers,
            interceptor,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}
