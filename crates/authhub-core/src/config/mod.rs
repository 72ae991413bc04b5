//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod acl;
pub mod app;
pub mod auth;
pub mod cache;
pub mod logging;
pub mod oauth;
pub mod session;

use serde::{Deserialize, Serialize};

use self::acl::AclConfig;
use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::cache::CacheConfig;
use self::logging::LoggingConfig;
use self::oauth::OAuthConfig;
use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Shared key-value store settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Token signing and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session lifecycle settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// OAuth identity provider settings.
    #[serde(default)]
    pub oauth: OAuthConfig,
    /// Method access control settings.
    #[serde(default)]
    pub acl: AclConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
            oauth: OAuthConfig::default(),
            acl: AclConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `AUTHHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AUTHHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
