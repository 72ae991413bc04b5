//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session TTL in hours. Each successful read slides the expiration
    /// back to this full window.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Name of the browser cookie carrying the opaque session id.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}
