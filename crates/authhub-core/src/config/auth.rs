//! Token signing and password hashing configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Issuer string embedded in and required from every token.
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Token validity window in hours from issuance.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Argon2id cost parameters.
    #[serde(default)]
    pub password: PasswordHashConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_jwt_issuer(),
            token_ttl_hours: default_token_ttl(),
            password: PasswordHashConfig::default(),
        }
    }
}

/// Memory-hard KDF cost parameters.
///
/// The encoded password record is self-describing, so these can be retuned
/// per deployment without invalidating hashes created under older settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHashConfig {
    /// Number of passes over memory.
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    /// Memory cost in KiB.
    #[serde(default = "default_memory_cost")]
    pub memory_cost_kib: u32,
    /// Degree of parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Derived key length in bytes.
    #[serde(default = "default_output_len")]
    pub output_len: usize,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            time_cost: default_time_cost(),
            memory_cost_kib: default_memory_cost(),
            parallelism: default_parallelism(),
            output_len: default_output_len(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_issuer() -> String {
    "authhub".to_string()
}

fn default_token_ttl() -> u64 {
    24
}

fn default_time_cost() -> u32 {
    1
}

fn default_memory_cost() -> u32 {
    64 * 1024
}

fn default_parallelism() -> u32 {
    4
}

fn default_output_len() -> usize {
    32
}
