//! Session entity model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active user session.
///
/// The record lives exclusively in the shared key-value store for its
/// lifetime, keyed by `id` with an expiration; the process holds no
/// authoritative in-memory copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session identifier, also the store key.
    pub id: String,
    /// The user this session belongs to.
    pub user_id: i64,
    /// Open string-keyed map for per-session data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session record for a user.
    pub fn new(id: String, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            data: HashMap::new(),
            created_at: Utc::now(),
        }
    }
}
