//! Cache key builders for all AuthHub store entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Prefix applied to all AuthHub store keys.
const PREFIX: &str = "authhub";

/// Key for a session record by opaque session id.
pub fn session(session_id: &str) -> String {
    format!("{PREFIX}:session:{session_id}")
}

/// Key for the one-shot OAuth state marker by CSRF token.
pub fn oauth_state(csrf_token: &str) -> String {
    format!("{PREFIX}:oauth:state:{csrf_token}")
}
