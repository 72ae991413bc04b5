//! Method access control configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Static access control configuration, loaded once at process start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AclConfig {
    /// Methods reachable without any credential.
    #[serde(default)]
    pub public_methods: Vec<String>,
    /// Method name to the list of role names permitted to call it.
    /// Methods absent from this table are denied for every role.
    #[serde(default)]
    pub rules: HashMap<String, Vec<String>>,
}
