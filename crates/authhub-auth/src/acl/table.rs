//! Static access control table loaded from configuration.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use authhub_core::config::acl::AclConfig;
use authhub_entity::user::UserRole;

/// Immutable method-to-roles table, built once at process start.
///
/// A method absent from both the public set and the rules table is denied
/// for every caller.
#[derive(Debug, Clone)]
pub struct AclTable {
    /// Methods reachable without any credential.
    public: HashSet<String>,
    /// Methods mapped to the roles permitted to call them.
    rules: HashMap<String, HashSet<UserRole>>,
}

impl AclTable {
    /// Builds the table from configuration.
    ///
    /// Unknown role names in a rule are skipped with a warning; a rule
    /// whose roles all fail to parse ends up denying everyone.
    pub fn from_config(config: &AclConfig) -> Self {
        let public: HashSet<String> = config.public_methods.iter().cloned().collect();

        let mut rules = HashMap::new();
        for (method, role_names) in &config.rules {
            let mut roles = HashSet::new();
            for name in role_names {
                match name.parse::<UserRole>() {
                    Ok(role) => {
                        roles.insert(role);
                    }
                    Err(_) => {
                        warn!(method, role = %name, "Skipping unknown role name in access rule");
                    }
                }
            }
            if roles.is_empty() {
                warn!(method, "Access rule permits no valid roles; method is unreachable");
            }
            rules.insert(method.clone(), roles);
        }

        Self { public, rules }
    }

    /// Whether the method is reachable without a credential.
    pub fn is_public(&self, method: &str) -> bool {
        self.public.contains(method)
    }

    /// Whether the given role may call the method.
    ///
    /// Roles must be listed explicitly; methods with no rule are denied
    /// for all.
    pub fn allows(&self, method: &str, role: UserRole) -> bool {
        self.rules
            .get(method)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Whether any rule exists for the method.
    pub fn has_rule(&self, method: &str) -> bool {
        self.rules.contains_key(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AclTable {
        let mut rules = HashMap::new();
        rules.insert("users.list".to_string(), vec!["ADMIN".to_string()]);
        rules.insert(
            "users.me".to_string(),
            vec!["USER".to_string(), "ADMIN".to_string()],
        );
        rules.insert("broken".to_string(), vec!["WIZARD".to_string()]);

        AclTable::from_config(&AclConfig {
            public_methods: vec!["auth.login".to_string()],
            rules,
        })
    }

    #[test]
    fn test_public_method() {
        let t = table();
        assert!(t.is_public("auth.login"));
        assert!(!t.is_public("users.list"));
    }

    #[test]
    fn test_role_rules() {
        let t = table();
        assert!(t.allows("users.list", UserRole::Admin));
        assert!(!t.allows("users.list", UserRole::User));
        assert!(t.allows("users.me", UserRole::User));
    }

    #[test]
    fn test_rule_with_no_valid_roles_denies_everyone() {
        let t = table();
        assert!(!t.allows("broken", UserRole::Admin));
        assert!(!t.allows("broken", UserRole::User));
    }

    #[test]
    fn test_unlisted_method_denied_for_all() {
        let t = table();
        assert!(!t.allows("users.purge", UserRole::Admin));
        assert!(!t.allows("users.purge", UserRole::User));
    }
}
