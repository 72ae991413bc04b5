//! Provider lookup by name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use authhub_core::config::oauth::OAuthConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::user::UserDirectory;

use crate::github::GithubProvider;
use crate::provider::IdentityProvider;

/// All configured identity providers, keyed by name.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn IdentityProvider>>,
}

impl ProviderRegistry {
    /// Builds the registry from configuration.
    ///
    /// Provider names without an implementation are skipped with a
    /// warning rather than failing startup.
    pub fn from_config(
        config: &OAuthConfig,
        directory: Arc<dyn UserDirectory>,
    ) -> AppResult<Self> {
        let mut providers: HashMap<String, Arc<dyn IdentityProvider>> = HashMap::new();

        for (name, provider_config) in &config.providers {
            match name.as_str() {
                "github" => {
                    let provider =
                        GithubProvider::new(provider_config.clone(), Arc::clone(&directory))?;
                    if provider.enabled() {
                        info!(provider = name, "Registered identity provider");
                    } else {
                        warn!(provider = name, "Identity provider registered without credentials; logins will be rejected");
                    }
                    providers.insert(name.clone(), Arc::new(provider));
                }
                other => {
                    warn!(provider = other, "Skipping unimplemented identity provider");
                }
            }
        }

        Ok(Self { providers })
    }

    /// Registry with a fixed provider set (for testing).
    pub fn from_providers(providers: Vec<Arc<dyn IdentityProvider>>) -> Self {
        Self {
            providers: providers
                .into_iter()
                .map(|p| (p.name().to_string(), p))
                .collect(),
        }
    }

    /// Looks up a provider by name.
    pub fn get(&self, name: &str) -> AppResult<Arc<dyn IdentityProvider>> {
        self.providers.get(name).cloned().ok_or_else(|| {
            AppError::invalid_argument(format!("Identity provider '{name}' is not supported"))
        })
    }

    /// Names of all registered providers.
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
