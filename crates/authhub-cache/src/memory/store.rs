//! In-memory cache implementation using the moka crate.
//!
//! Entries carry their own deadline because moka's simple API only offers
//! a cache-wide TTL; sessions and state markers need per-key expirations.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;

use authhub_core::config::cache::MemoryCacheConfig;
use authhub_core::result::AppResult;
use authhub_core::traits::cache::CacheProvider;

/// A stored value with its expiration deadline.
#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, MemoryEntry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.max_capacity).build();
        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self.cache.get(key).await {
            Some(entry) if entry.is_expired() => {
                self.cache.remove(key).await;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = MemoryEntry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn get_del(&self, key: &str) -> AppResult<Option<String>> {
        // moka's remove returns the previous value exactly once, so two
        // racing consumers cannot both observe it.
        match self.cache.remove(key).await {
            Some(entry) if entry.is_expired() => Ok(None),
            Some(entry) => Ok(Some(entry.value)),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        match self.cache.get(key).await {
            Some(entry) if !entry.is_expired() => {
                let refreshed = MemoryEntry {
                    value: entry.value,
                    expires_at: Instant::now() + ttl,
                };
                self.cache.insert(key.to_string(), refreshed).await;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
