//! Cache provider trait for pluggable TTL-capable key-value backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for TTL-capable key-value backends (Redis or in-memory).
///
/// All values are serialized as strings (JSON). Every operation is a
/// fallible network round trip from the caller's point of view; nothing
/// here may be treated as infallible memory access.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Atomically fetch a value and delete its key in a single step.
    ///
    /// Returns `None` if the key did not exist. Under concurrent calls for
    /// the same key, at most one caller observes the value. This is the
    /// primitive one-shot tokens are consumed through.
    async fn get_del(&self, key: &str) -> AppResult<Option<String>>;

    /// Delete a key from the cache. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Reset the TTL on an existing key. Returns `false` if the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, ttl).await
    }
}
