// # Memory Cache
//
// In-memory implementation of ResponseCache.
//
// ## Purpose
//
// Serves repeated lookups of the same address and format without another
// API round-trip. Entries never expire and are lost on restart.
//
// ## When to Use
//
// - Batch jobs that geocode overlapping address lists
// - Long-running hosts where the address set is bounded
// - Tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::cache::{CachedResponse, ResponseCache};

/// In-memory response cache
///
/// This implementation stores all entries in a HashMap protected by a RwLock.
/// Clones share the same storage.
///
/// # Example
///
/// ```rust,no_run
/// use geocoder_core::cache::MemoryCache;
/// use geocoder_core::traits::{CachedResponse, ResponseCache};
/// use geocoder_core::ResponseFormat;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let cache = MemoryCache::new();
///
///     cache
///         .put("key", CachedResponse::new(r#"{"status":"OK"}"#, ResponseFormat::Json))
///         .await?;
///
///     let hit = cache.get("key").await?;
///     assert!(hit.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<RwLock<HashMap<String, CachedResponse>>>,
}

impl MemoryCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries in the cache
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(key).cloned())
    }

    async fn put(&self, key: &str, response: CachedResponse) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.insert(key.to_string(), response);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ResponseFormat;

    #[test]
    fn test_memory_cache_basic() {
        tokio_test::block_on(async {
            let cache = MemoryCache::new();

            assert!(cache.is_empty().await);
            assert_eq!(cache.len().await, 0);

            let response = CachedResponse::new(r#"{"status":"OK"}"#, ResponseFormat::Json);
            cache.put("a", response.clone()).await.unwrap();

            assert_eq!(cache.len().await, 1);
            assert_eq!(cache.get("a").await.unwrap(), Some(response));
            assert_eq!(cache.get("b").await.unwrap(), None);

            cache.remove("a").await.unwrap();
            assert!(cache.is_empty().await);
        });
    }

    #[tokio::test]
    async fn test_memory_cache_replace_and_clear() {
        let cache = MemoryCache::new();

        cache
            .put("a", CachedResponse::new("<status>OK</status>", ResponseFormat::Xml))
            .await
            .unwrap();
        cache
            .put("a", CachedResponse::new("<status>ZERO_RESULTS</status>", ResponseFormat::Xml))
            .await
            .unwrap();
        cache
            .put("b", CachedResponse::new(r#"{"status":"OK"}"#, ResponseFormat::Json))
            .await
            .unwrap();

        assert_eq!(cache.len().await, 2);
        assert_eq!(
            cache.get("a").await.unwrap().unwrap().body,
            "<status>ZERO_RESULTS</status>"
        );

        cache.clear().await.unwrap();
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let cache = MemoryCache::new();
        let other = cache.clone();

        other
            .put("a", CachedResponse::new("{}", ResponseFormat::Json))
            .await
            .unwrap();

        assert_eq!(cache.len().await, 1);
    }
}
