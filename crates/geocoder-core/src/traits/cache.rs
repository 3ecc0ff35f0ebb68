// # Response Cache Trait
//
// Defines the interface the service facade uses to serve repeated lookups
// without another API round-trip.
//
// ## Keys
//
// Keys are content-addressed: the facade derives them from the address and
// the resolved response format (see [`crate::service::cache_key`]). A cache
// never has to interpret them.
//
// ## Implementations
//
// - In-memory: [`crate::cache::MemoryCache`]
// - Future: anything with get/put semantics (Redis, files, ...)

use async_trait::async_trait;

use crate::format::ResponseFormat;

/// A response body stored in a cache
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CachedResponse {
    /// Raw body as returned by the API
    pub body: String,
    /// Format of the body
    pub format: ResponseFormat,
    /// When the body was stored
    pub stored_at: chrono::DateTime<chrono::Utc>,
}

impl CachedResponse {
    /// Wrap a freshly fetched body
    pub fn new(body: impl Into<String>, format: ResponseFormat) -> Self {
        Self {
            body: body.into(),
            format,
            stored_at: chrono::Utc::now(),
        }
    }
}

/// Trait for response cache implementations
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks.
///
/// # Contract
///
/// - Only successful bodies are ever stored (the facade enforces this)
/// - No expiry is implied; implementations may evict at will
/// - Failures are reported as [`crate::Error::Cache`]
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Look up a stored response
    ///
    /// # Returns
    ///
    /// - `Ok(Some(CachedResponse))`: Hit
    /// - `Ok(None)`: Miss
    /// - `Err(Error)`: Backend error
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>, crate::Error>;

    /// Store a response, replacing any previous entry for the key
    async fn put(&self, key: &str, response: CachedResponse) -> Result<(), crate::Error>;

    /// Remove a single entry (no-op if absent)
    async fn remove(&self, key: &str) -> Result<(), crate::Error>;

    /// Remove every entry
    async fn clear(&self) -> Result<(), crate::Error>;
}
