//! Geocoding service facade
//!
//! The GeocoderService is what a host application talks to. It wraps any
//! [`GeocoderApi`] (normally a [`GeocoderClient`]) and optionally a
//! [`ResponseCache`]:
//!
//! 1. Resolve the format (explicit, or the API's default)
//! 2. Derive a cache key from address and format
//! 3. Serve a cached body if present
//! 4. Otherwise ask the API, and cache the body on success
//!
//! Cache failures are logged and bypassed; they never fail a lookup.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cache;
use crate::client::GeocoderClient;
use crate::config::GeocoderConfig;
use crate::error::Result;
use crate::events::{EventSink, GeocoderEvent};
use crate::format::ResponseFormat;
use crate::registry::TransportRegistry;
use crate::traits::{CachedResponse, GeocoderApi, ResponseCache};

/// Cache key for an address in a given format
///
/// Lowercase hex SHA-256 of `"{format}\n{address}"`. The address is used
/// verbatim, so differently spelled addresses get different keys.
pub fn cache_key(address: &str, format: ResponseFormat) -> String {
    let digest = Sha256::digest(format!("{}\n{}", format, address).as_bytes());
    format!("{:x}", digest)
}

/// Service to geocode addresses with Google's Geocoding API
#[derive(Clone)]
pub struct GeocoderService {
    /// API used on cache misses
    api: Arc<dyn GeocoderApi>,

    /// Optional response cache
    cache: Option<Arc<dyn ResponseCache>>,

    /// Optional observer channel
    events: EventSink,
}

impl std::fmt::Debug for GeocoderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocoderService")
            .field("default_format", &self.api.default_format())
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl GeocoderService {
    /// Create a service without a cache
    pub fn new(api: Arc<dyn GeocoderApi>) -> Self {
        Self {
            api,
            cache: None,
            events: EventSink::default(),
        }
    }

    /// Create the client and cache described by `config`
    pub fn from_config(config: &GeocoderConfig, registry: &TransportRegistry) -> Result<Self> {
        let client = GeocoderClient::from_config(config, registry)?;

        Ok(Self {
            api: Arc::new(client),
            cache: cache::from_config(config.cache),
            events: EventSink::default(),
        })
    }

    /// Attach a response cache
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach an event channel
    pub fn with_events(mut self, tx: mpsc::Sender<GeocoderEvent>) -> Self {
        self.events = EventSink::new(tx);
        self
    }

    /// The wrapped API
    pub fn api(&self) -> &Arc<dyn GeocoderApi> {
        &self.api
    }

    /// Geocode `address` in the requested format
    ///
    /// If the address was geocoded before in the same format and a cache is
    /// attached, the stored body is returned. Otherwise the API is used.
    ///
    /// # Parameters
    ///
    /// - `address`: Free-form address
    /// - `format`: `"json"` or `"xml"`; `None` uses the API's default
    ///
    /// # Returns
    ///
    /// The raw response body, as [`GeocoderApi::fetch_geo_data_for_address`].
    pub async fn geocode_address(&self, address: &str, format: Option<&str>) -> Result<String> {
        let format = match format {
            Some(format) => format.parse::<ResponseFormat>()?,
            None => self.api.default_format(),
        };

        let key = cache_key(address, format);
        info!(
            "Requested to geocode address \"{}\". Generated cache key is {}",
            address, key
        );

        if let Some(body) = self.lookup(&key).await {
            info!("Response could be served from cache");
            self.events.emit(GeocoderEvent::CacheHit { cache_key: key });
            return Ok(body);
        }

        info!("Response could not be found in cache. Using the Google API to retrieve response");
        self.events.emit(GeocoderEvent::CacheMiss {
            cache_key: key.clone(),
        });

        let body = self
            .api
            .fetch_geo_data_for_address(address, Some(format.as_str()))
            .await?;

        self.store(&key, &body, format).await;

        Ok(body)
    }

    async fn lookup(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;

        match cache.get(key).await {
            Ok(hit) => hit.map(|cached| cached.body),
            Err(e) => {
                warn!("Cache lookup failed, bypassing cache: {}", e);
                None
            }
        }
    }

    async fn store(&self, key: &str, body: &str, format: ResponseFormat) {
        let Some(cache) = &self.cache else {
            return;
        };

        if let Err(e) = cache.put(key, CachedResponse::new(body, format)).await {
            warn!("Failed to store response in cache: {}", e);
        }
    }
}
