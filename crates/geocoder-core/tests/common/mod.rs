//! Test doubles and common utilities for client contract tests
//!
//! This module provides minimal test doubles that stand in for the network,
//! the API and the cache without implementing real functionality.

#![allow(dead_code)]

use geocoder_core::config::TransportConfig;
use geocoder_core::error::{Error, Result};
use geocoder_core::traits::{
    CachedResponse, GeocoderApi, ResponseCache, Transport, TransportFactory,
};
use geocoder_core::ResponseFormat;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A Transport that replays a fixed body and records every URL it is asked for
pub struct RecordingTransport {
    /// Body returned for every request
    body: String,
    /// URLs requested so far
    urls: Arc<std::sync::Mutex<Vec<String>>>,
    /// Call counter for get()
    get_call_count: Arc<AtomicUsize>,
}

impl RecordingTransport {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            urls: Arc::new(std::sync::Mutex::new(Vec::new())),
            get_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times get() was called
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    /// Get the URLs that were requested, in order
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    /// Get the most recently requested URL
    pub fn last_url(&self) -> Option<String> {
        self.urls.lock().unwrap().last().cloned()
    }

    /// Create a new RecordingTransport that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            body: other.body.clone(),
            urls: Arc::clone(&other.urls),
            get_call_count: Arc::clone(&other.get_call_count),
        }
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}

/// A Transport that always fails like a refused connection
pub struct FailingTransport {
    /// Call counter for get()
    get_call_count: Arc<AtomicUsize>,
}

impl FailingTransport {
    pub fn new() -> Self {
        Self {
            get_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times get() was called
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    /// Create a new FailingTransport that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            get_call_count: Arc::clone(&other.get_call_count),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FailingTransport {
    async fn get(&self, _url: &str) -> Result<String> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::transport("failing", "Connection refused (os error 111)"))
    }

    fn transport_name(&self) -> &'static str {
        "failing"
    }
}

/// Factory handing out RecordingTransports that share one set of counters
pub struct RecordingFactory {
    template: RecordingTransport,
}

impl RecordingFactory {
    pub fn new(template: &RecordingTransport) -> Self {
        Self {
            template: RecordingTransport::sharing_counters_with(template),
        }
    }
}

impl TransportFactory for RecordingFactory {
    fn create(&self, _config: &TransportConfig) -> Result<Box<dyn Transport>> {
        Ok(Box::new(RecordingTransport::sharing_counters_with(
            &self.template,
        )))
    }
}

/// A GeocoderApi that counts calls and replays a fixed outcome
pub struct MockGeocoderApi {
    /// Call counter for fetch_geo_data_for_address()
    fetch_call_count: Arc<AtomicUsize>,
    /// Formats passed to fetch_geo_data_for_address()
    formats: Arc<std::sync::Mutex<Vec<Option<String>>>>,
    /// Status to report; anything but OK/ZERO_RESULTS fails the call
    status: String,
    /// Default format reported to callers
    default_format: ResponseFormat,
}

impl MockGeocoderApi {
    pub fn new(status: &str) -> Self {
        Self {
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
            formats: Arc::new(std::sync::Mutex::new(Vec::new())),
            status: status.to_string(),
            default_format: ResponseFormat::Json,
        }
    }

    pub fn with_default_format(mut self, format: ResponseFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Get the number of times fetch_geo_data_for_address() was called
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_call_count.load(Ordering::SeqCst)
    }

    /// Get the formats requested, in order
    pub fn formats(&self) -> Vec<Option<String>> {
        self.formats.lock().unwrap().clone()
    }

    /// Create a new MockGeocoderApi that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            fetch_call_count: Arc::clone(&other.fetch_call_count),
            formats: Arc::clone(&other.formats),
            status: other.status.clone(),
            default_format: other.default_format,
        }
    }
}

#[async_trait::async_trait]
impl GeocoderApi for MockGeocoderApi {
    async fn fetch_geo_data_for_address(
        &self,
        address: &str,
        format: Option<&str>,
    ) -> Result<String> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        self.formats.lock().unwrap().push(format.map(str::to_string));

        match self.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(json_body(&self.status, address)),
            other => Err(Error::api(other)),
        }
    }

    fn default_format(&self) -> ResponseFormat {
        self.default_format
    }
}

/// A ResponseCache whose backend is always down
pub struct BrokenCache {
    /// Call counter for get() and put()
    call_count: Arc<AtomicUsize>,
}

impl BrokenCache {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of get()/put() calls
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ResponseCache for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<CachedResponse>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::cache("backend unavailable"))
    }

    async fn put(&self, _key: &str, _response: CachedResponse) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::cache("backend unavailable"))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::cache("backend unavailable"))
    }

    async fn clear(&self) -> Result<()> {
        Err(Error::cache("backend unavailable"))
    }
}

/// Minimal JSON body with the given status
pub fn json_body(status: &str, address: &str) -> String {
    serde_json::json!({
        "results": [{ "formatted_address": address }],
        "status": status,
    })
    .to_string()
}

/// Minimal XML body with the given status
pub fn xml_body(status: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<GeocodeResponse>\n <status>{}</status>\n</GeocodeResponse>\n",
        status
    )
}
