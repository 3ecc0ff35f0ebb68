// # HTTP Transport
//
// This crate provides the reqwest-based transport for the geocoder client.
//
// ## Purpose
//
// Performs the single GET the client needs and hands back the body as text.
// It is the default transport; hosts that cannot use it register their own
// `Transport` under another name and list it first in their preferences.
//
// ## Behavior
//
// - One request per call, no retries, no redirects beyond reqwest's defaults
// - Request timeout always applied (30 seconds unless configured)
// - Connection errors, timeouts and non-2xx statuses are transport errors
// - The body is returned exactly as received

use async_trait::async_trait;
use geocoder_core::config::TransportConfig;
use geocoder_core::traits::{Transport, TransportFactory};
use geocoder_core::{Error, Result, TransportRegistry};
use std::time::Duration;

/// Name the transport is registered under
pub const TRANSPORT_NAME: &str = "http";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest error body excerpt carried in a transport error
const MAX_ERROR_BODY_CHARS: usize = 200;

/// User agent sent with every request
const USER_AGENT: &str = concat!("geocoder-client/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: reqwest::Client,

    /// Request timeout the client was built with
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the default 30 second timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a transport with a custom request timeout
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the underlying HTTP client cannot be built
    /// (e.g. no TLS backend available).
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Request timeout in effect
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                "Request timed out"
            } else if e.is_connect() {
                "Connection failed"
            } else {
                "Request failed"
            };
            Error::transport(TRANSPORT_NAME, format!("{}: {}", kind, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            let excerpt: String = error_text.chars().take(MAX_ERROR_BODY_CHARS).collect();

            tracing::warn!("Geocoding endpoint answered with HTTP {}", status);
            return Err(Error::transport(
                TRANSPORT_NAME,
                format!("HTTP error: {} - {}", status, excerpt),
            ));
        }

        response.text().await.map_err(|e| {
            Error::transport(TRANSPORT_NAME, format!("Failed to read response: {}", e))
        })
    }

    fn transport_name(&self) -> &'static str {
        TRANSPORT_NAME
    }
}

/// Factory for creating HTTP transports
pub struct HttpFactory;

impl TransportFactory for HttpFactory {
    fn create(&self, config: &TransportConfig) -> Result<Box<dyn Transport>> {
        match config {
            TransportConfig::Http { timeout_secs } => {
                if *timeout_secs == 0 {
                    return Err(Error::config("HTTP transport timeout must be > 0"));
                }

                Ok(Box::new(HttpTransport::with_timeout(Duration::from_secs(
                    *timeout_secs,
                ))?))
            }
            _ => Err(Error::config("Invalid config for HTTP transport")),
        }
    }
}

/// Register the HTTP transport with a registry
///
/// # Example
///
/// ```rust
/// use geocoder_core::TransportRegistry;
///
/// let registry = TransportRegistry::new();
/// geocoder_transport_http::register(&registry);
/// assert!(registry.has_transport("http"));
/// ```
pub fn register(registry: &TransportRegistry) {
    registry.register_transport(TRANSPORT_NAME, Box::new(HttpFactory));
}
