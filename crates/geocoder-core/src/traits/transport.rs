// # Transport Trait
//
// Defines the interface for performing the HTTP GET against the Geocoding API.
//
// ## Implementations
//
// - HTTP (reqwest): `geocoder-transport-http` crate
// - Test doubles: anything that can hand back a body for a URL
//
// ## Usage
//
// ```rust,ignore
// use geocoder_core::Transport;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let transport = /* Transport implementation */;
//
//     let body = transport
//         .get("https://maps.googleapis.com/maps/api/geocode/json?address=Berlin")
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for transport implementations
///
/// A transport performs exactly one GET per call and returns the body as
/// text. It knows nothing about formats or API status codes; the client
/// owns that.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Contract
///
/// - One request per invocation, no retries
/// - No caching between calls
/// - Connection failures, timeouts and non-success HTTP statuses are
///   reported as [`crate::Error::Transport`]
/// - The body is returned exactly as received
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and return the response body
    ///
    /// # Parameters
    ///
    /// - `url`: Fully built request URL including the query string
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The raw response body
    /// - `Err(Error)`: If the request could not be completed
    async fn get(&self, url: &str) -> Result<String, crate::Error>;

    /// Get the transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}

/// Helper trait for constructing transports from configuration
pub trait TransportFactory: Send + Sync {
    /// Create a Transport instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this transport
    ///
    /// # Returns
    ///
    /// A boxed Transport trait object
    fn create(
        &self,
        config: &crate::config::TransportConfig,
    ) -> Result<Box<dyn Transport>, crate::Error>;
}
