//! Google Geocoding API client
//!
//! The GeocoderClient is responsible for:
//! - Resolving the response format (explicit or default)
//! - Building the request URL from options and input
//! - Issuing one GET through the injected [`Transport`]
//! - Checking the status embedded in the body
//!
//! ## Request Flow
//!
//! ```text
//! address, format?
//!       │
//!       ▼
//! ┌──────────────┐   InvalidFormat
//! │ resolve fmt  │──────────────────▶
//! └──────────────┘
//!       │
//!       ▼
//! ┌──────────────┐
//! │  build URL   │  BASE_URI + format + "?address=..&key=.."
//! └──────────────┘
//!       │
//!       ▼
//! ┌──────────────┐   Transport
//! │ Transport    │──────────────────▶
//! │   ::get()    │
//! └──────────────┘
//!       │
//!       ▼
//! ┌──────────────┐   MalformedResponse / Api
//! │ check status │──────────────────▶
//! └──────────────┘
//!       │
//!       ▼
//!   raw body
//! ```

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::config::{GeocoderConfig, GeocoderOptions};
use crate::error::{Error, Result};
use crate::events::{EventSink, GeocoderEvent};
use crate::format::ResponseFormat;
use crate::registry::TransportRegistry;
use crate::response::{GeocodeResponse, check_response};
use crate::traits::{GeocoderApi, Transport};

/// The API endpoint URI requests are sent to; the format is appended as the last path segment
pub const GEOCODER_API_URI: &str = "https://maps.googleapis.com/maps/api/geocode/";

/// Client for the Google Geocoding HTTP API
///
/// ## Default Format
///
/// Calls that do not name a format use the client's default (initially
/// `json`). Changing it needs `&mut self`, so it cannot race with in-flight
/// fetches; hosts that share the client behind an `Arc` should pass the
/// format explicitly instead.
///
/// ## Threading
///
/// Fetches take `&self` and may run concurrently. Each performs exactly one
/// transport call; there is no retry and no caching at this level.
pub struct GeocoderClient {
    /// Options (API key)
    options: GeocoderOptions,

    /// Transport used for every request
    transport: Box<dyn Transport>,

    /// Format used when a call does not name one
    default_format: ResponseFormat,

    /// Optional observer channel
    events: EventSink,
}

impl std::fmt::Debug for GeocoderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocoderClient")
            .field("options", &self.options)
            .field("transport", &self.transport.transport_name())
            .field("default_format", &self.default_format)
            .finish()
    }
}

impl GeocoderClient {
    /// Create a new client
    ///
    /// # Parameters
    ///
    /// - `options`: Options supplied by the host (API key)
    /// - `transport`: Transport that performs the HTTP GET
    pub fn new(options: GeocoderOptions, transport: Box<dyn Transport>) -> Self {
        Self {
            options,
            transport,
            default_format: ResponseFormat::default(),
            events: EventSink::default(),
        }
    }

    /// Create a client from configuration
    ///
    /// The transport is the first entry of `config.transports` that is
    /// registered in `registry`.
    ///
    /// # Returns
    ///
    /// - `Ok(GeocoderClient)`: Ready to use
    /// - `Err(Error::Config)`: If the configuration is invalid
    /// - `Err(Error::TransportUnavailable)`: If no preferred transport is registered
    pub fn from_config(config: &GeocoderConfig, registry: &TransportRegistry) -> Result<Self> {
        config.validate()?;

        let transport = registry.select_transport(&config.transports)?;

        Ok(Self::new(config.options.clone(), transport).with_default_format(config.default_format))
    }

    /// Set the default format
    pub fn with_default_format(mut self, format: ResponseFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Attach an event channel
    pub fn with_events(mut self, tx: mpsc::Sender<GeocoderEvent>) -> Self {
        self.events = EventSink::new(tx);
        self
    }

    /// Options this client was built with
    pub fn options(&self) -> &GeocoderOptions {
        &self.options
    }

    /// Name of the transport in use
    pub fn transport_name(&self) -> &'static str {
        self.transport.transport_name()
    }

    /// Change the default format
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`] unless `format` is `json` or `xml`; the
    /// previous default is kept in that case.
    pub fn set_default_format(&mut self, format: &str) -> Result<()> {
        self.default_format = format.parse()?;
        Ok(())
    }

    /// Validate an explicit format or fall back to the default
    pub fn resolve_format(&self, format: Option<&str>) -> Result<ResponseFormat> {
        match format {
            Some(format) => format.parse(),
            None => Ok(self.default_format),
        }
    }

    /// Build the request URL for `address`
    ///
    /// `address` comes first in the query, followed by `key` when one is
    /// configured. Both are percent-encoded (space becomes `%20`).
    pub fn build_request_url(&self, address: &str, format: ResponseFormat) -> String {
        build_url(address, self.options.key(), format)
    }

    /// Request URL with the API key masked, for logs and events
    fn loggable_url(&self, address: &str, format: ResponseFormat) -> String {
        build_url(address, self.options.redacted_key().as_deref(), format)
    }

    /// Geocode `address` and return the body together with its status
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the transport fails (no parsing is attempted)
    /// - [`Error::MalformedResponse`] if the body cannot be decoded
    /// - [`Error::Api`] if the status is not `OK` or `ZERO_RESULTS`
    pub async fn fetch(&self, address: &str, format: ResponseFormat) -> Result<GeocodeResponse> {
        debug!(
            "Generating URL for requesting the Google Geocoder API with format: {}",
            format
        );
        let url = self.build_request_url(address, format);
        let loggable = self.loggable_url(address, format);
        debug!("Generated url: {}", loggable);
        self.events.emit(GeocoderEvent::RequestBuilt {
            url: loggable,
            format,
        });

        let transport_name = self.transport.transport_name();
        debug!("Using {} transport to retrieve response", transport_name);

        let body = match self.transport.get(&url).await {
            Ok(body) => body,
            Err(e) => {
                let e = match e {
                    Error::Transport { .. } | Error::TransportUnavailable(_) => e,
                    other => Error::transport(transport_name, other.to_string()),
                };
                error!("Request to the Google Geocoder API failed: {}", e);
                self.events.emit(GeocoderEvent::TransportFailed {
                    transport: transport_name.to_string(),
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        debug!("Checking response for errors");
        match check_response(&body, format) {
            Ok(status) => {
                debug!("Response OK (status: {})", status);
                self.events.emit(GeocoderEvent::ResponseAccepted {
                    status: status.to_string(),
                    format,
                });
                Ok(GeocodeResponse {
                    body,
                    status,
                    format,
                })
            }
            Err(e) => {
                error!("{}", e);
                self.events.emit(GeocoderEvent::ResponseRejected {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

#[async_trait]
impl GeocoderApi for GeocoderClient {
    async fn fetch_geo_data_for_address(
        &self,
        address: &str,
        format: Option<&str>,
    ) -> Result<String> {
        let format = self.resolve_format(format)?;
        let response = self.fetch(address, format).await?;
        Ok(response.body)
    }

    fn default_format(&self) -> ResponseFormat {
        self.default_format
    }
}

fn build_url(address: &str, key: Option<&str>, format: ResponseFormat) -> String {
    let mut url = String::from(GEOCODER_API_URI);
    url.push_str(format.as_str());
    url.push_str("?address=");
    url.push_str(&urlencoding::encode(address));

    if let Some(key) = key {
        url.push_str("&key=");
        url.push_str(&urlencoding::encode(key));
    }

    url
}
