// # geocoder-core
//
// Core library for the Google Geocoding API client.
//
// ## Architecture Overview
//
// This library turns an address into the raw Geocoding API response:
// - **GeocoderOptions**: Host-supplied options (API key)
// - **Transport**: Trait for performing the HTTP GET
// - **GeocoderClient**: Builds the request URL, calls the transport, checks the body status
// - **GeocoderService**: Facade with an optional response cache
// - **TransportRegistry**: Plugin-based registry of transports, consulted at composition time
//
// ## Design Principles
//
// 1. **Single-shot**: One transport call per lookup, no retries
// 2. **Injected collaborators**: Transport, cache and event channel are passed in
// 3. **Plugin-Based**: Transports are registered, not probed for at call time
// 4. **Raw bodies**: Successful calls return the body exactly as received

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod registry;
pub mod response;
pub mod service;
pub mod traits;

// Re-export core types for convenience
pub use client::{GEOCODER_API_URI, GeocoderClient};
pub use config::{CacheConfig, GeocoderConfig, GeocoderOptions, TransportConfig};
pub use error::{Error, Result};
pub use events::GeocoderEvent;
pub use format::ResponseFormat;
pub use registry::TransportRegistry;
pub use response::{ApiStatus, GeocodeResponse};
pub use service::GeocoderService;
pub use traits::{GeocoderApi, ResponseCache, Transport};
