//! Core traits for the geocoder client
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`Transport`]: Perform the HTTP GET
//! - [`ResponseCache`]: Store successful response bodies
//! - [`GeocoderApi`]: Fetch geocoding data for an address

pub mod api;
pub mod cache;
pub mod transport;

pub use api::GeocoderApi;
pub use cache::{CachedResponse, ResponseCache};
pub use transport::{Transport, TransportFactory};
