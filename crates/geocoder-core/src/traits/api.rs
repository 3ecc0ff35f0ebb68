// # Geocoder API Trait
//
// The capability the service facade depends on. `GeocoderClient` is the
// production implementation; tests and hosts can substitute their own.

use async_trait::async_trait;

use crate::format::ResponseFormat;

/// Anything that can fetch geocoding data for an address
#[async_trait]
pub trait GeocoderApi: Send + Sync {
    /// Geocode `address` and return the raw API response body
    ///
    /// # Parameters
    ///
    /// - `address`: Free-form address, e.g. "1600 Amphitheatre Parkway, Mountain View, CA"
    /// - `format`: `"json"` or `"xml"`; `None` uses [`GeocoderApi::default_format`]
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Body whose status is `OK` or `ZERO_RESULTS`
    /// - `Err(Error)`: Invalid format, transport failure, malformed body or API error
    async fn fetch_geo_data_for_address(
        &self,
        address: &str,
        format: Option<&str>,
    ) -> Result<String, crate::Error>;

    /// Format used when a call does not name one
    fn default_format(&self) -> ResponseFormat;
}
