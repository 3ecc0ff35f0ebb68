//! Contract Test: Service Facade & Response Cache
//!
//! This test verifies the facade in front of the client.
//!
//! Constraints verified:
//! - Without a cache every lookup reaches the API
//! - A cached address/format pair is served without an API call
//! - Failed lookups are never cached
//! - A broken cache never fails a lookup
//! - Invalid formats are rejected before the cache or the API is touched
//! - Composition from configuration selects a registered transport
//!
//! If this test fails, the facade either hides errors or hammers the API.

mod common;

use common::*;
use geocoder_core::cache::MemoryCache;
use geocoder_core::config::TransportConfig;
use geocoder_core::service::cache_key;
use geocoder_core::{
    CacheConfig, Error, GeocoderConfig, GeocoderEvent, GeocoderOptions, GeocoderService,
    ResponseFormat, TransportRegistry,
};
use std::sync::Arc;

fn service_over(api: &MockGeocoderApi) -> GeocoderService {
    GeocoderService::new(Arc::new(MockGeocoderApi::sharing_counters_with(api)))
}

#[tokio::test]
async fn without_cache_every_lookup_hits_api() {
    let api = MockGeocoderApi::new("OK");
    let service = service_over(&api);

    service.geocode_address("Berlin", None).await.unwrap();
    service.geocode_address("Berlin", None).await.unwrap();

    assert_eq!(api.fetch_call_count(), 2);
}

#[tokio::test]
async fn cached_lookup_skips_api() {
    let api = MockGeocoderApi::new("OK");
    let cache = MemoryCache::new();
    let service = service_over(&api).with_cache(Arc::new(cache.clone()));

    let first = service.geocode_address("Berlin", Some("json")).await.unwrap();
    let second = service.geocode_address("Berlin", Some("json")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(api.fetch_call_count(), 1, "second lookup should be served from cache");
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn format_is_part_of_the_cache_key() {
    let api = MockGeocoderApi::new("OK");
    let service = service_over(&api).with_cache(Arc::new(MemoryCache::new()));

    service.geocode_address("Berlin", Some("json")).await.unwrap();
    service.geocode_address("Berlin", Some("xml")).await.unwrap();

    assert_eq!(api.fetch_call_count(), 2);
    assert_eq!(
        api.formats(),
        vec![Some("json".to_string()), Some("xml".to_string())]
    );
}

#[tokio::test]
async fn default_format_resolves_before_lookup() {
    let api = MockGeocoderApi::new("OK").with_default_format(ResponseFormat::Xml);
    let cache = MemoryCache::new();
    let service = service_over(&api).with_cache(Arc::new(cache.clone()));

    service.geocode_address("Berlin", None).await.unwrap();
    // Same pair spelled explicitly is a hit
    service.geocode_address("Berlin", Some("xml")).await.unwrap();

    assert_eq!(api.fetch_call_count(), 1);
    assert_eq!(api.formats(), vec![Some("xml".to_string())]);

    use geocoder_core::ResponseCache;
    let key = cache_key("Berlin", ResponseFormat::Xml);
    assert!(cache.get(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn zero_results_is_cached() {
    let api = MockGeocoderApi::new("ZERO_RESULTS");
    let service = service_over(&api).with_cache(Arc::new(MemoryCache::new()));

    service.geocode_address("nowhere", None).await.unwrap();
    service.geocode_address("nowhere", None).await.unwrap();

    assert_eq!(api.fetch_call_count(), 1);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let api = MockGeocoderApi::new("OVER_QUERY_LIMIT");
    let cache = MemoryCache::new();
    let service = service_over(&api).with_cache(Arc::new(cache.clone()));

    for _ in 0..2 {
        let err = service.geocode_address("Berlin", None).await.unwrap_err();
        assert_eq!(err.api_status(), Some("OVER_QUERY_LIMIT"));
    }

    assert_eq!(api.fetch_call_count(), 2);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn broken_cache_is_bypassed() {
    let api = MockGeocoderApi::new("OK");
    let cache = Arc::new(BrokenCache::new());
    let service = service_over(&api).with_cache(cache.clone());

    let body = service.geocode_address("Berlin", None).await.unwrap();

    assert!(body.contains("\"OK\""));
    assert_eq!(api.fetch_call_count(), 1);
    assert_eq!(cache.call_count(), 2, "one lookup and one store attempt");
}

#[tokio::test]
async fn invalid_format_touches_nothing() {
    let api = MockGeocoderApi::new("OK");
    let cache = Arc::new(BrokenCache::new());
    let service = service_over(&api).with_cache(cache.clone());

    let err = service.geocode_address("Berlin", Some("csv")).await.unwrap_err();

    assert!(matches!(err, Error::InvalidFormat { .. }));
    assert_eq!(api.fetch_call_count(), 0);
    assert_eq!(cache.call_count(), 0);
}

#[tokio::test]
async fn events_report_cache_decisions() {
    let api = MockGeocoderApi::new("OK");
    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    let service = service_over(&api)
        .with_cache(Arc::new(MemoryCache::new()))
        .with_events(tx);

    service.geocode_address("Berlin", None).await.unwrap();
    service.geocode_address("Berlin", None).await.unwrap();

    let key = cache_key("Berlin", ResponseFormat::Json);
    assert_eq!(
        rx.recv().await,
        Some(GeocoderEvent::CacheMiss {
            cache_key: key.clone()
        })
    );
    assert_eq!(rx.recv().await, Some(GeocoderEvent::CacheHit { cache_key: key }));
}

#[tokio::test]
async fn from_config_uses_registered_transport_and_cache() {
    let transport = RecordingTransport::new(json_body("OK", "Berlin"));
    let registry = TransportRegistry::new();
    registry.register_transport("recording", Box::new(RecordingFactory::new(&transport)));

    let config = GeocoderConfig::new()
        .with_options(GeocoderOptions::with_key("k"))
        .with_transports(vec![
            TransportConfig::http(),
            TransportConfig::Custom {
                factory: "recording".to_string(),
                config: serde_json::Value::Null,
            },
        ])
        .with_cache(CacheConfig::Memory);

    let service = GeocoderService::from_config(&config, &registry).expect("service builds");

    service.geocode_address("Berlin", None).await.unwrap();
    service.geocode_address("Berlin", None).await.unwrap();

    assert_eq!(transport.get_call_count(), 1);
    assert_eq!(
        transport.last_url().as_deref(),
        Some("https://maps.googleapis.com/maps/api/geocode/json?address=Berlin&key=k")
    );
}

#[tokio::test]
async fn from_config_without_registered_transport_fails() {
    let registry = TransportRegistry::new();

    let err = GeocoderService::from_config(&GeocoderConfig::new(), &registry).unwrap_err();

    assert!(matches!(err, Error::TransportUnavailable(_)));
    assert_eq!(err.code(), 200);
}
