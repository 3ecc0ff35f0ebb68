//! Minimal embedding example for geocoder-core
//!
//! This example uses geocoder-core as a library with a host-supplied
//! transport, an in-memory response cache and an event listener. No network
//! access is needed: the transport answers from canned bodies.

use async_trait::async_trait;
use geocoder_core::cache::MemoryCache;
use geocoder_core::{
    GeocoderClient, GeocoderOptions, GeocoderService, ResponseFormat, Result, Transport,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::Level;

/// Transport answering from canned bodies instead of the network
struct EmbeddedTransport {
    get_calls: Arc<AtomicUsize>,
}

impl EmbeddedTransport {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                get_calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Transport for EmbeddedTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        println!("[Embedded] GET {}", url);

        let body = if url.contains("/xml?") {
            "<GeocodeResponse><status>ZERO_RESULTS</status></GeocodeResponse>".to_string()
        } else {
            serde_json::json!({
                "results": [{
                    "formatted_address": "Pariser Platz, 10117 Berlin, Germany",
                    "geometry": { "location": { "lat": 52.5162746, "lng": 13.3777041 } }
                }],
                "status": "OK"
            })
            .to_string()
        };

        Ok(body)
    }

    fn transport_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    println!("=== Embedded geocoder-core Example ===\n");

    // Create custom components
    println!("1. Creating client and service...");
    let (transport, get_calls) = EmbeddedTransport::new();
    let (event_tx, mut event_rx) = tokio::sync::mpsc::channel(32);

    let client = GeocoderClient::new(
        GeocoderOptions::with_key("AIzaSyEmbeddedExample"),
        Box::new(transport),
    )
    .with_events(event_tx.clone());

    let cache = MemoryCache::new();
    let service = GeocoderService::new(Arc::new(client))
        .with_cache(Arc::new(cache.clone()))
        .with_events(event_tx);

    // Spawn event listener (optional)
    let event_listener = tokio::spawn(async move {
        println!("2. Event listener started");
        while let Some(event) = event_rx.recv().await {
            println!("[Event] {:?}", event);
        }
        println!("Event listener stopped");
    });

    println!("3. Geocoding...\n");
    let body = service.geocode_address("Pariser Platz, Berlin", None).await?;
    println!("JSON body: {}\n", body);

    // Served from the cache
    service.geocode_address("Pariser Platz, Berlin", None).await?;

    let body = service
        .geocode_address("Nowhere", Some(ResponseFormat::Xml.as_str()))
        .await?;
    println!("XML body: {}\n", body);

    match service.geocode_address("Berlin", Some("csv")).await {
        Ok(_) => println!("csv unexpectedly accepted"),
        Err(e) => println!("Rejected format (code {}): {}\n", e.code(), e),
    }

    // Dropping the service closes the event channel
    drop(service);
    let _ = tokio::time::timeout(tokio::time::Duration::from_millis(100), event_listener).await;

    println!("\n4. Done.");
    println!("   Transport calls: {}", get_calls.load(Ordering::SeqCst));
    println!("   Cached responses: {}", cache.len().await);
    println!("\n=== Embedding Successful ===");
    println!("Key Points:");
    println!("- Transport, cache and event channel are supplied by the host");
    println!("- Repeated lookups are answered from the cache");
    println!("- Invalid formats fail before any request is made");

    Ok(())
}
