//! Plugin-based transport registry
//!
//! The registry allows transports to be registered at composition time,
//! so the client never probes its environment at call time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geocoder_core::registry::TransportRegistry;
//! use geocoder_core::config::TransportConfig;
//!
//! // Create a registry
//! let registry = TransportRegistry::new();
//!
//! // Register transports
//! geocoder_transport_http::register(&registry);
//!
//! // Pick the first available transport in order of preference
//! let transport = registry.select_transport(&[
//!     TransportConfig::Custom { factory: "stream".into(), config: Default::default() },
//!     TransportConfig::http(),
//! ])?;
//! ```
//!
//! ## Registration
//!
//! Implementations should register themselves during initialization:
//!
//! ```rust,ignore
//! // In geocoder-transport-http crate
//! pub fn register(registry: &TransportRegistry) {
//!     registry.register_transport("http", Box::new(HttpFactory));
//! }
//! ```

use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::traits::{Transport, TransportFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Registry of transport factories keyed by transport type name
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct TransportRegistry {
    /// Registered transport factories
    transports: RwLock<HashMap<String, Box<dyn TransportFactory>>>,
}

impl std::fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("transports", &self.list_transports())
            .finish()
    }
}

impl TransportRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transport factory
    ///
    /// Registering a name twice replaces the earlier factory.
    ///
    /// # Parameters
    ///
    /// - `name`: Transport type name (e.g., "http")
    /// - `factory`: Factory object for creating transport instances
    pub fn register_transport(&self, name: impl Into<String>, factory: Box<dyn TransportFactory>) {
        let name = name.into();
        tracing::debug!("Registering transport: {}", name);
        let mut transports = self
            .transports
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        transports.insert(name, factory);
    }

    /// Create a transport from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Transport>)`: Created transport instance
    /// - `Err(Error::TransportUnavailable)`: If the type is not registered
    /// - `Err(Error)`: If the factory rejects the configuration
    pub fn create_transport(&self, config: &TransportConfig) -> Result<Box<dyn Transport>> {
        let transport_type = config.type_name();
        let transports = self
            .transports
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let factory = transports.get(transport_type).ok_or_else(|| {
            Error::transport_unavailable(format!(
                "transport '{}' is not registered",
                transport_type
            ))
        })?;

        factory.create(config)
    }

    /// Create the first available transport from an ordered preference list
    ///
    /// Entries whose type is not registered are skipped. A registered factory
    /// that fails to build its transport stops the search with that error.
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Transport>)`: The most preferred available transport
    /// - `Err(Error::TransportUnavailable)`: If no preference is registered
    pub fn select_transport(&self, preferences: &[TransportConfig]) -> Result<Box<dyn Transport>> {
        for config in preferences {
            if !self.has_transport(config.type_name()) {
                tracing::debug!(
                    "Transport '{}' is not registered, trying next preference",
                    config.type_name()
                );
                continue;
            }

            let transport = self.create_transport(config)?;
            tracing::debug!("Selected transport: {}", transport.transport_name());
            return Ok(transport);
        }

        let wanted: Vec<&str> = preferences.iter().map(TransportConfig::type_name).collect();
        tracing::error!(
            "No usable transport among preferences [{}]",
            wanted.join(", ")
        );
        Err(Error::transport_unavailable(format!(
            "none of the preferred transports [{}] is registered",
            wanted.join(", ")
        )))
    }

    /// List all registered transport types
    pub fn list_transports(&self) -> Vec<String> {
        let transports = self
            .transports
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = transports.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a transport type is registered
    pub fn has_transport(&self, name: &str) -> bool {
        let transports = self
            .transports
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        transports.contains_key(name)
    }
}
