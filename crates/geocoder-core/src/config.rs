//! Configuration types for the geocoder client
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

use crate::format::ResponseFormat;

/// Namespace under which a host configuration document carries geocoder options
pub const CONFIG_NAMESPACE: &str = "zend-google-geocoder";

/// Shorter namespace also accepted when the primary one is absent
pub const CONFIG_NAMESPACE_ALIAS: &str = "google-geocoder";

/// Options handed to the client by the host application
///
/// The only recognized option is `key`, the Google API key. No validation is
/// performed; an absent or empty key is simply left out of outgoing requests.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocoderOptions {
    /// Google API key
    #[serde(default)]
    key: Option<String>,
}

impl std::fmt::Debug for GeocoderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocoderOptions")
            .field("key", &self.key().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl GeocoderOptions {
    /// Create options with an optional API key
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }

    /// Create options carrying an API key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// Read options from the `zend-google-geocoder` namespace of a host config document
    ///
    /// `google-geocoder` is read when the primary namespace is missing. A
    /// document with neither yields empty options.
    pub fn from_config(config: &serde_json::Value) -> Result<Self, crate::Error> {
        let section = [CONFIG_NAMESPACE, CONFIG_NAMESPACE_ALIAS]
            .into_iter()
            .find_map(|name| config.get(name).map(|section| (name, section)));

        match section {
            Some((name, section)) => serde_json::from_value(section.clone()).map_err(|e| {
                crate::Error::config(format!("Invalid '{}' section: {}", name, e))
            }),
            None => Ok(Self::default()),
        }
    }

    /// The API key, if one is configured and non-empty
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }

    /// The API key masked for log output
    ///
    /// Keeps the first and last two characters and replaces the rest with `x`.
    /// Keys of four characters or fewer are masked entirely.
    pub fn redacted_key(&self) -> Option<String> {
        self.key().map(redact)
    }
}

fn redact(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "x".repeat(chars.len());
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "x".repeat(chars.len() - 4), tail)
}

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Options passed through to every request
    #[serde(default)]
    pub options: GeocoderOptions,

    /// Format used when a call does not name one
    #[serde(default)]
    pub default_format: ResponseFormat,

    /// Transports in order of preference; the first registered one is used
    #[serde(default = "default_transports")]
    pub transports: Vec<TransportConfig>,

    /// Response cache used by the service facade
    #[serde(default)]
    pub cache: CacheConfig,
}

impl GeocoderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            options: GeocoderOptions::default(),
            default_format: ResponseFormat::default(),
            transports: default_transports(),
            cache: CacheConfig::default(),
        }
    }

    /// Set the client options
    pub fn with_options(mut self, options: GeocoderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the default response format
    pub fn with_default_format(mut self, format: ResponseFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Replace the transport preference list
    pub fn with_transports(mut self, transports: Vec<TransportConfig>) -> Self {
        self.transports = transports;
        self
    }

    /// Set the cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.transports.is_empty() {
            return Err(crate::Error::config("No transports configured"));
        }

        for transport in &self.transports {
            transport.validate()?;
        }

        Ok(())
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    /// HTTP client transport
    Http {
        /// Request timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// Custom transport
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        #[serde(default)]
        config: serde_json::Value,
    },
}

impl TransportConfig {
    /// HTTP transport with the default timeout
    pub fn http() -> Self {
        TransportConfig::Http {
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Validate the transport configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            TransportConfig::Http { timeout_secs } => {
                if *timeout_secs == 0 {
                    return Err(crate::Error::config("HTTP transport timeout must be > 0"));
                }
                Ok(())
            }
            TransportConfig::Custom { factory, .. } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom transport factory cannot be empty",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the transport type name
    pub fn type_name(&self) -> &str {
        match self {
            TransportConfig::Http { .. } => "http",
            TransportConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::http()
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CacheConfig {
    /// Every call goes to the API
    #[default]
    Disabled,

    /// In-memory cache, lost on restart
    Memory,
}

fn default_transports() -> Vec<TransportConfig> {
    vec![TransportConfig::http()]
}

fn default_timeout_secs() -> u64 {
    30
}
