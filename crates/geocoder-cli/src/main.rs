// # geocode - Google Geocoding API command-line client
//
// The binary is a THIN integration layer:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Registering transports
// 4. Geocoding each address given on the command line
//
// All request logic lives in geocoder-core.
//
// ## Configuration
//
// - `GEOCODER_API_KEY`: Google API key (optional)
// - `GEOCODER_FORMAT`: Response format, `json` (default) or `xml`
// - `GEOCODER_TIMEOUT_SECS`: HTTP timeout in seconds (default 30)
// - `GEOCODER_CACHE`: `none` (default) or `memory`
// - `GEOCODER_LOG_LEVEL`: trace, debug, info, warn (default), error
//
// ## Example
//
// ```bash
// export GEOCODER_API_KEY=your_key
// geocode "1600 Amphitheatre Parkway, Mountain View, CA" "Berlin"
// ```
//
// Each response body is written to stdout, one per address. Logs go to stderr.

use anyhow::Result;
use geocoder_core::config::TransportConfig;
use geocoder_core::{
    CacheConfig, GeocoderConfig, GeocoderOptions, GeocoderService, ResponseFormat,
    TransportRegistry,
};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Every address geocoded
/// - 1: Configuration or startup error
/// - 2: At least one lookup failed
#[derive(Debug, Clone, Copy)]
enum GeocodeExitCode {
    /// All lookups succeeded
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (a lookup failed)
    RuntimeError = 2,
}

impl From<GeocodeExitCode> for ExitCode {
    fn from(code: GeocodeExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    api_key: Option<String>,
    format: String,
    timeout_secs: String,
    cache: String,
    log_level: String,
    addresses: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables and arguments
    fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok(), env::args().skip(1).collect())
    }

    /// Load configuration through an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, addresses: Vec<String>) -> Self {
        Self {
            api_key: lookup("GEOCODER_API_KEY").filter(|k| !k.is_empty()),
            format: lookup("GEOCODER_FORMAT").unwrap_or_else(|| "json".to_string()),
            timeout_secs: lookup("GEOCODER_TIMEOUT_SECS").unwrap_or_else(|| "30".to_string()),
            cache: lookup("GEOCODER_CACHE").unwrap_or_else(|| "none".to_string()),
            log_level: lookup("GEOCODER_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            addresses: addresses
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Validate the configuration and turn it into a client configuration
    fn to_geocoder_config(&self) -> Result<GeocoderConfig> {
        if self.addresses.is_empty() {
            anyhow::bail!("No address given. Usage: geocode <ADDRESS>...");
        }

        if let Some(key) = &self.api_key
            && key.chars().any(char::is_whitespace)
        {
            anyhow::bail!("GEOCODER_API_KEY must not contain whitespace");
        }

        let format: ResponseFormat = self
            .format
            .parse()
            .map_err(|e| anyhow::anyhow!("GEOCODER_FORMAT: {}", e))?;

        let timeout_secs: u64 = self.timeout_secs.parse().map_err(|_| {
            anyhow::anyhow!(
                "GEOCODER_TIMEOUT_SECS must be a number of seconds. Got: {}",
                self.timeout_secs
            )
        })?;
        if !(1..=300).contains(&timeout_secs) {
            anyhow::bail!(
                "GEOCODER_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                timeout_secs
            );
        }

        let cache = match self.cache.to_lowercase().as_str() {
            "none" => CacheConfig::Disabled,
            "memory" => CacheConfig::Memory,
            _ => anyhow::bail!(
                "GEOCODER_CACHE '{}' is not supported. Supported values: none, memory",
                self.cache
            ),
        };

        self.log_level()?;

        let config = GeocoderConfig::new()
            .with_options(GeocoderOptions::new(self.api_key.clone()))
            .with_default_format(format)
            .with_transports(vec![TransportConfig::Http { timeout_secs }])
            .with_cache(cache);
        config.validate()?;

        Ok(config)
    }

    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "GEOCODER_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    let geocoder_config = match config.to_geocoder_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return GeocodeExitCode::ConfigError.into();
        }
    };

    let log_level = config.log_level().unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return GeocodeExitCode::ConfigError.into();
    }

    let registry = TransportRegistry::new();
    register_transports(&registry);

    let service = match GeocoderService::from_config(&geocoder_config, &registry) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to create geocoder: {}", e);
            eprintln!("Startup error: {}", e);
            return GeocodeExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return GeocodeExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(&service, &config.addresses)).into()
}

/// Register every transport compiled into this binary
fn register_transports(registry: &TransportRegistry) {
    #[cfg(feature = "http")]
    {
        info!("Registering HTTP transport");
        geocoder_transport_http::register(registry);
    }

    if registry.list_transports().is_empty() {
        tracing::warn!("No transport compiled in; every lookup will fail");
    }
}

/// Geocode every address, printing bodies to stdout
async fn run(service: &GeocoderService, addresses: &[String]) -> GeocodeExitCode {
    let mut failures = 0usize;

    for address in addresses {
        match service.geocode_address(address, None).await {
            Ok(body) => println!("{}", body),
            Err(e) => {
                failures += 1;
                error!("Geocoding \"{}\" failed: {}", address, e);
                eprintln!("{}: {}", address, e);
            }
        }
    }

    info!(
        "Geocoded {} of {} address(es)",
        addresses.len() - failures,
        addresses.len()
    );

    if failures == 0 {
        GeocodeExitCode::Success
    } else {
        GeocodeExitCode::RuntimeError
    }
}
