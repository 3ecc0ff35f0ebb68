//! Error types for the geocoder client
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

use crate::format::ResponseFormat;

/// Result type alias for geocoder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the geocoder client
#[derive(Error, Debug)]
pub enum Error {
    /// Requested response format is not one of the supported formats
    #[error("Invalid format '{format}'. Must be one of the following strings: {allowed}")]
    InvalidFormat {
        /// The rejected format string
        format: String,
        /// Comma-separated list of accepted formats
        allowed: String,
    },

    /// No transport could be created for the configured preferences
    #[error("Unable to fire a HTTP request to the Google Geocoder API: {0}")]
    TransportUnavailable(String),

    /// The transport failed to complete the request
    #[error("Transport error ({transport}): {message}")]
    Transport {
        /// Transport name
        transport: String,
        /// Underlying cause
        message: String,
    },

    /// The response body could not be decoded in the requested format
    #[error("Malformed {format} response: {message}")]
    MalformedResponse {
        /// Format the body was decoded as
        format: ResponseFormat,
        /// Decoder message
        message: String,
    },

    /// The API answered with a status other than OK or ZERO_RESULTS
    #[error(
        "The Google Geocoder API responded with an error. The status was {status}. Refer to the docs to see what that status means."
    )]
    Api {
        /// Status value reported by the API
        status: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid format error for the given input
    pub fn invalid_format(format: impl Into<String>) -> Self {
        Self::InvalidFormat {
            format: format.into(),
            allowed: ResponseFormat::allowed_list(),
        }
    }

    /// Create a transport unavailable error
    pub fn transport_unavailable(msg: impl Into<String>) -> Self {
        Self::TransportUnavailable(msg.into())
    }

    /// Create a transport error
    pub fn transport(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(format: ResponseFormat, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            format,
            message: message.into(),
        }
    }

    /// Create an API status error
    pub fn api(status: impl Into<String>) -> Self {
        Self::Api {
            status: status.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a cache error
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Numeric error code, stable across releases
    ///
    /// Hosts that used to switch on exception codes can keep doing so:
    /// 100 invalid format, 200 transport unavailable, 300 transport failure.
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidFormat { .. } => 100,
            Self::TransportUnavailable(_) => 200,
            Self::Transport { .. } => 300,
            Self::MalformedResponse { .. } => 400,
            Self::Api { .. } => 500,
            Self::Config(_) | Self::Cache(_) | Self::Other(_) => 900,
        }
    }

    /// API status carried by this error, if it is an [`Error::Api`]
    pub fn api_status(&self) -> Option<&str> {
        match self {
            Self::Api { status } => Some(status),
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
