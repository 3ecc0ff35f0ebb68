//! Response formats supported by the Geocoding API
//!
//! The API serves the same result either as JSON or as XML. The format is
//! part of the request path, so it is validated before any URL is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Serialization requested from the Geocoding API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `application/json` body with a top-level `status` field
    #[default]
    Json,
    /// XML document with a `<status>` element
    Xml,
}

impl ResponseFormat {
    /// Every accepted format, in the order they are reported to callers
    pub const ALL: [ResponseFormat; 2] = [ResponseFormat::Json, ResponseFormat::Xml];

    /// Path segment and textual form of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }

    /// Comma-separated list of accepted formats, used in error messages
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(ResponseFormat::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = Error;

    /// Exact, case-sensitive match against `json` and `xml`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ResponseFormat::Json),
            "xml" => Ok(ResponseFormat::Xml),
            other => Err(Error::invalid_format(other)),
        }
    }
}
