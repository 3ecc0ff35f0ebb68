//! Response status extraction
//!
//! The Geocoding API reports its outcome inside the body, not in the HTTP
//! status line. Both formats carry a single top-level status:
//!
//! ```text
//! json: { "results": [...], "status": "OK" }
//! xml:  <GeocodeResponse><status>OK</status>...</GeocodeResponse>
//! ```
//!
//! `OK` and `ZERO_RESULTS` are successes. Everything else is an API error.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::fmt;

use crate::error::{Error, Result};
use crate::format::ResponseFormat;

/// Status code embedded in a Geocoding API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    /// At least one result was found
    Ok,
    /// The request was valid but matched nothing
    ZeroResults,
    /// Any other status (`OVER_QUERY_LIMIT`, `REQUEST_DENIED`, ...)
    Error(String),
}

impl ApiStatus {
    /// Classify a raw status string
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => ApiStatus::Ok,
            "ZERO_RESULTS" => ApiStatus::ZeroResults,
            other => ApiStatus::Error(other.to_string()),
        }
    }

    /// Whether the status counts as a successful call
    pub fn is_success(&self) -> bool {
        !matches!(self, ApiStatus::Error(_))
    }

    /// The status exactly as the API spells it
    pub fn as_str(&self) -> &str {
        match self {
            ApiStatus::Ok => "OK",
            ApiStatus::ZeroResults => "ZERO_RESULTS",
            ApiStatus::Error(status) => status,
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful response together with its parsed status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeResponse {
    /// Raw body, unchanged
    pub body: String,
    /// Parsed status (`Ok` or `ZeroResults`)
    pub status: ApiStatus,
    /// Format of the body
    pub format: ResponseFormat,
}

impl GeocodeResponse {
    /// Whether the API found no match for the address
    pub fn is_empty(&self) -> bool {
        self.status == ApiStatus::ZeroResults
    }
}

/// Extract the status from a response body
///
/// # Errors
///
/// [`Error::MalformedResponse`] if the body cannot be decoded as `format`
/// or carries no status.
pub fn parse_status(body: &str, format: ResponseFormat) -> Result<ApiStatus> {
    let status = match format {
        ResponseFormat::Json => json_status(body)?,
        ResponseFormat::Xml => xml_status(body)?,
    };
    Ok(ApiStatus::parse(&status))
}

/// Extract the status and fail unless it is `OK` or `ZERO_RESULTS`
///
/// # Errors
///
/// [`Error::MalformedResponse`] as for [`parse_status`], and
/// [`Error::Api`] carrying the status for any other value.
pub fn check_response(body: &str, format: ResponseFormat) -> Result<ApiStatus> {
    match parse_status(body, format)? {
        ApiStatus::Error(status) => Err(Error::api(status)),
        status => Ok(status),
    }
}

fn json_status(body: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::malformed(ResponseFormat::Json, e.to_string()))?;

    let object = json
        .as_object()
        .ok_or_else(|| Error::malformed(ResponseFormat::Json, "body is not a JSON object"))?;

    let status = object
        .get("status")
        .ok_or_else(|| Error::malformed(ResponseFormat::Json, "missing 'status' field"))?;

    status
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::malformed(ResponseFormat::Json, "'status' is not a string"))
}

/// Text of the first `<status>` element directly under the root
///
/// The whole document is read so that trailing garbage is still reported.
fn xml_status(body: &str) -> Result<String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut inside_status = false;
    let mut current = String::new();
    let mut status: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if depth == 0 && saw_root {
                    return Err(second_root(&reader));
                }
                if depth == 1 && status.is_none() && e.local_name().as_ref() == b"status" {
                    inside_status = true;
                    current.clear();
                }
                depth += 1;
                saw_root = true;
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 && saw_root {
                    return Err(second_root(&reader));
                }
                if depth == 1 && status.is_none() && e.local_name().as_ref() == b"status" {
                    status = Some(String::new());
                }
                saw_root = true;
            }
            Ok(Event::Text(e)) => {
                if depth == 0 {
                    return Err(Error::malformed(
                        ResponseFormat::Xml,
                        format!(
                            "text outside the root element at position {}",
                            reader.buffer_position()
                        ),
                    ));
                }
                if inside_status {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::malformed(ResponseFormat::Xml, e.to_string()))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if inside_status {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|e| Error::malformed(ResponseFormat::Xml, e.to_string()))?;
                    current.push_str(text);
                }
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                if inside_status && depth == 1 && e.local_name().as_ref() == b"status" {
                    inside_status = false;
                    status = Some(current.trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::malformed(
                    ResponseFormat::Xml,
                    format!("{} at position {}", e, reader.buffer_position()),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::malformed(ResponseFormat::Xml, "document has no root element"));
    }
    if depth != 0 {
        return Err(Error::malformed(
            ResponseFormat::Xml,
            "unexpected end of document",
        ));
    }

    status.ok_or_else(|| Error::malformed(ResponseFormat::Xml, "missing <status> element"))
}

fn second_root(reader: &Reader<&[u8]>) -> Error {
    Error::malformed(
        ResponseFormat::Xml,
        format!(
            "extra content after the root element at position {}",
            reader.buffer_position()
        ),
    )
}
