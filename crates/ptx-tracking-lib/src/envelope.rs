//! Unwrapping of the `Resultado(...)` JSONP envelope upstream responds with.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::mapper::RawEvent;

static ENVELOPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^Resultado\((.+)\)$").expect("envelope pattern is valid"));

/// Extract and parse the JSON array wrapped in `Resultado(...)`.
///
/// Surrounding whitespace is ignored and the payload may span several lines.
/// Text that does not match the wrapper, or whose payload is not a JSON array
/// of objects, is rejected without partial recovery.
pub fn unwrap_envelope(body: &str) -> Result<Vec<RawEvent>> {
    let captures = ENVELOPE_RE
        .captures(body.trim())
        .ok_or(Error::MalformedEnvelope)?;
    let payload = captures.get(1).ok_or(Error::MalformedEnvelope)?;

    Ok(serde_json::from_str(payload.as_str())?)
}
