use thiserror::Error;

/// Convenient result alias for the tracking library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream call did not complete within the configured timeout.
    #[error("upstream API timed out")]
    UpstreamTimeout,

    /// The upstream answered with a non-success HTTP status.
    #[error("upstream returned {status}")]
    UpstreamStatus { status: u16 },

    /// Connection, DNS, TLS or body read failure talking to upstream.
    #[error("upstream request failed: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    /// The body was not wrapped in the expected `Resultado(...)` envelope.
    #[error("upstream response is not a Resultado(...) envelope")]
    MalformedEnvelope,

    /// The envelope matched but its payload was not a JSON array of objects.
    #[error("upstream envelope payload is invalid: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Upstream had no record matching the requested tracking number.
    #[error("no tracking data found for {tracking_number}")]
    NotFound { tracking_number: String },

    /// The configured upstream base URL cannot carry path segments.
    #[error("invalid upstream base URL {url}")]
    InvalidUpstreamUrl { url: String },
}

impl Error {
    /// Short label used for failure metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::UpstreamTimeout => "upstream_timeout",
            Error::UpstreamStatus { .. } => "upstream_status",
            Error::UpstreamTransport(_) => "upstream_transport",
            Error::MalformedEnvelope | Error::InvalidPayload(_) => "parse_error",
            Error::NotFound { .. } => "not_found",
            Error::InvalidUpstreamUrl { .. } => "invalid_upstream_url",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::UpstreamTimeout
        } else {
            Error::UpstreamTransport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_share_a_reason() {
        let invalid = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert_eq!(Error::MalformedEnvelope.reason(), "parse_error");
        assert_eq!(Error::InvalidPayload(invalid).reason(), "parse_error");
    }

    #[test]
    fn status_error_mentions_code() {
        let err = Error::UpstreamStatus { status: 503 };
        assert_eq!(err.to_string(), "upstream returned 503");
    }
}
