use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::envelope::unwrap_envelope;
use crate::error::{Error, Result};
use crate::mapper::RawEvent;

/// Paquetexpress tracking history endpoint.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://cc.paquetexpress.com.mx/ptxws/rest/api/v1/guia/historico";

/// Upper bound for a single upstream call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Fixed path segment upstream expects after the tracking number.
const HISTORY_SEGMENT: &str = "@1@2@3@4@5";
const HISTORY_QUERY: &str = "source=WEBPAGE";

/// Client for the upstream tracking history endpoint.
///
/// Cloning is cheap; the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client for `base_url` with its own HTTP client.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_http_client(base_url, timeout, http)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    ///
    /// The timeout is applied per request, so it holds even when `http` was
    /// built without one.
    pub fn with_http_client(base_url: &str, timeout: Duration, http: Client) -> Result<Self> {
        let invalid = || Error::InvalidUpstreamUrl {
            url: base_url.to_string(),
        };
        let base_url = Url::parse(base_url).map_err(|_| invalid())?;
        if base_url.cannot_be_a_base() {
            return Err(invalid());
        }

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upstream URL for `tracking_number`.
    ///
    /// The tracking number becomes a single percent-encoded path segment, so
    /// it cannot escape the history path.
    pub fn history_url(&self, tracking_number: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUpstreamUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(tracking_number)
            .push(HISTORY_SEGMENT);
        url.set_query(Some(HISTORY_QUERY));
        Ok(url)
    }

    /// Fetch and unwrap the raw event history for `tracking_number`.
    pub async fn fetch_history(&self, tracking_number: &str) -> Result<Vec<RawEvent>> {
        let url = self.history_url(tracking_number)?;
        debug!(url = %url, "requesting upstream history");

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "upstream request failed");
                Error::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "upstream returned non-success status");
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        unwrap_envelope(&body).inspect_err(|e| {
            warn!(error = %e, body_len = body.len(), "failed to unwrap upstream response");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> UpstreamClient {
        UpstreamClient::new(base, DEFAULT_UPSTREAM_TIMEOUT).expect("valid base url")
    }

    #[test]
    fn history_url_matches_upstream_template() {
        let url = client(DEFAULT_UPSTREAM_URL).history_url("ABC123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cc.paquetexpress.com.mx/ptxws/rest/api/v1/guia/historico/ABC123/@1@2@3@4@5?source=WEBPAGE"
        );
    }

    #[test]
    fn history_url_handles_trailing_slash() {
        let url = client("http://localhost:9000/historico/").history_url("X1").unwrap();
        assert_eq!(url.path(), "/historico/X1/@1@2@3@4@5");
        assert_eq!(url.query(), Some("source=WEBPAGE"));
    }

    #[test]
    fn history_url_encodes_tracking_number_as_one_segment() {
        let url = client("http://localhost:9000/historico").history_url("a/b?c").unwrap();
        assert_eq!(url.path(), "/historico/a%2Fb%3Fc/@1@2@3@4@5");
        assert_eq!(url.query(), Some("source=WEBPAGE"));
    }

    #[test]
    fn base_url_query_is_replaced() {
        let url = client("http://localhost:9000/historico?x=1").history_url("X1").unwrap();
        assert_eq!(url.query(), Some("source=WEBPAGE"));
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            UpstreamClient::new("not a url", DEFAULT_UPSTREAM_TIMEOUT),
            Err(Error::InvalidUpstreamUrl { .. })
        ));
        assert!(matches!(
            UpstreamClient::new("mailto:ops@example.com", DEFAULT_UPSTREAM_TIMEOUT),
            Err(Error::InvalidUpstreamUrl { .. })
        ));
    }
}
