//! Geocoding upstream HTTP client.
//!
//! Speaks the Nominatim search API: fixed `format=jsonv2` and
//! `addressdetails=1` parameters, caller-supplied term and limit, and an
//! identifying `user-agent` as the service's usage policy requires.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::SearchResult;
use crate::proxy::ProxyResponse;

use super::error::GeocodeError;
use super::results::parse_results;

/// Default upstream geocoding endpoint.
const DEFAULT_UPSTREAM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Identifying client header sent with every request.
const CLIENT_IDENT: &str = "station-map-server/0.1 (contact: ops@station-map.net)";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Full URL of the upstream search endpoint.
    pub upstream_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    /// Create a config pointing at the default upstream.
    pub fn new() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Point at a different upstream (env override, tests).
    pub fn with_upstream_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the geocoding upstream.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    upstream_url: String,
}

impl GeocodeClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_IDENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            upstream_url: config.upstream_url,
        })
    }

    /// Run a search and capture the response for verbatim relay.
    ///
    /// Error statuses are data here; the proxy endpoint passes them
    /// through unchanged.
    pub async fn search_raw(&self, term: &str, limit: usize) -> Result<ProxyResponse, GeocodeError> {
        let response = self.request(term, limit).await?;
        Ok(ProxyResponse::read(response).await?)
    }

    /// Run a search and parse the hits defensively.
    ///
    /// Malformed entries are dropped, not errors; see
    /// [`parse_results`](super::results::parse_results).
    pub async fn search(&self, term: &str, limit: usize) -> Result<Vec<SearchResult>, GeocodeError> {
        let response = self.request(term, limit).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        let payload = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        Ok(parse_results(&payload))
    }

    async fn request(&self, term: &str, limit: usize) -> Result<reqwest::Response, GeocodeError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(&self.upstream_url)
            .query(&[
                ("format", "jsonv2"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
                ("q", term),
            ])
            .send()
            .await?;

        Ok(response)
    }
}
