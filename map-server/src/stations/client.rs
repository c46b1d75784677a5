//! Stations upstream HTTP client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::proxy::ProxyResponse;

use super::error::StationsError;

/// Default upstream stations endpoint.
const DEFAULT_UPSTREAM_URL: &str = "https://api.station-registry.net/v1/stations";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the stations client.
#[derive(Debug, Clone)]
pub struct StationsConfig {
    /// Full URL of the upstream stations endpoint.
    pub upstream_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl StationsConfig {
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

impl Default for StationsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the stations upstream.
///
/// The upstream takes no query parameters and no authentication; the
/// only fixed request header is `accept: application/json`.
#[derive(Debug, Clone)]
pub struct StationsClient {
    http: reqwest::Client,
    upstream_url: String,
}

impl StationsClient {
    /// Create a new stations client.
    pub fn new(config: StationsConfig) -> Result<Self, StationsError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            upstream_url: config.upstream_url,
        })
    }

    /// The configured upstream URL.
    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Fetch the upstream response for verbatim relay.
    ///
    /// Error statuses are data here, not errors: the proxy endpoint
    /// passes them through unchanged. Only transport failures error.
    pub async fn fetch_raw(&self) -> Result<ProxyResponse, StationsError> {
        let response = self.http.get(&self.upstream_url).send().await?;
        Ok(ProxyResponse::read(response).await?)
    }

    /// Fetch and parse the upstream payload for the server-side
    /// pipeline. Unlike [`fetch_raw`](Self::fetch_raw), a non-success
    /// status is an error.
    pub async fn fetch_json(&self) -> Result<Value, StationsError> {
        let response = self.http.get(&self.upstream_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationsError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StationsError::Json {
            message: e.to_string(),
        })
    }
}
