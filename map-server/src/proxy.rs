//! Pass-through capture of an upstream response.
//!
//! Both proxies relay the upstream status and body verbatim, so the
//! clients hand the web layer this plain snapshot instead of an
//! interpreted result. Header reconstruction (default content type,
//! cache policy) happens at the relay site.

use axum::body::Bytes;

/// An upstream response captured for verbatim relay.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    /// Upstream status code, whatever it was.
    pub status: u16,

    /// Upstream `content-type`, if it sent one.
    pub content_type: Option<String>,

    /// Raw body bytes.
    pub body: Bytes,
}

impl ProxyResponse {
    /// Drain a reqwest response into a relayable snapshot.
    ///
    /// Only reading the body can fail; any status, including errors, is
    /// captured as data.
    pub async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(ProxyResponse {
            status,
            content_type,
            body,
        })
    }
}
