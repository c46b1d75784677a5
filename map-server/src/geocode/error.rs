//! Geocoding upstream error types.

/// Errors from the geocoding upstream client.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with an error status
    #[error("upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Failed to parse the response body as JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::Upstream {
            status: 429,
            message: "Too Many Requests".into(),
        };
        assert_eq!(err.to_string(), "upstream error 429: Too Many Requests");
    }
}
