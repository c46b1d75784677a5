//! Stations upstream error types.

/// Errors from the stations upstream client.
#[derive(Debug, thiserror::Error)]
pub enum StationsError {
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
        let err = StationsError::Upstream {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "upstream error 503: Service Unavailable");

        let err = StationsError::Json {
            message: "expected value".into(),
        };
        assert!(err.to_string().contains("JSON parse error"));
    }
}
