//! Fetch error types.

use thiserror::Error;

/// Failures talking to the storefront's AJAX endpoints.
///
/// Cloneable so a scripted transport can replay the same failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl FetchError {
    /// Whether the failure happened before a response was received.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FetchError::RequestError(_) | FetchError::InvalidUrl(_) | FetchError::Timeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fetch: FetchError = err.into();
        assert!(matches!(fetch, FetchError::JsonError(_)));
        assert!(!fetch.is_network());
    }

    #[test]
    fn test_is_network() {
        assert!(FetchError::Timeout.is_network());
        assert!(FetchError::RequestError("refused".into()).is_network());
        assert!(!FetchError::ParseError("bad".into()).is_network());
    }

    #[test]
    fn test_display() {
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            FetchError::ParseError("expected value".into()).to_string(),
            "Failed to parse response: expected value"
        );
    }
}
