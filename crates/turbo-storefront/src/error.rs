//! Storefront error types.

use thiserror::Error;
use turbo_data::FetchError;

/// Errors surfaced by the storefront client.
///
/// Widgets catch these at the call site and degrade to a toast or an inline
/// error block; they only reach callers through the fallible helpers
/// (configuration, tracing setup, direct fetches).
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Network failure or malformed response.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The server answered `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The global tracing subscriber could not be installed.
    #[error("Tracing init failed: {0}")]
    Tracing(String),
}

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> Self {
        StorefrontError::Fetch(FetchError::from(e))
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(e: toml::de::Error) -> Self {
        StorefrontError::Config(e.to_string())
    }
}

impl StorefrontError {
    /// Whether the request never produced a response (refused, timed out, ...).
    pub fn is_network(&self) -> bool {
        matches!(self, StorefrontError::Fetch(e) if e.is_network())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(StorefrontError::from(FetchError::Timeout).is_network());
        assert!(!StorefrontError::from(FetchError::ParseError("x".into())).is_network());
        assert!(!StorefrontError::Rejected("Out of stock".into()).is_network());
    }

    #[test]
    fn test_toml_error_is_config() {
        let err: StorefrontError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, StorefrontError::Config(_)));
    }
}
