//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response, as the storefront's AJAX views return.
    pub fn from_json(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Parse the response body as JSON.
    ///
    /// The status code is not consulted; the storefront views report
    /// application failures inside the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct CartCount {
        success: bool,
        cart_count: i64,
    }

    // === Body Tests ===

    #[test]
    fn test_json_ignores_status() {
        let resp = Response::from_json(
            400,
            &serde_json::json!({"success": false, "cart_count": 2}),
        );
        let parsed: CartCount = resp.json().unwrap();
        assert_eq!(
            parsed,
            CartCount {
                success: false,
                cart_count: 2
            }
        );
    }

    #[test]
    fn test_json_rejects_html_error_page() {
        let resp = Response::new(500, HashMap::new(), b"<h1>Server Error</h1>".to_vec());
        let result: Result<CartCount, _> = resp.json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    // === Header Tests ===

    #[test]
    fn test_from_json_sets_content_type() {
        let resp = Response::from_json(200, &serde_json::json!({}));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(resp.body, b"{}");
    }
}
