//! Async HTTP fetch layer for the TurboCommerce storefront client.
//!
//! Provides a small builder API on top of a pluggable [`HttpTransport`], with
//! automatic JSON handling.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use turbo_data::{FetchClient, ReqwestTransport};
//!
//! let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(30))?);
//! let client = FetchClient::new(transport).with_base_url("https://shop.example.com");
//!
//! let results: serde_json::Value = client
//!     .get("/store/search/")
//!     .query("q", "green tea")
//!     .query("ajax", "1")
//!     .send()
//!     .await?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, ReqwestTransport};

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a new HTTP client over a transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: self.transport.clone(),
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    transport: Arc<dyn HttpTransport>,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build();
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            query = ?request.query,
            "sending request"
        );
        let response = self.transport.send(request).await?;
        tracing::debug!(
            status = response.status,
            content_type = response.header("Content-Type").unwrap_or(""),
            "received response"
        );
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, HttpTransport, Method, Request, Response};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockReply, MockTransport};

    fn client(mock: Arc<MockTransport>) -> FetchClient {
        FetchClient::new(mock).with_base_url("http://shop.test/")
    }

    #[tokio::test]
    async fn test_base_url_is_prepended() {
        let mock = Arc::new(MockTransport::new());
        mock.on("/store/search/", MockReply::json(serde_json::json!({"products": []})));

        let resp = client(mock.clone()).get("/store/search/").send().await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(mock.requests()[0].url, "http://shop.test/store/search/");
    }

    #[tokio::test]
    async fn test_absolute_url_bypasses_base() {
        let mock = Arc::new(MockTransport::new());
        let _ = client(mock.clone())
            .get("https://cdn.test/asset.json")
            .send()
            .await;
        assert_eq!(mock.requests()[0].url, "https://cdn.test/asset.json");
    }

    #[tokio::test]
    async fn test_default_headers_are_sent() {
        let mock = Arc::new(MockTransport::new());
        let client = client(mock.clone()).with_default_header("X-Requested-With", "XMLHttpRequest");

        let _ = client
            .post("/orders/cart/remove/")
            .header("X-CSRFToken", "tok")
            .json(&serde_json::json!({"item_id": 3}))
            .unwrap()
            .send()
            .await;

        let sent = &mock.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.header("x-requested-with"), Some("XMLHttpRequest"));
        assert_eq!(sent.header("X-CSRFToken"), Some("tok"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
    }
}
