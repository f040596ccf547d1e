//! Scripted in-memory transport.
//!
//! Replies are registered per path. Every request is recorded before its
//! reply is produced, so tests can count calls even while a delayed reply is
//! still pending.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::{FetchError, HttpTransport, Request, Response};

/// A scripted reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    outcome: Result<Response, FetchError>,
    delay: Duration,
}

impl MockReply {
    /// A JSON reply with status 200.
    pub fn json(value: serde_json::Value) -> Self {
        Self::json_with_status(200, value)
    }

    /// A JSON reply with an explicit status.
    pub fn json_with_status(status: u16, value: serde_json::Value) -> Self {
        Self {
            outcome: Ok(Response::from_json(status, &value)),
            delay: Duration::ZERO,
        }
    }

    /// A raw text reply.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            outcome: Ok(Response::new(
                status,
                HashMap::new(),
                body.into().into_bytes(),
            )),
            delay: Duration::ZERO,
        }
    }

    /// A transport-level failure (connection refused, DNS, ...).
    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(FetchError::RequestError(message.into())),
            delay: Duration::ZERO,
        }
    }

    /// Hold the reply back for `delay` (tokio time, so it honours paused clocks).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Handler = Box<dyn Fn(&Request) -> MockReply + Send + Sync>;

/// In-memory [`HttpTransport`] for tests.
#[derive(Default)]
pub struct MockTransport {
    handlers: Mutex<HashMap<String, Handler>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    /// Create a transport with no routes; unmatched paths answer 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `path` with `reply`.
    pub fn on(&self, path: impl Into<String>, reply: MockReply) {
        self.on_with(path, move |_| reply.clone());
    }

    /// Answer `path` by calling `handler` with the request.
    pub fn on_with<F>(&self, path: impl Into<String>, handler: F)
    where
        F: Fn(&Request) -> MockReply + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), Box::new(handler));
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for a given path.
    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.path() == path)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let reply = {
            let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
            match handlers.get(request.path()) {
                Some(handler) => handler(&request),
                None => MockReply::text(404, "Not Found"),
            }
        };

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.outcome
    }
}
