//! Shipment tracking lookup panel.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use turbo_data::FetchClient;

use crate::latest::{LatestRequest, Ticket};
use crate::sections::{
    render_tracking_error, render_tracking_loading, render_tracking_result, TRACKING_LOAD_ERROR,
};
use crate::view::PanelView;
use crate::StorefrontError;

/// Shipment summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shipment {
    pub tracking_number: String,
    /// `air`, `sea` or `rail`.
    pub shipping_method: String,
    pub current_status: String,
    /// Percent complete, 0 to 100.
    pub progress: f64,
    pub origin: String,
    pub destination: String,
    pub estimated_delivery: Option<String>,
}

/// One entry in the shipment history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingUpdate {
    pub status: String,
    pub description: String,
    pub timestamp: String,
    pub location: String,
}

/// Tracking endpoint reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingResult {
    pub success: bool,
    #[serde(default)]
    pub shipment: Option<Shipment>,
    #[serde(default)]
    pub updates: Vec<TrackingUpdate>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TrackingResult {
    /// Panel markup for this reply.
    pub fn render(&self) -> String {
        match (self.success, &self.shipment) {
            (true, Some(shipment)) => render_tracking_result(shipment, &self.updates),
            (true, None) => render_tracking_error(TRACKING_LOAD_ERROR),
            (false, _) => render_tracking_error(self.error.as_deref().unwrap_or(TRACKING_LOAD_ERROR)),
        }
    }
}

struct Inner {
    client: FetchClient,
    endpoint: String,
    panel: watch::Sender<PanelView>,
    latest: LatestRequest,
}

/// Handle to the tracking form and its results panel.
#[derive(Clone)]
pub struct TrackingWidget {
    inner: Arc<Inner>,
}

impl TrackingWidget {
    pub fn new(client: FetchClient, endpoint: impl Into<String>) -> Self {
        let (panel, _) = watch::channel(PanelView::default());
        Self {
            inner: Arc::new(Inner {
                client,
                endpoint: endpoint.into(),
                panel,
                latest: LatestRequest::default(),
            }),
        }
    }

    /// Form submit with the input's current value.
    ///
    /// A blank number does nothing. Otherwise the spinner is shown at once and
    /// the returned task performs the lookup; a newer submit cancels it.
    pub fn submit(&self, value: &str) -> Option<JoinHandle<()>> {
        let number = value.trim();
        if number.is_empty() {
            return None;
        }

        let ticket = self.inner.latest.begin();
        self.inner.latest.apply_if_current(ticket.seq, || {
            self.inner
                .panel
                .send_replace(PanelView::shown(render_tracking_loading()));
        });
        tracing::debug!(seq = ticket.seq, tracking = number, "tracking lookup started");

        let inner = self.inner.clone();
        let number = number.to_string();
        Some(tokio::spawn(async move { inner.run(ticket, number).await }))
    }

    /// Look up a shipment without touching the panel.
    ///
    /// A `success: false` reply becomes [`StorefrontError::Rejected`] carrying
    /// the server's message.
    pub async fn lookup(&self, number: &str) -> Result<TrackingResult, StorefrontError> {
        let result = self.inner.fetch(number.trim()).await?;
        if !result.success {
            let message = result
                .error
                .unwrap_or_else(|| TRACKING_LOAD_ERROR.to_string());
            return Err(StorefrontError::Rejected(message));
        }
        Ok(result)
    }

    /// Current panel content.
    pub fn panel(&self) -> PanelView {
        self.inner.panel.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.inner.panel.subscribe()
    }
}

impl Inner {
    async fn run(&self, ticket: Ticket, number: String) {
        let result = tokio::select! {
            _ = ticket.token.cancelled() => {
                tracing::debug!(seq = ticket.seq, "tracking lookup superseded");
                return;
            }
            result = self.fetch(&number) => result,
        };

        let html = match result {
            Ok(result) => {
                if !result.success {
                    tracing::warn!(tracking = %number, error = ?result.error, "tracking lookup rejected");
                }
                result.render()
            }
            Err(e) => {
                tracing::error!(tracking = %number, network = e.is_network(), error = %e, "Tracking error");
                render_tracking_error(TRACKING_LOAD_ERROR)
            }
        };

        let applied = self.latest.apply_if_current(ticket.seq, || {
            self.panel.send_replace(PanelView::shown(html));
        });
        if !applied {
            tracing::debug!(seq = ticket.seq, "discarding stale tracking result");
        }
    }

    async fn fetch(&self, number: &str) -> Result<TrackingResult, StorefrontError> {
        let response = self
            .client
            .get(self.endpoint.as_str())
            .query("tracking", number)
            .accept("application/json")
            .send()
            .await?;
        Ok(response.json()?)
    }
}

impl fmt::Debug for TrackingWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingWidget")
            .field("endpoint", &self.inner.endpoint)
            .field("panel", &*self.inner.panel.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::time::advance;
    use turbo_data::testing::{MockReply, MockTransport};

    const ENDPOINT: &str = "/tracking/ajax/";

    fn widget(mock: Arc<MockTransport>) -> TrackingWidget {
        let client = FetchClient::new(mock).with_base_url("http://shop.test");
        TrackingWidget::new(client, ENDPOINT)
    }

    fn found(number: &str) -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "shipment": {
                "tracking_number": number,
                "shipping_method": "sea",
                "current_status": "In Transit",
                "progress": 50,
                "origin": "Guangzhou",
                "destination": "Dubai"
            },
            "updates": [
                {"status": "Departed", "description": "Left port", "timestamp": "2024-03-01", "location": "Guangzhou"}
            ]
        })
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    // === Submit ===

    #[tokio::test]
    async fn test_blank_submit_does_nothing() {
        let mock = Arc::new(MockTransport::new());
        let tracking = widget(mock.clone());

        assert!(tracking.submit("").is_none());
        assert!(tracking.submit("   ").is_none());
        assert!(mock.requests().is_empty());
        assert!(!tracking.panel().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_then_result() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            ENDPOINT,
            MockReply::json(found("ABG-1")).with_delay(Duration::from_millis(100)),
        );
        let tracking = widget(mock.clone());

        let task = tracking.submit(" ABG-1 ").unwrap();
        assert_eq!(tracking.panel(), PanelView::shown(render_tracking_loading()));

        task.await.unwrap();
        let panel = tracking.panel();
        assert!(panel.visible);
        assert!(panel.html.contains("ABG-1"));
        assert!(panel.html.contains("fa-ship"));
        assert_eq!(mock.requests()[0].query_param("tracking"), Some("ABG-1"));
    }

    #[tokio::test]
    async fn test_rejected_shows_server_error() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            ENDPOINT,
            MockReply::json(serde_json::json!({"success": false, "error": "Tracking number not found"})),
        );
        let tracking = widget(mock);

        tracking.submit("NOPE").unwrap().await.unwrap();
        assert_eq!(
            tracking.panel().html,
            render_tracking_error("Tracking number not found")
        );
    }

    #[tokio::test]
    async fn test_network_failure_shows_generic_error() {
        let mock = Arc::new(MockTransport::new());
        mock.on(ENDPOINT, MockReply::network_error("offline"));
        let tracking = widget(mock);

        tracking.submit("ABG-1").unwrap().await.unwrap();
        assert_eq!(tracking.panel().html, render_tracking_error(TRACKING_LOAD_ERROR));
    }

    // === Ordering ===

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_lookup_never_wins() {
        let mock = Arc::new(MockTransport::new());
        mock.on_with(ENDPOINT, |req| match req.query_param("tracking") {
            Some("OLD") => MockReply::json(found("OLD")).with_delay(Duration::from_millis(500)),
            _ => MockReply::json(found("NEW")),
        });
        let tracking = widget(mock.clone());

        let first = tracking.submit("OLD").unwrap();
        settle().await;
        let second = tracking.submit("NEW").unwrap();
        second.await.unwrap();
        first.await.unwrap();
        advance(Duration::from_millis(1000)).await;
        settle().await;

        assert_eq!(mock.requests().len(), 2);
        let html = tracking.panel().html;
        assert!(html.contains("NEW"));
        assert!(!html.contains("OLD"));
    }

    // === lookup ===

    #[tokio::test]
    async fn test_lookup_maps_rejection() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            ENDPOINT,
            MockReply::json(serde_json::json!({"success": false, "error": "Unknown"})),
        );
        let err = widget(mock).lookup("X").await.unwrap_err();
        assert!(matches!(err, StorefrontError::Rejected(ref m) if m == "Unknown"));
    }

    #[tokio::test]
    async fn test_lookup_returns_shipment() {
        let mock = Arc::new(MockTransport::new());
        mock.on(ENDPOINT, MockReply::json(found("ABG-9")));
        let result = widget(mock.clone()).lookup("ABG-9").await.unwrap();

        assert_eq!(result.shipment.unwrap().progress, 50.0);
        assert_eq!(result.updates.len(), 1);
        assert!(!widget(mock).panel().visible);
    }

    // === Rendering ===

    #[test]
    fn test_render_fallbacks() {
        let no_shipment = TrackingResult {
            success: true,
            ..Default::default()
        };
        assert_eq!(no_shipment.render(), render_tracking_error(TRACKING_LOAD_ERROR));

        let no_message = TrackingResult::default();
        assert_eq!(no_message.render(), render_tracking_error(TRACKING_LOAD_ERROR));
    }
}
