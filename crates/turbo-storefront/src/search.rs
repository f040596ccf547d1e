//! Debounced product search dropdown.
//!
//! Each keystroke restarts the debounce timer. When it fires, the widget
//! queries the search endpoint and swaps the dropdown content. A reply that
//! arrives after a newer query has been issued is dropped.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use turbo_data::FetchClient;

use crate::config::SearchConfig;
use crate::latest::{LatestRequest, Ticket};
use crate::sections::{render_search_empty, render_search_results};
use crate::view::PanelView;
use crate::StorefrontError;

/// A product price as sent by the server: a JSON number or a string.
///
/// Displayed exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{}", n),
            Price::Text(s) => f.write_str(s),
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProduct {
    pub url: String,
    pub name: String,
    pub price: Price,
}

/// Search endpoint reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub products: Vec<SearchProduct>,
}

/// Where a document click landed, relative to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    SearchInput,
    SearchResults,
    Elsewhere,
}

struct Inner {
    client: FetchClient,
    endpoint: String,
    config: SearchConfig,
    panel: watch::Sender<PanelView>,
    latest: LatestRequest,
}

/// Handle to the search box and its results panel.
#[derive(Clone)]
pub struct SearchWidget {
    inner: Arc<Inner>,
}

impl SearchWidget {
    pub fn new(client: FetchClient, endpoint: impl Into<String>, config: SearchConfig) -> Self {
        let (panel, _) = watch::channel(PanelView::default());
        Self {
            inner: Arc::new(Inner {
                client,
                endpoint: endpoint.into(),
                config,
                panel,
                latest: LatestRequest::default(),
            }),
        }
    }

    /// Feed the input's current value.
    ///
    /// Supersedes any pending or in-flight search. Queries shorter than the
    /// configured minimum hide the panel and return `None`; otherwise the
    /// returned task waits out the debounce, fetches and renders.
    pub fn input(&self, value: &str) -> Option<JoinHandle<()>> {
        let query = value.trim();

        if query.chars().count() < self.inner.config.min_query_chars {
            self.inner.latest.invalidate();
            self.hide();
            return None;
        }

        let ticket = self.inner.latest.begin();
        tracing::debug!(seq = ticket.seq, query, "search scheduled");

        let inner = self.inner.clone();
        let query = query.to_string();
        Some(tokio::spawn(async move { inner.run(ticket, query).await }))
    }

    /// Document click: anything outside the input and the panel hides it.
    pub fn click(&self, target: ClickTarget) {
        if target == ClickTarget::Elsewhere {
            self.hide();
        }
    }

    /// Query the search endpoint directly, without debounce or rendering.
    pub async fn fetch(&self, query: &str) -> Result<SearchResult, StorefrontError> {
        self.inner.fetch(query).await
    }

    /// Current panel content.
    pub fn panel(&self) -> PanelView {
        self.inner.panel.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.inner.panel.subscribe()
    }

    fn hide(&self) {
        self.inner
            .panel
            .send_if_modified(|panel| std::mem::replace(&mut panel.visible, false));
    }
}

impl Inner {
    async fn run(&self, ticket: Ticket, query: String) {
        tokio::select! {
            _ = ticket.token.cancelled() => {
                tracing::debug!(seq = ticket.seq, "search debounce superseded");
                return;
            }
            _ = tokio::time::sleep(self.config.debounce()) => {}
        }

        let result = tokio::select! {
            _ = ticket.token.cancelled() => {
                tracing::debug!(seq = ticket.seq, "search request superseded");
                return;
            }
            result = self.fetch(&query) => result,
        };

        match result {
            Ok(result) => {
                let view = if result.products.is_empty() {
                    PanelView::shown(render_search_empty())
                } else {
                    PanelView::shown(render_search_results(
                        &result.products,
                        &self.config.currency_symbol,
                    ))
                };
                let applied = self.latest.apply_if_current(ticket.seq, || {
                    self.panel.send_replace(view);
                });
                if !applied {
                    tracing::debug!(seq = ticket.seq, "discarding stale search results");
                }
            }
            Err(e) => {
                tracing::error!(query = %query, network = e.is_network(), error = %e, "Search error")
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<SearchResult, StorefrontError> {
        let response = self
            .client
            .get(self.endpoint.as_str())
            .query("q", query)
            .query("ajax", "1")
            .accept("application/json")
            .send()
            .await?;
        Ok(response.json()?)
    }
}

impl fmt::Debug for SearchWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchWidget")
            .field("endpoint", &self.inner.endpoint)
            .field("panel", &*self.inner.panel.borrow())
            .finish_non_exhaustive()
    }
}
