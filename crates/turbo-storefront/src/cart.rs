//! Cart mutation client.
//!
//! `add`, `update` and `remove` each POST a JSON body with the CSRF header and
//! read the JSON reply regardless of the HTTP status. Only `add` tells the
//! user about failures; `update` and `remove` fail silently (logged) and
//! leave it to the cart page to re-render.

use serde::{Deserialize, Serialize};
use turbo_data::FetchClient;

use crate::badge::CartBadge;
use crate::config::Endpoints;
use crate::csrf::CsrfProvider;
use crate::ids::{CartItemId, ProductId};
use crate::notify::{NotificationCenter, ToastKind};
use crate::StorefrontError;

/// Toast shown when an add-to-cart request never got a usable reply.
pub const ADD_FAILED_MESSAGE: &str = "Error adding to cart";

/// Reply from the cart endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Items in the cart after the change. The badge is left alone when absent.
    #[serde(default)]
    pub cart_count: Option<i64>,
    /// Anything else the view sends back (line totals, cart total, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
struct AddItem<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

#[derive(Serialize)]
struct UpdateItem<'a> {
    item_id: &'a CartItemId,
    quantity: u32,
}

#[derive(Serialize)]
struct RemoveItem<'a> {
    item_id: &'a CartItemId,
}

/// Client for the session cart.
#[derive(Clone, Debug)]
pub struct CartClient {
    client: FetchClient,
    csrf: CsrfProvider,
    endpoints: Endpoints,
    badge: Option<CartBadge>,
    notifications: NotificationCenter,
}

impl CartClient {
    pub fn new(
        client: FetchClient,
        csrf: CsrfProvider,
        endpoints: Endpoints,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            client,
            csrf,
            endpoints,
            badge: None,
            notifications,
        }
    }

    /// Attach the page's badge; without one, count updates are dropped.
    pub fn with_badge(mut self, badge: CartBadge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn badge(&self) -> Option<&CartBadge> {
        self.badge.as_ref()
    }

    /// Add `quantity` of a product.
    ///
    /// Success shows the server message as a success toast; a rejection shows
    /// it as an error toast; a network or parse failure shows
    /// [`ADD_FAILED_MESSAGE`] and returns `None`.
    pub async fn add(&self, product_id: impl Into<ProductId>, quantity: u32) -> Option<CartResponse> {
        let product_id = product_id.into();
        let body = AddItem {
            product_id: &product_id,
            quantity,
        };

        match self.post(&self.endpoints.cart_add, &body).await {
            Ok(data) => {
                if data.success {
                    self.update_badge(data.cart_count);
                    self.notifications.show(data.message.clone(), ToastKind::Success);
                } else {
                    tracing::warn!(%product_id, message = %data.message, "add to cart rejected");
                    self.notifications.show(data.message.clone(), ToastKind::Error);
                }
                Some(data)
            }
            Err(e) => {
                tracing::error!(%product_id, network = e.is_network(), error = %e, "Error adding to cart");
                self.notifications.show(ADD_FAILED_MESSAGE, ToastKind::Error);
                None
            }
        }
    }

    /// Set a line item's quantity. No toast either way.
    pub async fn update(&self, item_id: impl Into<CartItemId>, quantity: u32) -> Option<CartResponse> {
        let item_id = item_id.into();
        let body = UpdateItem {
            item_id: &item_id,
            quantity,
        };

        match self.post(&self.endpoints.cart_update, &body).await {
            Ok(data) => {
                if data.success {
                    self.update_badge(data.cart_count);
                }
                Some(data)
            }
            Err(e) => {
                tracing::error!(%item_id, network = e.is_network(), error = %e, "Error updating cart");
                None
            }
        }
    }

    /// Remove a line item. Success shows the server message.
    pub async fn remove(&self, item_id: impl Into<CartItemId>) -> Option<CartResponse> {
        let item_id = item_id.into();
        let body = RemoveItem { item_id: &item_id };

        match self.post(&self.endpoints.cart_remove, &body).await {
            Ok(data) => {
                if data.success {
                    self.update_badge(data.cart_count);
                    self.notifications.show(data.message.clone(), ToastKind::Success);
                }
                Some(data)
            }
            Err(e) => {
                tracing::error!(%item_id, network = e.is_network(), error = %e, "Error removing from cart");
                None
            }
        }
    }

    async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<CartResponse, StorefrontError> {
        let response = self
            .client
            .post(endpoint)
            .header(self.csrf.header_name(), self.csrf.token())
            .json(body)?
            .send()
            .await?;
        Ok(response.json()?)
    }

    fn update_badge(&self, count: Option<i64>) {
        match (&self.badge, count) {
            (Some(badge), Some(count)) => badge.set_count(count),
            (None, _) => tracing::debug!("no cart badge on this page"),
            (Some(_), None) => tracing::debug!("cart response carried no cart_count"),
        }
    }
}

/// Step a quantity input by `delta`, never going below its minimum.
///
/// Both values come straight from the input element and are read by their
/// leading integer (`"3abc"` is 3, `"2.5"` is 2). A value with no leading
/// integer, or one that reads as 0, counts as 1.
pub fn step_quantity(current: &str, min: &str, delta: i64) -> i64 {
    let current = input_number(current);
    let min = input_number(min);
    min.max(current.saturating_add(delta))
}

fn input_number(value: &str) -> i64 {
    match leading_int(value) {
        Some(0) | None => 1,
        Some(n) => n,
    }
}

/// Optional sign followed by decimal digits, after leading whitespace.
fn leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
