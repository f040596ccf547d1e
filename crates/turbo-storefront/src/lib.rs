//! Storefront client widgets for TurboCommerce.
//!
//! Headless counterparts of the storefront's interactive page elements:
//!
//! - **Cart**: add/update/remove over the session cart's AJAX endpoints, with
//!   a pulsing count badge and toast feedback
//! - **Search**: debounced product search feeding a results dropdown
//! - **Tracking**: shipment lookup rendering a progress card and timeline
//! - **Gallery** and **FAQ**: local toggles for product images and the
//!   accordion
//!
//! View state (toasts, badge, result panels) is published through
//! `tokio::sync::watch` channels so a renderer can subscribe to it.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use turbo_storefront::prelude::*;
//!
//! let config = StorefrontConfig::load("storefront.toml")?;
//! let cookies = Arc::new(CookieJar::new("csrftoken=abc123"));
//! let page = PageElements::new().with_cart_badge("0").with_search();
//!
//! let store = Storefront::connect(&config, cookies, page)?;
//! store.add_to_cart(42u64, 1).await;
//!
//! if let Some(search) = &store.search {
//!     search.input("matcha");
//! }
//! ```

pub mod badge;
pub mod cart;
pub mod config;
pub mod csrf;
pub mod error;
pub mod faq;
pub mod gallery;
pub mod ids;
mod latest;
pub mod logging;
pub mod notify;
pub mod page;
pub mod search;
pub mod sections;
pub mod tracking;
pub mod view;

pub use cart::step_quantity;
pub use config::StorefrontConfig;
pub use error::StorefrontError;
pub use ids::*;
pub use logging::{init_tracing, LogFormat};
pub use page::{PageElements, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::error::StorefrontError;
    pub use crate::ids::*;
    pub use crate::page::{PageElements, Storefront};

    // Widgets
    pub use crate::badge::{BadgeView, CartBadge};
    pub use crate::cart::{step_quantity, CartClient, CartResponse};
    pub use crate::faq::{FaqAccordion, FaqItem};
    pub use crate::gallery::{GalleryWidget, Thumbnail};
    pub use crate::notify::{NotificationCenter, Toast, ToastId, ToastKind, ToastPhase};
    pub use crate::search::{ClickTarget, SearchResult, SearchWidget};
    pub use crate::tracking::{TrackingResult, TrackingWidget};
    pub use crate::view::PanelView;

    // Session
    pub use crate::csrf::{CookieJar, CookieStore, CsrfProvider};
}
