//! Page mounting.
//!
//! A page declares which elements it contains; mounting wires up a widget for
//! each one that is present. Missing elements simply leave that widget out.

use std::sync::Arc;

use turbo_data::{FetchClient, HttpTransport, ReqwestTransport};

use crate::badge::CartBadge;
use crate::cart::{CartClient, CartResponse};
use crate::config::StorefrontConfig;
use crate::csrf::{CookieStore, CsrfProvider};
use crate::faq::{FaqAccordion, FaqItem};
use crate::gallery::{GalleryWidget, Thumbnail};
use crate::ids::ProductId;
use crate::notify::NotificationCenter;
use crate::search::SearchWidget;
use crate::tracking::TrackingWidget;
use crate::StorefrontError;

/// The widget-bearing elements found on a page.
///
/// # Example
///
/// ```rust,ignore
/// let page = PageElements::new()
///     .with_cart_badge("2")
///     .with_search()
///     .with_faq(vec![FaqItem::new(120), FaqItem::new(96)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    /// Text of `#cartBadge`.
    pub cart_badge: Option<String>,
    /// `#searchInput` and `#searchResults`.
    pub search: bool,
    /// `#trackingForm`, `#trackingInput` and `#trackingResults`.
    pub tracking: bool,
    /// `src` of `#mainProductImage`.
    pub main_image: Option<String>,
    /// `.product-thumb` elements.
    pub thumbnails: Vec<Thumbnail>,
    /// `.faq-item` elements.
    pub faq: Vec<FaqItem>,
}

impl PageElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cart_badge(mut self, text: impl Into<String>) -> Self {
        self.cart_badge = Some(text.into());
        self
    }

    pub fn with_search(mut self) -> Self {
        self.search = true;
        self
    }

    pub fn with_tracking(mut self) -> Self {
        self.tracking = true;
        self
    }

    pub fn with_main_image(mut self, src: impl Into<String>) -> Self {
        self.main_image = Some(src.into());
        self
    }

    pub fn with_thumbnails(mut self, thumbnails: Vec<Thumbnail>) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    pub fn with_faq(mut self, items: Vec<FaqItem>) -> Self {
        self.faq = items;
        self
    }
}

/// All widgets mounted on one page.
#[derive(Debug)]
pub struct Storefront {
    pub cart: CartClient,
    pub notifications: NotificationCenter,
    pub search: Option<SearchWidget>,
    pub tracking: Option<TrackingWidget>,
    pub gallery: Option<GalleryWidget>,
    pub faq: Option<FaqAccordion>,
}

impl Storefront {
    /// Mount widgets over an explicit transport.
    pub fn mount(
        config: &StorefrontConfig,
        transport: Arc<dyn HttpTransport>,
        cookies: Arc<dyn CookieStore>,
        page: PageElements,
    ) -> Self {
        let client = FetchClient::new(transport).with_base_url(config.base_url.as_str());
        let notifications = NotificationCenter::new(&config.notifications);
        let csrf = CsrfProvider::new(
            cookies,
            config.csrf.cookie_name.as_str(),
            config.csrf.header_name.as_str(),
        );

        let mut cart = CartClient::new(
            client.clone(),
            csrf,
            config.endpoints.clone(),
            notifications.clone(),
        );
        if let Some(text) = page.cart_badge {
            cart = cart.with_badge(CartBadge::new(text, config.cart.badge_pulse()));
        }

        let search = page.search.then(|| {
            SearchWidget::new(
                client.clone(),
                config.endpoints.search.as_str(),
                config.search.clone(),
            )
        });
        let tracking = page
            .tracking
            .then(|| TrackingWidget::new(client.clone(), config.endpoints.tracking.as_str()));
        let gallery = page
            .main_image
            .and_then(|main| GalleryWidget::new(main, page.thumbnails));
        let faq = FaqAccordion::new(page.faq);

        tracing::debug!(
            base_url = %config.base_url,
            badge = cart.badge().is_some(),
            search = search.is_some(),
            tracking = tracking.is_some(),
            gallery = gallery.is_some(),
            faq = faq.is_some(),
            "storefront mounted"
        );

        Self {
            cart,
            notifications,
            search,
            tracking,
            gallery,
            faq,
        }
    }

    /// Mount widgets talking HTTP to `config.base_url`.
    pub fn connect(
        config: &StorefrontConfig,
        cookies: Arc<dyn CookieStore>,
        page: PageElements,
    ) -> Result<Self, StorefrontError> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::mount(config, Arc::new(transport), cookies, page))
    }

    /// The page's add-to-cart button.
    pub async fn add_to_cart(
        &self,
        product_id: impl Into<ProductId>,
        quantity: u32,
    ) -> Option<CartResponse> {
        self.cart.add(product_id, quantity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csrf::CookieJar;
    use turbo_data::testing::MockTransport;

    fn mount(page: PageElements) -> Storefront {
        Storefront::mount(
            &StorefrontConfig::default(),
            Arc::new(MockTransport::new()),
            Arc::new(CookieJar::default()),
            page,
        )
    }

    #[tokio::test]
    async fn test_bare_page_mounts_only_cart() {
        let store = mount(PageElements::new());
        assert!(store.cart.badge().is_none());
        assert!(store.search.is_none());
        assert!(store.tracking.is_none());
        assert!(store.gallery.is_none());
        assert!(store.faq.is_none());
    }

    #[tokio::test]
    async fn test_full_page_mounts_everything() {
        let store = mount(
            PageElements::new()
                .with_cart_badge("3")
                .with_search()
                .with_tracking()
                .with_main_image("/media/a.jpg")
                .with_thumbnails(vec![Thumbnail::new("/media/a.jpg")])
                .with_faq(vec![FaqItem::new(10)]),
        );
        assert_eq!(store.cart.badge().unwrap().text(), "3");
        assert!(store.search.is_some());
        assert!(store.tracking.is_some());
        assert!(store.gallery.is_some());
        assert!(store.faq.is_some());
    }

    #[tokio::test]
    async fn test_gallery_needs_main_image_and_thumbnails() {
        let thumbs_only = mount(PageElements::new().with_thumbnails(vec![Thumbnail::new("/a")]));
        assert!(thumbs_only.gallery.is_none());

        let image_only = mount(PageElements::new().with_main_image("/a"));
        assert!(image_only.gallery.is_none());
    }
}
