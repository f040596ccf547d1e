//! Shared fixtures for the page-level tests.

use std::sync::Arc;

use turbo_data::testing::MockTransport;
use turbo_storefront::csrf::CookieJar;
use turbo_storefront::{PageElements, Storefront, StorefrontConfig};

pub struct TestPage {
    pub store: Storefront,
    pub mock: Arc<MockTransport>,
    pub cookies: Arc<CookieJar>,
}

/// Mount `page` over a fresh mock transport with a `csrftoken` cookie set.
pub fn mount(page: PageElements) -> TestPage {
    let mock = Arc::new(MockTransport::new());
    let cookies = Arc::new(CookieJar::new("sessionid=s1; csrftoken=tok-1"));
    let store = Storefront::mount(
        &StorefrontConfig::default(),
        mock.clone(),
        cookies.clone(),
        page,
    );
    TestPage {
        store,
        mock,
        cookies,
    }
}

/// Let spawned timer tasks observe an advanced clock.
pub async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

pub fn search_reply(names: &[&str]) -> serde_json::Value {
    let products: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "url": format!("/store/product/{}/", name),
                "name": name,
                "price": 980,
            })
        })
        .collect();
    serde_json::json!({ "products": products })
}
