//! End-to-end flows across a mounted storefront page.

mod common;

use std::time::Duration;

use common::{mount, search_reply, settle};
use tokio::time::advance;
use turbo_data::testing::MockReply;
use turbo_storefront::prelude::*;

// === Cart ===

#[tokio::test(start_paused = true)]
async fn test_add_to_cart_updates_badge_and_toasts_then_toast_expires() {
    let page = mount(PageElements::new().with_cart_badge("4"));
    page.mock.on(
        "/orders/cart/add/",
        MockReply::json(serde_json::json!({
            "success": true, "message": "Added Matcha to cart", "cart_count": 5
        })),
    );

    let data = page.store.add_to_cart(7u64, 1).await.unwrap();
    assert_eq!(data.cart_count, Some(5));
    let body: serde_json::Value = page.mock.requests()[0].json().unwrap();
    assert_eq!(body, serde_json::json!({"product_id": 7, "quantity": 1}));
    settle().await;

    let badge = page.store.cart.badge().unwrap();
    assert_eq!(badge.text(), "5");
    assert!(badge.view().pulsing);

    let toasts = page.store.notifications.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert!(page.store.notifications.render().contains("Added Matcha to cart"));

    advance(Duration::from_millis(3000)).await;
    settle().await;
    assert!(!badge.view().pulsing);
    assert_eq!(page.store.notifications.toasts()[0].phase, ToastPhase::Fading);

    advance(Duration::from_millis(300)).await;
    settle().await;
    assert!(page.store.notifications.toasts().is_empty());
}

#[tokio::test]
async fn test_rejected_add_shows_error_and_leaves_badge() {
    let page = mount(PageElements::new().with_cart_badge("4"));
    page.mock.on(
        "/orders/cart/add/",
        MockReply::json(serde_json::json!({"success": false, "message": "Sold out"})),
    );

    page.store.add_to_cart("7", 2).await.unwrap();
    assert_eq!(page.store.cart.badge().unwrap().text(), "4");

    let toasts = page.store.notifications.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "Sold out");
}

#[tokio::test]
async fn test_mutations_carry_the_current_csrf_cookie() {
    let page = mount(PageElements::new());
    page.mock.on(
        "/orders/cart/remove/",
        MockReply::json(serde_json::json!({"success": true, "message": "Removed", "cart_count": 0})),
    );

    page.store.cart.remove("line-1").await.unwrap();
    page.cookies.set_raw("csrftoken=tok-2");
    page.store.cart.remove("line-2").await.unwrap();
    page.cookies.set_raw("");
    page.store.cart.remove("line-3").await.unwrap();

    let tokens: Vec<_> = page
        .mock
        .requests_to("/orders/cart/remove/")
        .iter()
        .map(|r| r.header("X-CSRFToken").unwrap_or("<none>").to_string())
        .collect();
    assert_eq!(tokens, vec!["tok-1", "tok-2", ""]);
}

// === Search ===

#[tokio::test(start_paused = true)]
async fn test_typing_a_word_sends_one_request_for_the_final_value() {
    let page = mount(PageElements::new().with_search());
    page.mock.on("/store/search/", MockReply::json(search_reply(&["matcha"])));
    let search = page.store.search.as_ref().unwrap();

    let mut tasks = Vec::new();
    for prefix in ["m", "ma", "mat", "matc", "matcha"] {
        tasks.extend(search.input(prefix));
        settle().await;
        advance(Duration::from_millis(80)).await;
    }
    for task in tasks {
        task.await.unwrap();
    }

    let requests = page.mock.requests_to("/store/search/");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query_param("q"), Some("matcha"));
    assert!(search.panel().visible);
    assert!(search.panel().html.contains("\u{00a5}980"));
}

#[tokio::test(start_paused = true)]
async fn test_deleting_back_to_one_char_hides_and_cancels() {
    let page = mount(PageElements::new().with_search());
    page.mock.on("/store/search/", MockReply::json(search_reply(&["sencha"])));
    let search = page.store.search.as_ref().unwrap();

    search.input("sencha").unwrap().await.unwrap();
    assert!(search.panel().visible);

    let pending = search.input("se").unwrap();
    settle().await;
    assert!(search.input("s").is_none());
    pending.await.unwrap();

    assert!(!search.panel().visible);
    assert_eq!(page.mock.requests().len(), 1);
}

// === Tracking ===

#[tokio::test]
async fn test_blank_tracking_submit_issues_nothing() {
    let page = mount(PageElements::new().with_tracking());
    let tracking = page.store.tracking.as_ref().unwrap();

    assert!(tracking.submit("  ").is_none());
    assert!(page.mock.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_resubmitting_tracking_shows_only_latest_shipment() {
    let page = mount(PageElements::new().with_tracking());
    page.mock.on_with("/tracking/ajax/", |req| {
        let number = req.query_param("tracking").unwrap_or_default().to_string();
        let delay = if number == "FIRST" { 800 } else { 10 };
        MockReply::json(serde_json::json!({
            "success": true,
            "shipment": {
                "tracking_number": number,
                "shipping_method": "air",
                "current_status": "Delivered",
                "progress": 100,
                "origin": "Yiwu",
                "destination": "Riyadh",
                "estimated_delivery": "2024-05-02"
            },
            "updates": []
        }))
        .with_delay(Duration::from_millis(delay))
    });
    let tracking = page.store.tracking.as_ref().unwrap();

    let first = tracking.submit("FIRST").unwrap();
    settle().await;
    let second = tracking.submit("SECOND").unwrap();
    second.await.unwrap();
    first.await.unwrap();
    advance(Duration::from_millis(1000)).await;
    settle().await;

    let html = tracking.panel().html;
    assert!(html.contains("SECOND"));
    assert!(!html.contains("FIRST"));
    assert!(html.contains("badge-success"));
}

// === Local widgets ===

#[tokio::test]
async fn test_faq_and_gallery_toggle_locally() {
    let mut page = mount(
        PageElements::new()
            .with_main_image("/media/1.jpg")
            .with_thumbnails(vec![
                Thumbnail::new("/media/1.jpg").with_active(),
                Thumbnail::new("/media/2.jpg"),
            ])
            .with_faq(vec![FaqItem::new(100), FaqItem::new(140)]),
    );

    let faq = page.store.faq.as_mut().unwrap();
    faq.toggle(0);
    faq.toggle(1);
    assert_eq!(faq.open_index(), Some(1));
    faq.toggle(1);
    assert_eq!(faq.open_index(), None);

    let gallery = page.store.gallery.as_mut().unwrap();
    gallery.select(1);
    assert_eq!(gallery.main_image(), "/media/2.jpg");
    assert_eq!(gallery.active_index(), Some(1));

    assert!(page.mock.requests().is_empty());
}
