//! Shipment tracking fragments.

use super::escape_html;
use crate::tracking::{Shipment, TrackingUpdate};

/// Message shown when the lookup itself fails.
pub const TRACKING_LOAD_ERROR: &str = "Error loading tracking information";

/// Spinner shown while a lookup is in flight.
pub fn render_tracking_loading() -> String {
    r#"<div class="spinner" style="margin: 2rem auto;"></div>"#.to_string()
}

/// Inline error block.
pub fn render_tracking_error(message: &str) -> String {
    format!(
        r#"<div class="alert alert-error">
    <i class="fas fa-exclamation-circle"></i> {}
</div>"#,
        escape_html(message)
    )
}

/// Font Awesome icon for a shipping method.
pub fn method_icon(shipping_method: &str) -> &'static str {
    match shipping_method {
        "air" => "plane",
        "sea" => "ship",
        _ => "train",
    }
}

/// Badge colour for the current status.
pub fn progress_badge(progress: f64) -> &'static str {
    if progress >= 75.0 {
        "success"
    } else {
        "gold"
    }
}

/// Render the shipment card: header, progress bar, route, ETA and timeline.
pub fn render_tracking_result(shipment: &Shipment, updates: &[TrackingUpdate]) -> String {
    let progress = shipment.progress.clamp(0.0, 100.0);

    let estimated = match &shipment.estimated_delivery {
        Some(eta) => format!(
            r#"<div class="mb-lg">
        <p style="color: var(--text-muted); font-size: 0.85rem;">Estimated Delivery</p>
        <p style="font-weight: 600; color: var(--teal);">{}</p>
    </div>"#,
            escape_html(eta)
        ),
        None => String::new(),
    };

    let timeline: String = updates
        .iter()
        .enumerate()
        .map(|(index, update)| render_timeline_item(update, index + 1 < updates.len()))
        .collect();

    format!(
        r#"<div class="card card-glass" style="padding: 2rem;">
    <div class="flex justify-between items-center mb-lg" style="flex-wrap: wrap; gap: 1rem;">
        <div>
            <h3 style="color: var(--gold-light);">
                <i class="fas fa-{icon}"></i>
                {tracking_number}
            </h3>
            <p style="color: var(--text-secondary);">{method}</p>
        </div>
        <div class="badge badge-{badge}">
            {status}
        </div>
    </div>
    <div class="tracking-progress" style="background: var(--bg-card); border-radius: 10px; height: 8px; margin-bottom: 2rem; overflow: hidden;">
        <div style="background: var(--gold-gradient); height: 100%; width: {progress}%; transition: width 1s ease;"></div>
    </div>
    <div class="flex justify-between mb-lg" style="flex-wrap: wrap; gap: 1rem;">
        <div>
            <p style="color: var(--text-muted); font-size: 0.85rem;">From</p>
            <p style="font-weight: 600;">{origin}</p>
        </div>
        <div style="text-align: center;">
            <i class="fas fa-arrow-right" style="color: var(--gold-light);"></i>
        </div>
        <div style="text-align: right;">
            <p style="color: var(--text-muted); font-size: 0.85rem;">To</p>
            <p style="font-weight: 600;">{destination}</p>
        </div>
    </div>
    {estimated}
    <h4 class="mb-md">Tracking History</h4>
    <div class="tracking-timeline">
        {timeline}
    </div>
</div>"#,
        icon = method_icon(&shipment.shipping_method),
        tracking_number = escape_html(&shipment.tracking_number),
        method = escape_html(&shipment.shipping_method),
        badge = progress_badge(shipment.progress),
        status = escape_html(&shipment.current_status),
        progress = progress,
        origin = escape_html(&shipment.origin),
        destination = escape_html(&shipment.destination),
        estimated = estimated,
        timeline = timeline,
    )
}

fn render_timeline_item(update: &TrackingUpdate, has_next: bool) -> String {
    // Every entry except the last draws the connector line down to the next one.
    let (item_style, dot_style) = if has_next {
        (
            " border-left: 2px solid var(--gold-primary); margin-left: 9px; padding-left: 1.5rem;",
            " margin-left: -2.1rem;",
        )
    } else {
        ("", "")
    };

    format!(
        r#"<div class="timeline-item" style="display: flex; gap: 1rem; padding-bottom: 1rem;{item_style}">
            <div style="width: 20px; height: 20px; background: var(--gold-gradient); border-radius: 50%; flex-shrink: 0;{dot_style}"></div>
            <div>
                <p style="font-weight: 600;">{status}</p>
                <p style="color: var(--text-secondary); font-size: 0.9rem;">{description}</p>
                <p style="color: var(--text-muted); font-size: 0.8rem;">{timestamp} - {location}</p>
            </div>
        </div>"#,
        item_style = item_style,
        dot_style = dot_style,
        status = escape_html(&update.status),
        description = escape_html(&update.description),
        timestamp = escape_html(&update.timestamp),
        location = escape_html(&update.location),
    )
}
