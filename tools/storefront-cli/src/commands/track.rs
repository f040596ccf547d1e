//! Shipment tracking command.

use anyhow::{bail, Context as _, Result};
use turbo_storefront::sections::method_icon;
use turbo_storefront::PageElements;

use super::TrackArgs;
use crate::context::Context;
use crate::output::{progress_bar, status_badge};

/// Run the track command.
pub async fn run(args: TrackArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront(PageElements::new().with_tracking())?;
    let Some(tracking) = store.tracking else {
        bail!("Tracking is not available");
    };

    if args.html {
        // Same path as submitting the tracking form
        let Some(task) = tracking.submit(&args.number) else {
            bail!("Tracking number is required");
        };

        let spinner = ctx.output.spinner("Looking up shipment...");
        task.await.context("Tracking task failed")?;
        spinner.finish_and_clear();

        ctx.output.raw(&tracking.panel().html);
        return Ok(());
    }

    if args.number.trim().is_empty() {
        bail!("Tracking number is required");
    }

    let spinner = ctx.output.spinner("Looking up shipment...");
    let result = tracking.lookup(&args.number).await;
    spinner.finish_and_clear();
    let result = result.context("Tracking lookup failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    let Some(shipment) = &result.shipment else {
        bail!("The storefront returned no shipment");
    };

    ctx.output.header(&format!(
        "{} ({}, {})",
        shipment.tracking_number,
        shipment.shipping_method,
        method_icon(&shipment.shipping_method)
    ));
    ctx.output.kv(
        "status",
        &status_badge(&shipment.current_status, shipment.progress),
    );
    ctx.output.kv("progress", &progress_bar(shipment.progress, 30));
    ctx.output.kv(
        "route",
        &format!("{} -> {}", shipment.origin, shipment.destination),
    );
    if let Some(eta) = &shipment.estimated_delivery {
        ctx.output.kv("estimated delivery", eta);
    }

    if !result.updates.is_empty() {
        ctx.output.header("Tracking History");
        for update in &result.updates {
            ctx.output.list_item(&format!(
                "{}  {}: {} ({})",
                update.timestamp, update.status, update.description, update.location
            ));
        }
    }

    Ok(())
}
