//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use turbo_storefront::cart::CartResponse;
use turbo_storefront::{CartItemId, PageElements, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront(PageElements::new().with_cart_badge("0"))?;

    let response = match args.command {
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            let spinner = ctx.output.spinner(&format!("Adding {} x{}...", product_id, quantity));
            let response = store.add_to_cart(ProductId::from_attr(&product_id), quantity).await;
            spinner.finish_and_clear();
            response
        }
        CartCommand::Update { item_id, quantity } => {
            let spinner = ctx.output.spinner(&format!("Updating {}...", item_id));
            let response = store.cart.update(CartItemId::from_attr(&item_id), quantity).await;
            spinner.finish_and_clear();
            response
        }
        CartCommand::Remove { item_id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove {} from the cart?", item_id))
                    .default(true)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Removal cancelled");
                    return Ok(());
                }
            }

            let spinner = ctx.output.spinner(&format!("Removing {}...", item_id));
            let response = store.cart.remove(CartItemId::from_attr(&item_id)).await;
            spinner.finish_and_clear();
            response
        }
    };

    // Feedback exactly as the page would show it
    ctx.output.toasts(&store.notifications.toasts());

    let Some(data) = response else {
        bail!("Cart request failed; rerun with RUST_LOG=debug for details");
    };

    report(&data, ctx);

    if !data.success {
        bail!("The storefront rejected the request");
    }

    Ok(())
}

fn report(data: &CartResponse, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(data);
        return;
    }

    if let Some(count) = data.cart_count {
        ctx.output.kv("cart_count", &count.to_string());
    }
    for (key, value) in &data.extra {
        ctx.output.kv(key, &value.to_string());
    }
}
