//! Product search command.

use anyhow::{bail, Context as _, Result};
use turbo_storefront::PageElements;

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront(PageElements::new().with_search())?;
    let Some(search) = store.search else {
        bail!("Search is not available");
    };

    if args.html {
        // Same path as typing into the search box
        let Some(task) = search.input(&args.query) else {
            bail!(
                "Query must be at least {} characters",
                ctx.config.search.min_query_chars
            );
        };

        let spinner = ctx.output.spinner("Searching...");
        task.await.context("Search task failed")?;
        spinner.finish_and_clear();

        let panel = search.panel();
        if !panel.visible {
            bail!("Search failed; rerun with RUST_LOG=debug for details");
        }
        ctx.output.raw(&panel.html);
        return Ok(());
    }

    let spinner = ctx.output.spinner("Searching...");
    let result = search.fetch(args.query.trim()).await;
    spinner.finish_and_clear();
    let result = result.context("Search failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    if result.products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    ctx.output
        .header(&format!("{} result(s) for \"{}\"", result.products.len(), args.query.trim()));
    for product in &result.products {
        ctx.output.list_item(&format!(
            "{}  {}{}  {}",
            product.name, ctx.config.search.currency_symbol, product.price, product.url
        ));
    }

    Ok(())
}
