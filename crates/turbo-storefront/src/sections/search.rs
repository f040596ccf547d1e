//! Search dropdown fragments.

use super::escape_html;
use crate::search::SearchProduct;

/// Render the dropdown entries, one link per product.
pub fn render_search_results(products: &[SearchProduct], currency_symbol: &str) -> String {
    products
        .iter()
        .map(|p| {
            format!(
                r#"<a href="{url}" class="search-result-item">
    <strong>{name}</strong>
    <span>{symbol}{price}</span>
</a>"#,
                url = escape_html(&p.url),
                name = escape_html(&p.name),
                symbol = escape_html(currency_symbol),
                price = escape_html(&p.price.to_string()),
            )
        })
        .collect()
}

/// Render the empty-result placeholder.
pub fn render_search_empty() -> String {
    r#"<div class="search-no-results">No products found</div>"#.to_string()
}
