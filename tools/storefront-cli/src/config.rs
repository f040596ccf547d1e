//! CLI configuration files.

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Generate a default storefront.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Storefront client configuration

base_url = "{base_url}"
request_timeout_secs = 30

[endpoints]
cart_add = "/orders/cart/add/"
cart_update = "/orders/cart/update/"
cart_remove = "/orders/cart/remove/"
search = "/store/search/"
tracking = "/tracking/ajax/"

[csrf]
cookie_name = "csrftoken"
header_name = "X-CSRFToken"

[search]
debounce_ms = 300
min_query_chars = 2
currency_symbol = "¥"

[notifications]
display_ms = 3000
fade_ms = 300

[cart]
badge_pulse_ms = 200
"#,
        base_url = base_url
    )
}
