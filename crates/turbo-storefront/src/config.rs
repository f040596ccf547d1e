//! Storefront client configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::StorefrontError;

/// Top-level client configuration.
///
/// Loaded from TOML (or JSON when the file name ends in `.json`); every field
/// has a default matching the storefront's stock Django routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Origin that endpoint paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total timeout for a single request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// AJAX endpoint paths.
    #[serde(default)]
    pub endpoints: Endpoints,

    /// CSRF cookie/header names.
    #[serde(default)]
    pub csrf: CsrfConfig,

    /// Search box behaviour.
    #[serde(default)]
    pub search: SearchConfig,

    /// Toast timings.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Cart badge behaviour.
    #[serde(default)]
    pub cart: CartConfig,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            endpoints: Endpoints::default(),
            csrf: CsrfConfig::default(),
            search: SearchConfig::default(),
            notifications: NotificationConfig::default(),
            cart: CartConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, StorefrontError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|e| e == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Check values that would otherwise fail at request time.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(StorefrontError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        for (name, path) in self.endpoints.iter() {
            if !path.starts_with('/') {
                return Err(StorefrontError::Config(format!(
                    "endpoint '{}' must be an absolute path, got '{}'",
                    name, path
                )));
            }
        }

        if self.csrf.cookie_name.is_empty() || self.csrf.header_name.is_empty() {
            return Err(StorefrontError::Config(
                "csrf cookie_name and header_name must not be empty".to_string(),
            ));
        }

        if self.search.min_query_chars == 0 {
            return Err(StorefrontError::Config(
                "search.min_query_chars must be at least 1".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(StorefrontError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// AJAX endpoint paths, relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_cart_add")]
    pub cart_add: String,
    #[serde(default = "default_cart_update")]
    pub cart_update: String,
    #[serde(default = "default_cart_remove")]
    pub cart_remove: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_tracking")]
    pub tracking: String,
}

fn default_cart_add() -> String {
    "/orders/cart/add/".to_string()
}

fn default_cart_update() -> String {
    "/orders/cart/update/".to_string()
}

fn default_cart_remove() -> String {
    "/orders/cart/remove/".to_string()
}

fn default_search() -> String {
    "/store/search/".to_string()
}

fn default_tracking() -> String {
    "/tracking/ajax/".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            cart_add: default_cart_add(),
            cart_update: default_cart_update(),
            cart_remove: default_cart_remove(),
            search: default_search(),
            tracking: default_tracking(),
        }
    }
}

impl Endpoints {
    /// Iterate over `(name, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("cart_add", self.cart_add.as_str()),
            ("cart_update", self.cart_update.as_str()),
            ("cart_remove", self.cart_remove.as_str()),
            ("search", self.search.as_str()),
            ("tracking", self.tracking.as_str()),
        ]
        .into_iter()
    }
}

/// CSRF cookie and header names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrfConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

fn default_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_header_name() -> String {
    "X-CSRFToken".to_string()
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            header_name: default_header_name(),
        }
    }
}

/// Search box behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a request goes out.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Shorter (trimmed) queries hide the dropdown instead of searching.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Prefix for prices in the dropdown.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_chars() -> usize {
    2
}

fn default_currency_symbol() -> String {
    "\u{00a5}".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Toast timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a toast stays fully visible.
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,

    /// Fade-out time before the toast is removed.
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

fn default_display_ms() -> u64 {
    3000
}

fn default_fade_ms() -> u64 {
    300
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl NotificationConfig {
    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Cart badge behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Length of the "bump" animation after the count changes.
    #[serde(default = "default_badge_pulse_ms")]
    pub badge_pulse_ms: u64,
}

fn default_badge_pulse_ms() -> u64 {
    200
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            badge_pulse_ms: default_badge_pulse_ms(),
        }
    }
}

impl CartConfig {
    pub fn badge_pulse(&self) -> Duration {
        Duration::from_millis(self.badge_pulse_ms)
    }
}
