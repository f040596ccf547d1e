//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use turbo_storefront::csrf::CookieJar;
use turbo_storefront::{PageElements, Storefront, StorefrontConfig};

use crate::config::CONFIG_NAMES;
use crate::output::Output;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub cookie: Option<String>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Cookies sent with every request.
    pub cookies: Arc<CookieJar>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, overrides: Overrides, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            (StorefrontConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        if let Some(base_url) = overrides.base_url {
            config.base_url = base_url;
            config.validate().context("Invalid --base-url")?;
        }

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        let cookies = Arc::new(CookieJar::new(overrides.cookie.unwrap_or_default()));

        Ok(Self {
            config,
            config_path,
            cookies,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StorefrontConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Mount a storefront page with the given elements.
    pub fn storefront(&self, page: PageElements) -> Result<Storefront> {
        self.output.debug(&format!("Connecting to {}", self.config.base_url));
        Storefront::connect(&self.config, self.cookies.clone(), page)
            .context("Failed to create HTTP client")
    }
}
