//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use turbo_storefront::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("base_url", &config.base_url);
    ctx.output.kv(
        "request_timeout_secs",
        &config.request_timeout_secs.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[endpoints]");
    for (name, path) in config.endpoints.iter() {
        ctx.output.kv(name, path);
    }

    ctx.output.info("");
    ctx.output.info("[csrf]");
    ctx.output.kv("cookie_name", &config.csrf.cookie_name);
    ctx.output.kv("header_name", &config.csrf.header_name);

    ctx.output.info("");
    ctx.output.info("[search]");
    ctx.output.kv("debounce_ms", &config.search.debounce_ms.to_string());
    ctx.output
        .kv("min_query_chars", &config.search.min_query_chars.to_string());
    ctx.output.kv("currency_symbol", &config.search.currency_symbol);

    ctx.output.info("");
    ctx.output.info("[notifications]");
    ctx.output
        .kv("display_ms", &config.notifications.display_ms.to_string());
    ctx.output.kv("fade_ms", &config.notifications.fade_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output
        .kv("badge_pulse_ms", &config.cart.badge_pulse_ms.to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(&ctx.config.base_url);
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config);

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect hard errors and advisory warnings for a config.
fn check(config: &StorefrontConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = config.validate() {
        errors.push(e.to_string());
    }

    if config.base_url.starts_with("http://")
        && !config.base_url.contains("localhost")
        && !config.base_url.contains("127.0.0.1")
    {
        warnings.push("base_url uses plain http; the CSRF cookie travels unencrypted".to_string());
    }

    if config.search.debounce_ms == 0 {
        warnings.push("search.debounce_ms is 0; every keystroke will hit the server".to_string());
    }

    if config.notifications.display_ms == 0 {
        warnings.push("notifications.display_ms is 0; toasts disappear immediately".to_string());
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_clean() {
        let (errors, warnings) = check(&StorefrontConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_check_reports_errors_and_warnings() {
        let mut config = StorefrontConfig::default();
        config.base_url = "http://shop.example.com".to_string();
        config.search.debounce_ms = 0;
        let (errors, warnings) = check(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 2);

        config.endpoints.search = "store/search/".to_string();
        let (errors, _) = check(&config);
        assert_eq!(errors.len(), 1);
    }
}
