//! Storefront CLI - Drive the storefront client against a live shop.
//!
//! Commands:
//! - `storefront cart` - Add, update or remove cart items
//! - `storefront search` - Run a product search
//! - `storefront track` - Look up a shipment
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use turbo_storefront::LogFormat;

use commands::{CartArgs, ConfigArgs, SearchArgs, TrackArgs};

/// Storefront CLI - Exercise the storefront's cart, search and tracking endpoints
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the storefront base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Cookie header to send (e.g. "sessionid=...; csrftoken=...")
    #[arg(long, global = true)]
    cookie: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Modify the session cart
    Cart(CartArgs),

    /// Search the product catalog
    Search(SearchArgs),

    /// Look up a shipment by tracking number
    Track(TrackArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Library logs go to stderr, filtered by RUST_LOG
    if std::env::var_os("RUST_LOG").is_some() {
        let format = if cli.json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };
        if let Err(e) = turbo_storefront::init_tracing(format) {
            output.warn(&e.to_string());
        }
    }

    // Load config
    let overrides = context::Overrides {
        base_url: cli.base_url,
        cookie: cli.cookie,
    };
    let ctx = context::Context::load(cli.config.as_deref(), overrides, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Track(args) => commands::track::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
