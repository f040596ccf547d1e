//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod search;
pub mod track;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product to the cart.
    Add {
        /// Product ID.
        product_id: String,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Set the quantity of a cart line item.
    Update {
        /// Cart item ID.
        item_id: String,
        /// New quantity.
        quantity: u32,
    },
    /// Remove a line item from the cart.
    Remove {
        /// Cart item ID.
        item_id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search query.
    pub query: String,

    /// Print the dropdown markup instead of a product list.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the track command.
#[derive(Args)]
pub struct TrackArgs {
    /// Tracking number.
    pub number: String,

    /// Print the tracking panel markup instead of a summary.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
