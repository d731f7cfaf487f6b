//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod replay;

use clap::{Args, Subcommand};
use knodi_commerce::favorites::FavoriteSort;

/// Arguments for the replay command.
#[derive(Args)]
pub struct ReplayArgs {
    /// Catalog listing (JSON array of product records).
    #[arg(short, long)]
    pub catalog: String,

    /// Session script (JSON array of steps).
    pub script: String,

    /// Order favorites: default, lowToHigh or highToLow.
    #[arg(short, long, default_value = "default")]
    pub sort: FavoriteSort,

    /// Print badge counts after every step.
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog listing (JSON array of product records).
    pub path: String,

    /// Only list products whose title contains this text.
    #[arg(short, long)]
    pub title: Option<String>,
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
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
