//! Knodi CLI - Drive the storefront state container from the terminal.
//!
//! Commands:
//! - `knodi replay` - Replay a recorded shopper session against a catalog
//! - `knodi catalog` - List the products in a catalog listing
//! - `knodi config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CatalogArgs, ConfigArgs, ReplayArgs};

/// Knodi CLI - Inspect storefront cart and favorites state
#[derive(Parser)]
#[command(name = "knodi")]
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
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session and print the resulting cart and favorites
    Replay(ReplayArgs),

    /// List the products in a catalog listing
    Catalog(CatalogArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("{:#}", e));
    }

    let result = match cli.command {
        Commands::Replay(args) => commands::replay::run(args, &ctx),
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
