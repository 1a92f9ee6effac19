//! Vitrine CLI - drive a storefront's cart API from the terminal.
//!
//! Commands:
//! - `vitrine add` - Add a product to the cart
//! - `vitrine update` - Change a cart item's quantity
//! - `vitrine remove` - Remove a cart item
//! - `vitrine count` - Show the cart count
//! - `vitrine config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, ConfigArgs, RemoveArgs, UpdateArgs};

/// Vitrine CLI - exercise the storefront cart endpoints
#[derive(Parser)]
#[command(name = "vitrine")]
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

    /// Storefront base URL (overrides endpoints.base_url)
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Session cookie sent with every request (e.g. "session=abc123")
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Change the quantity of a cart item
    Update(UpdateArgs),

    /// Remove a cart item
    Remove(RemoveArgs),

    /// Show the number of items in the cart
    Count,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(
        cli.config.as_deref(),
        cli.server.as_deref(),
        cli.session,
        output,
    )?;

    let result = match cli.command {
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Update(args) => commands::update::run(args, &ctx).await,
        Commands::Remove(args) => commands::remove::run(args, &ctx).await,
        Commands::Count => commands::count::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
