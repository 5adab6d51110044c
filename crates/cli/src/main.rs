//! Artisan Market CLI - Catalog and cart tools that run without a server.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! am-cli catalog
//!
//! # List one category
//! am-cli catalog --category Pottery
//!
//! # Price a cart: each id adds one unit, repeats increment
//! am-cli quote 3 3 6
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products with prices and discounts
//! - `quote` - Build a cart from product ids and print its totals

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "am-cli")]
#[command(author, version, about = "Artisan Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Build a cart from product ids and print its totals
    Quote {
        /// Product ids; repeat an id to add more than one unit
        #[arg(required = true)]
        product_ids: Vec<String>,
    },
}

fn main() {
    // Defaults to warn so command output is not interleaved with logs
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, commands::CommandError> {
    let catalog = artisan_market_core::Catalog::sample()?;

    match cli.command {
        Commands::Catalog { category } => Ok(commands::catalog::list(&catalog, category.as_deref())),
        Commands::Quote { product_ids } => {
            let quote = commands::quote::build(&catalog, &product_ids);
            for id in &quote.unknown {
                tracing::warn!(product_id = %id, "Skipping unknown product");
            }
            Ok(quote.render())
        }
    }
}
