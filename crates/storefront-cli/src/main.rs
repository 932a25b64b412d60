mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Resolve storefront product pricing from backend JSON exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the pricing view of every product in a document
    Price {
        /// Product JSON file; omit or pass `-` to read stdin
        path: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Group products by category with their pricing and public stock
    Group {
        /// Product JSON file; omit or pass `-` to read stdin
        path: Option<PathBuf>,
    },
    /// Total a cart of `{product, quantity}` lines
    Cart {
        /// Cart JSON file; omit or pass `-` to read stdin
        path: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let display = config.display();

    let output = match cli.command {
        Commands::Price { path, format } => {
            let products = storefront_core::products_from_json(&read_input(path.as_deref())?)
                .context("failed to load products")?;
            tracing::info!(count = products.len(), "resolving product pricing");
            render::price_report(&products, format, &display)?
        }
        Commands::Group { path } => {
            let products = storefront_core::products_from_json(&read_input(path.as_deref())?)
                .context("failed to load products")?;
            let groups = storefront_core::group_by_category(&products);
            tracing::info!(
                products = products.len(),
                groups = groups.len(),
                "grouped catalog"
            );
            serde_json::to_string_pretty(&groups)?
        }
        Commands::Cart { path, format } => {
            let lines = storefront_core::cart_from_json(&read_input(path.as_deref())?)
                .context("failed to load cart")?;
            let totals = storefront_core::cart_totals(&lines);
            tracing::info!(lines = lines.len(), items = totals.item_count, "totalled cart");
            render::cart_report(&totals, format, &display)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Reads the whole input document from `path`, or stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
