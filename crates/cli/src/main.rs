//! Nexus Catalog CLI - browse the product feed from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the first page of the catalog
//! nexus-cli browse
//!
//! # Load three pages, filter and sort
//! nexus-cli browse --pages 3 --category electronics --search cable --sort asc
//!
//! # Show a single product
//! nexus-cli show 42
//! ```
//!
//! # Commands
//!
//! - `browse` - Load pages of the feed and print the derived view
//! - `show` - Fetch one product by id
//!
//! The CLI is a thin presentation layer over [`nexus_catalog::CatalogSession`];
//! it only reads the session's derived state.

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks to its user on stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use nexus_catalog::{CatalogConfig, CatalogSession, DetailStatus, HttpProductSource};
use nexus_catalog_core::{CategoryFilter, Product, SortOrder};

#[derive(Parser)]
#[command(name = "nexus-cli")]
#[command(author, version, about = "Nexus catalog browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load pages of the product feed and print the derived view
    Browse {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Only show this category (exact match)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Sort by price
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Fetch a single product by id
    Show {
        /// Product identifier
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// Cheapest first
    Asc,
    /// Most expensive first
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => Self::PriceAscending,
            SortArg::Desc => Self::PriceDescending,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogConfig::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let source = Arc::new(HttpProductSource::new(&config)?);
    let session = CatalogSession::new(source);

    match cli.command {
        Commands::Browse {
            pages,
            category,
            search,
            sort,
        } => browse(&session, pages, category, search, sort).await,
        Commands::Show { id } => show(&session, &id).await,
    }
}

async fn browse(
    session: &CatalogSession,
    pages: u32,
    category: Option<String>,
    search: Option<String>,
    sort: Option<SortArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..pages {
        match session.load_next_page().await {
            Ok(true) => {}
            // Feed exhausted before the requested page count.
            Ok(false) => break,
            Err(e) => {
                // Transient by policy: keep whatever pages already loaded.
                let loaded = session.view().await.len();
                eprintln!("connection lost ({e}); showing {loaded} loaded products");
                break;
            }
        }
    }

    if let Some(category) = category {
        session.set_category(CategoryFilter::Only(category)).await;
    }
    if let Some(search) = search {
        session.set_search(search).await;
    }
    if let Some(sort) = sort {
        session.set_sort(sort.into()).await;
    }

    let view = session.view().await;
    if view.is_empty() {
        println!("no products match the current filters");
    } else {
        for product in view.iter() {
            print_product_line(product);
        }
    }

    let categories = session.categories().await;
    if !categories.is_empty() {
        println!("\ncategories: {}", categories.join(", "));
    }
    if session.has_more().await {
        println!("more pages available (rerun with a higher --pages)");
    }

    Ok(())
}

async fn show(session: &CatalogSession, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    match session.select_product(id).await {
        DetailStatus::Ready(product) => {
            println!("{}  [{}]", product.name, product.category);
            println!("id:     {}", product.id);
            println!("price:  {}", product.price);
            println!("seller: {}", product.seller.username);
            if !product.description.is_empty() {
                println!("\n{}", product.description);
            }
            Ok(())
        }
        DetailStatus::Failed(err) => {
            eprintln!("product data unavailable: {err}");
            eprintln!("(use `nexus-cli browse` to return to the listing)");
            Err(err.into())
        }
        // select_product settles before returning.
        DetailStatus::Idle | DetailStatus::Loading => Ok(()),
    }
}

fn print_product_line(product: &Product) {
    println!(
        "{:<12} {:>10}  {:<16} {}",
        product.id, product.price, product.category, product.name
    );
}
