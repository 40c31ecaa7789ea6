//! Shopfront CLI - scriptable access to the shop backend.
//!
//! # Usage
//!
//! ```bash
//! # List products, customers, or orders
//! sf-cli products list
//! sf-cli customers list
//! sf-cli orders list
//!
//! # Create a product
//! sf-cli products create -n "Desk" -p 120.50 -s 3 -d "Oak"
//!
//! # Delete a product
//! sf-cli products delete 42
//!
//! # Talk to a different backend
//! sf-cli --base-url http://shop.internal:8000 products list
//! ```
//!
//! # Commands
//!
//! - `products` - List, create, and delete products
//! - `customers list` - List customers
//! - `orders list` - List orders
//!
//! Without `--base-url` the backend comes from `SHOPFRONT_API_BASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_storefront::api::ApiClient;
use shopfront_storefront::config::{ApiConfig, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    /// Backend base URL (overrides `SHOPFRONT_API_BASE_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Show customers
    Customers {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Show orders
    Orders {
        #[command(subcommand)]
        action: ListAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Create a new product
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price, e.g. 19.99
        #[arg(short, long)]
        price: String,

        /// Units in stock
        #[arg(short, long)]
        stock: String,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a product by ID
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// List all entries
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match cli.base_url {
        Some(url) => ApiConfig::for_base_url(&url)?,
        None => StorefrontConfig::from_env()?.api,
    };
    let api = ApiClient::new(&config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&api).await?,
            ProductAction::Create {
                name,
                price,
                stock,
                description,
            } => {
                commands::products::create(&api, name, price, stock, description).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(&api, &id).await?,
        },
        Commands::Customers {
            action: ListAction::List,
        } => commands::listings::customers(&api).await?,
        Commands::Orders {
            action: ListAction::List,
        } => commands::listings::orders(&api).await?,
    }
    Ok(())
}
