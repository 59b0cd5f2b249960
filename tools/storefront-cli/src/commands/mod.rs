//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod config;
pub mod location;
pub mod products;

use clap::{Args, Subcommand};
use storefront_commerce::catalog::{Availability, PriceRange, SortOption};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Free-text search over name, description and tags.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Price bucket: under-100, 100-500, 500-1000, over-1000. Repeatable.
    #[arg(short, long = "price")]
    pub prices: Vec<PriceRange>,

    /// in-stock or out-of-stock. Repeatable.
    #[arg(short, long)]
    pub availability: Vec<Availability>,

    /// featured, price-low, price-high, name-asc, name-desc or rating.
    #[arg(long, default_value = "featured")]
    pub sort: SortOption,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Only featured categories.
    #[arg(long)]
    pub featured: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Operations to replay on a fresh cart, in order:
    /// `add:<id>[=<qty>]`, `remove:<id>`, `update:<id>=<qty>`, `clear`.
    pub ops: Vec<String>,

    /// Print each intermediate state.
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Email address.
    pub email: String,

    /// Password. Prompted for when omitted.
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Password. Prompted for when omitted.
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the location command.
#[derive(Args)]
pub struct LocationArgs {
    #[command(subcommand)]
    pub command: LocationCommand,
}

#[derive(Subcommand)]
pub enum LocationCommand {
    /// Show the saved delivery location.
    Show,
    /// Save a delivery location.
    Set {
        /// Street address.
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        /// Nearby landmark.
        #[arg(long)]
        landmark: Option<String>,
        /// Latitude, requires --lng.
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude, requires --lat.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },
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
    /// Write a storefront.toml with the defaults.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
