//! Storefront CLI - browse the catalog and run a cart session.
//!
//! Commands:
//! - `storefront products` - List products with filters and sorting
//! - `storefront product` - Show one product
//! - `storefront categories` - List categories
//! - `storefront cart` - Replay cart operations and show the order summary
//! - `storefront login` / `register` - Sign in with the mock provider
//! - `storefront location` - Show or set the delivery location
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CartArgs, CategoriesArgs, ConfigArgs, LocationArgs, LoginArgs, ProductArgs, ProductsArgs,
    RegisterArgs,
};

/// Storefront CLI - browse products and manage a cart from the terminal
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show a product
    Product(ProductArgs),

    /// List categories
    Categories(CategoriesArgs),

    /// Replay cart operations and print the order summary
    Cart(CartArgs),

    /// Sign in
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Show or set the delivery location
    Location(LocationArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the log subscriber.
///
/// `STOREFRONT_LOG` wins over the configured level; logs go to stderr so
/// `--json` output stays clean.
fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("STOREFRONT_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(ctx.config.log_level.as_deref().unwrap_or("warn"));

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::list(args, &ctx).await,
        Commands::Product(args) => commands::products::show(args, &ctx).await,
        Commands::Categories(args) => commands::products::categories(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Register(args) => commands::auth::register(args, &ctx).await,
        Commands::Location(args) => commands::location::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
