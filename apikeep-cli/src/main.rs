use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "apikeep", about = "AI vendor API keys and the models they unlock")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List known vendors
    Vendors,
    /// Show a vendor's endpoint, probe and preset models
    Vendor(commands::vendors::VendorArgs),
    /// Resolve the models available to an API key
    Models(commands::models::ModelsArgs),
    /// Manage stored API keys
    Auth(commands::auth::AuthArgs),
    /// Print example client code for a vendor
    Template(commands::template::TemplateArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Vendors => commands::vendors::list(),
        Commands::Vendor(args) => commands::vendors::show(args),
        Commands::Models(args) => commands::models::run(args).await,
        Commands::Auth(args) => commands::auth::run(args),
        Commands::Template(args) => commands::template::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
