use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mockable::{DefaultClock, DefaultEnv};
use tracing_subscriber::EnvFilter;
use userbase_core::Config;
use userbase_service::{TracingEventSink, UserService};
use userbase_storage::StorageBackend;
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(name = "userbase")]
#[command(about = "User registration and lookup service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Create the database schema and exit
    Migrate,
    /// Print a stored user as JSON
    Get { id: Uuid },
}

pub(crate) fn load_config() -> Result<Config> {
    Config::from_env(&DefaultEnv::new()).context("failed to load configuration")
}

pub(crate) async fn connect(config: &Config) -> Result<StorageBackend> {
    let backend = StorageBackend::connect(config).await.context("failed to open storage")?;
    tracing::info!(backend = backend.kind(), "storage ready");
    Ok(backend)
}

pub(crate) fn build_service(storage: StorageBackend) -> UserService {
    UserService::new(Arc::new(storage), Arc::new(TracingEventSink), Arc::new(DefaultClock))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Get { id } => commands::get::run(id).await?,
    }

    Ok(())
}
