//! HBnB API server
//!
//! ```text
//! hbnb [--config <path>]
//! ```
//!
//! The config path may also come from `HBNB_CONFIG`. `RUST_LOG` takes
//! precedence over the configured log filter.

use anyhow::{Context, Result};
use clap::Parser;
use hbnb::config::{AppConfig, StorageBackend};
use hbnb::server::ServerBuilder;
use hbnb::services::HbnbFacade;
use tracing_subscriber::EnvFilter;

/// HBnB API server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "HBNB_CONFIG")]
    config: Option<String>,
}

async fn build_facade(config: &AppConfig) -> Result<HbnbFacade> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage");
            Ok(HbnbFacade::in_memory())
        }
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            use hbnb::storage::sqlite::{connect, ensure_schema};

            let pool = connect(&config.storage.database_url).await?;
            ensure_schema(&pool).await?;
            tracing::info!(database_url = %config.storage.database_url, "using sqlite storage");
            Ok(HbnbFacade::sqlite(pool))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => {
            anyhow::bail!("sqlite storage requested but hbnb was built without the `sqlite` feature")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(environment = ?config.environment, "starting hbnb");

    let facade = build_facade(&config).await?;
    let keys = config.jwt_keys()?;

    ServerBuilder::new()
        .with_facade(facade)
        .with_jwt_keys(keys)
        .serve(&config.bind_address())
        .await
}
