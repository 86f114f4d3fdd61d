mod analytics;
mod config;
mod db;
mod format;
mod models;
mod run;
mod server;
mod service;
mod session;
mod validate;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Cli, Config, DatabaseLocation, LogFormat, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_cli(Cli::parse())?;
    init_logging(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database,
        "starting fintrack"
    );

    let db = open_database(&config.database)?;
    let ledger = service::Ledger::new(db);
    run::dispatch(&config, ledger).await
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so that
/// report output on stdout stays clean.
fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => subscriber
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}

fn open_database(location: &DatabaseLocation) -> Result<db::Database> {
    match location {
        DatabaseLocation::Memory => db::Database::open_in_memory(),
        DatabaseLocation::File(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).with_context(|| {
                    format!("Failed to create data directory: {}", dir.display())
                })?;
            }
            db::Database::open(path)
        }
    }
}
