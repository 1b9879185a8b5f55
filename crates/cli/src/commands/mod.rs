//! CLI subcommand implementations.

pub mod backtest;
pub mod collect;
pub mod generate;
pub mod run;
pub mod setup;

use anyhow::Result;
use clap::Args;

use confluence_core::AppConfig;
use confluence_data::DatabaseClient;

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Connects to the configured database.
pub(crate) async fn open_database(config: &AppConfig) -> Result<DatabaseClient> {
    DatabaseClient::new(&config.database.url, config.database.max_connections).await
}
