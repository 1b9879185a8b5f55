//! Schema setup command.

use anyhow::Result;

use confluence_core::ConfigLoader;

use super::{open_database, CommonArgs};

/// Runs the setup command: connect and apply the idempotent schema.
///
/// # Errors
/// Returns an error if the database is unreachable or DDL fails.
pub async fn run(args: CommonArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let db = open_database(&config).await?;
    db.ensure_schema().await?;
    tracing::info!("Database setup finished");
    Ok(())
}
