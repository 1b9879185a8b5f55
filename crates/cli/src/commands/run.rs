//! Full pipeline command: setup, collect, generate, backtest.

use anyhow::Result;

use confluence_core::ConfigLoader;
use confluence_data::Repositories;

use super::{backtest, collect, generate, open_database, CommonArgs};

/// Runs one complete cycle.
///
/// # Errors
/// Returns an error if configuration, the database connection, or schema
/// setup fails. Collection and generation isolate their own per-item
/// failures.
pub async fn run(args: CommonArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let db = open_database(&config).await?;
    db.ensure_schema().await?;

    let repos = Repositories::new(db.pool());

    collect::collect_all(&config, &repos).await?;

    let emitted = generate::generate_signals(&config, &repos).await?;
    tracing::info!("Signal generation finished: {} new signals", emitted);

    let report = backtest::evaluate_signals(&repos).await?;
    println!("{report}");

    tracing::info!("Cycle finished");
    Ok(())
}
