//! Backtest command.

use std::sync::Arc;

use anyhow::Result;

use confluence_backtest::{BacktestEvaluator, BacktestReport};
use confluence_core::ConfigLoader;
use confluence_data::Repositories;

use super::{open_database, CommonArgs};

/// Runs the backtest command and prints the report.
///
/// # Errors
/// Returns an error if configuration, the database connection, or the
/// signal listing fails.
pub async fn run(args: CommonArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let db = open_database(&config).await?;
    let repos = Repositories::new(db.pool());

    let report = evaluate_signals(&repos).await?;
    println!("{report}");
    Ok(())
}

/// Evaluates all stored signals against subsequent price action.
pub(crate) async fn evaluate_signals(repos: &Repositories) -> Result<BacktestReport> {
    let evaluator = BacktestEvaluator::new(
        Arc::new(repos.candles.clone()),
        Arc::new(repos.signals.clone()),
    );
    evaluator.run().await
}
