//! Signal generation command.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use confluence_core::{AppConfig, ConfigLoader};
use confluence_data::{MarketStore, Repositories};
use confluence_signals::{ConfidenceScorer, SignalGenerator};

use super::{open_database, CommonArgs};

/// Runs the generate command.
///
/// # Errors
/// Returns an error if configuration or the database connection fails.
pub async fn run(args: CommonArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let db = open_database(&config).await?;
    let repos = Repositories::new(db.pool());

    let emitted = generate_signals(&config, &repos).await?;
    tracing::info!("Signal generation finished: {} new signals", emitted);
    Ok(())
}

/// Scores all tracked assets once and persists any emitted signals.
pub(crate) async fn generate_signals(config: &AppConfig, repos: &Repositories) -> Result<usize> {
    let market: Arc<dyn MarketStore> = Arc::new(repos.candles.clone());

    let scorer = ConfidenceScorer::new(
        market.clone(),
        Arc::new(repos.sentiment.clone()),
        Arc::new(repos.onchain.clone()),
        config.tracker.timeframe.clone(),
        config.tracker.wallets.clone(),
    );

    let generator = SignalGenerator::new(
        scorer,
        market,
        Arc::new(repos.signals.clone()),
        config.tracker.assets.clone(),
        config.tracker.timeframe.clone(),
    );

    generator.run(Utc::now()).await
}
