//! Data collection command.
//!
//! Runs the three collectors in sequence. Each collector isolates its own
//! per-item failures; a collector-level failure here is logged and the
//! remaining collectors still run.

use anyhow::Result;

use confluence_core::{AppConfig, ConfigLoader};
use confluence_data::Repositories;
use confluence_signals::collector::{
    MarketCollector, MarketCollectorConfig, OnchainCollector, OnchainCollectorConfig,
    SentimentCollector, SentimentCollectorConfig,
};

use super::{open_database, CommonArgs};

/// Klines fetched per asset per collection run.
const KLINE_FETCH_LIMIT: u32 = 500;

/// Runs the collect command.
///
/// # Errors
/// Returns an error if configuration or the database connection fails.
pub async fn run(args: CommonArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let db = open_database(&config).await?;
    let repos = Repositories::new(db.pool());
    collect_all(&config, &repos).await
}

/// Runs market, sentiment, and on-chain collection against the given repositories.
pub(crate) async fn collect_all(config: &AppConfig, repos: &Repositories) -> Result<()> {
    tracing::info!(
        "Collecting data for {} assets on {}",
        config.tracker.assets.len(),
        config.tracker.timeframe
    );

    let market = MarketCollector::new(
        MarketCollectorConfig {
            api_url: config.collectors.binance_api_url.clone(),
            assets: config.tracker.assets.clone(),
            timeframe: config.tracker.timeframe.clone(),
            limit: KLINE_FETCH_LIMIT,
        },
        repos.candles.clone(),
    );
    let candles = match market.collect().await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Market collection failed: {:#}", e);
            0
        }
    };

    let sentiment = SentimentCollector::new(
        SentimentCollectorConfig {
            api_url: config.collectors.sentiment_api_url.clone(),
            api_key: config.collectors.sentiment_api_key.clone(),
            model: config.collectors.sentiment_model.clone(),
            source: "news_api".to_string(),
        },
        repos.sentiment.clone(),
    );
    let readings = match sentiment.collect(&sample_headlines()).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Sentiment collection failed: {:#}", e);
            0
        }
    };

    let onchain = OnchainCollector::new(
        OnchainCollectorConfig {
            api_url: config.collectors.etherscan_api_url.clone(),
            api_key: config.collectors.etherscan_api_key.clone(),
            wallets: config.tracker.wallets.clone(),
        },
        repos.onchain.clone(),
    );
    let transactions = match onchain.collect().await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("On-chain collection failed: {:#}", e);
            0
        }
    };

    tracing::info!(
        "Collection finished: {} candles, {} readings, {} transactions",
        candles,
        readings,
        transactions
    );
    Ok(())
}

/// Stand-in headline feed until a live news API is wired up.
fn sample_headlines() -> Vec<String> {
    [
        "Bitcoin hits new all-time high after strong buying wave",
        "Crypto market corrects after inflation data",
        "Ethereum upgrade completed successfully, sentiment positive",
        "Regulatory uncertainty weighs on altcoins",
        "Large investors show interest in DeFi projects",
    ]
    .iter()
    .map(|h| (*h).to_string())
    .collect()
}
