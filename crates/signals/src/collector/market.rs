//! Binance market data collector.
//!
//! Pulls spot klines for every tracked asset and stores them as candles.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::str::FromStr;

use confluence_data::{CandleRecord, CandleRepository};

/// Configuration for the market data collector.
#[derive(Debug, Clone)]
pub struct MarketCollectorConfig {
    /// Binance REST base URL
    pub api_url: String,
    /// Trading pairs in exchange notation (e.g. "BTC/USDT")
    pub assets: Vec<String>,
    /// Candle interval (e.g. "1h")
    pub timeframe: String,
    /// Klines fetched per asset per run
    pub limit: u32,
}

pub struct MarketCollector {
    config: MarketCollectorConfig,
    client: reqwest::Client,
    repo: CandleRepository,
}

impl MarketCollector {
    /// Creates a collector writing through the given repository.
    #[must_use]
    pub fn new(config: MarketCollectorConfig, repo: CandleRepository) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            repo,
        }
    }

    /// Collects candles for all configured assets.
    ///
    /// A failing asset is logged and skipped.
    ///
    /// # Returns
    /// The number of new candles stored across all assets.
    pub async fn collect(&self) -> Result<u64> {
        let mut stored = 0u64;

        for asset in &self.config.assets {
            match self.collect_asset(asset).await {
                Ok(count) => {
                    tracing::info!("Stored {} new candles for {}", count, asset);
                    stored += count;
                }
                Err(e) => {
                    tracing::error!("Failed to collect market data for {}: {:#}", asset, e);
                }
            }
        }

        Ok(stored)
    }

    async fn collect_asset(&self, asset: &str) -> Result<u64> {
        // Binance uses "BTCUSDT" where we track "BTC/USDT".
        let symbol = asset.replace('/', "");
        let url = format!("{}/api/v3/klines", self.config.api_url);

        let rows: Vec<Vec<JsonValue>> = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", self.config.timeframe.clone()),
                ("limit", self.config.limit.to_string()),
            ])
            .send()
            .await
            .context("Klines request failed")?
            .error_for_status()
            .context("Klines request rejected")?
            .json()
            .await
            .context("Failed to parse klines response")?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(parse_kline(asset, &self.config.timeframe, row)?);
        }

        self.repo.insert_batch(&records).await
    }
}

/// Parses one kline row: `[open_time_ms, open, high, low, close, volume, ...]`
/// with prices and volume as decimal strings.
fn parse_kline(asset: &str, timeframe: &str, row: &[JsonValue]) -> Result<CandleRecord> {
    let open_time = row
        .first()
        .and_then(JsonValue::as_i64)
        .ok_or_else(|| anyhow!("kline row missing open time"))?;
    let timestamp: DateTime<Utc> = DateTime::from_timestamp_millis(open_time)
        .ok_or_else(|| anyhow!("kline open time {} out of range", open_time))?;

    Ok(CandleRecord {
        timestamp,
        asset: asset.to_string(),
        timeframe: timeframe.to_string(),
        open: decimal_field(row, 1)?,
        high: decimal_field(row, 2)?,
        low: decimal_field(row, 3)?,
        close: decimal_field(row, 4)?,
        volume: decimal_field(row, 5)?,
    })
}

fn decimal_field(row: &[JsonValue], index: usize) -> Result<Decimal> {
    let raw = row
        .get(index)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| anyhow!("kline row missing field {}", index))?;
    Decimal::from_str(raw).with_context(|| format!("invalid decimal in kline field {index}"))
}
