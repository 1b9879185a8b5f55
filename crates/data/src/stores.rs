//! Store contracts consumed by the scoring and backtest components.
//!
//! Components receive these as explicit dependencies so tests can swap the
//! sqlx repositories for in-memory fakes.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{CandleRecord, SignalRecord};

#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Up to `limit` most recent candles for (asset, timeframe), returned in
    /// chronological order.
    async fn recent_candles(
        &self,
        asset: &str,
        timeframe: &str,
        limit: i64,
    ) -> Result<Vec<CandleRecord>>;

    /// All candles for the asset strictly after `after`, ascending.
    async fn candles_after(&self, asset: &str, after: DateTime<Utc>)
        -> Result<Vec<CandleRecord>>;

    /// The most recent candle for (asset, timeframe), if any exists.
    async fn latest_candle(&self, asset: &str, timeframe: &str) -> Result<Option<CandleRecord>>;
}

#[async_trait]
pub trait SentimentStore: Send + Sync {
    /// Scores of all readings with timestamp at or after `since`.
    async fn scores_since(&self, since: DateTime<Utc>) -> Result<Vec<f64>>;
}

#[async_trait]
pub trait OnchainStore: Send + Sync {
    /// Count of positive-value transfers into any monitored wallet at or
    /// after `since`.
    async fn count_incoming_since(&self, since: DateTime<Utc>, wallets: &[String]) -> Result<i64>;
}

#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Persists a signal and returns its assigned id.
    async fn insert(&self, signal: &SignalRecord) -> Result<i64>;

    /// All signals ordered by timestamp ascending.
    async fn list_chronological(&self) -> Result<Vec<SignalRecord>>;
}
