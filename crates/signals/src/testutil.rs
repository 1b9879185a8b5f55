//! In-memory store fakes for scorer and generator tests.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use confluence_data::{
    CandleRecord, MarketStore, OnchainStore, SentimentStore, SignalRecord, SignalStore,
};

pub fn candle(asset: &str, timeframe: &str, timestamp: DateTime<Utc>, close: Decimal) -> CandleRecord {
    CandleRecord {
        timestamp,
        asset: asset.to_string(),
        timeframe: timeframe.to_string(),
        open: close,
        high: close,
        low: close,
        close,
        volume: Decimal::ONE,
    }
}

pub struct FakeMarket {
    candles: Vec<CandleRecord>,
}

impl FakeMarket {
    pub fn empty() -> Self {
        Self { candles: vec![] }
    }

    /// Hourly candles ending at 2026-07-01 00:00 + len hours, one per close.
    pub fn from_closes(asset: &str, timeframe: &str, closes: &[f64]) -> Self {
        let base = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                candle(
                    asset,
                    timeframe,
                    base + Duration::hours(i64::try_from(i).unwrap()),
                    Decimal::try_from(*close).unwrap(),
                )
            })
            .collect();
        Self { candles }
    }
}

#[async_trait]
impl MarketStore for FakeMarket {
    async fn recent_candles(
        &self,
        asset: &str,
        timeframe: &str,
        limit: i64,
    ) -> Result<Vec<CandleRecord>> {
        let matching: Vec<CandleRecord> = self
            .candles
            .iter()
            .filter(|c| c.asset == asset && c.timeframe == timeframe)
            .cloned()
            .collect();
        let skip = matching.len().saturating_sub(usize::try_from(limit).unwrap_or(0));
        Ok(matching.into_iter().skip(skip).collect())
    }

    async fn candles_after(
        &self,
        asset: &str,
        after: DateTime<Utc>,
    ) -> Result<Vec<CandleRecord>> {
        Ok(self
            .candles
            .iter()
            .filter(|c| c.asset == asset && c.timestamp > after)
            .cloned()
            .collect())
    }

    async fn latest_candle(&self, asset: &str, timeframe: &str) -> Result<Option<CandleRecord>> {
        Ok(self
            .candles
            .iter()
            .filter(|c| c.asset == asset && c.timeframe == timeframe)
            .last()
            .cloned())
    }
}

pub struct FakeSentiment {
    scores: Vec<f64>,
}

impl FakeSentiment {
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }
}

#[async_trait]
impl SentimentStore for FakeSentiment {
    async fn scores_since(&self, _since: DateTime<Utc>) -> Result<Vec<f64>> {
        Ok(self.scores.clone())
    }
}

pub struct FakeOnchain {
    count: i64,
}

impl FakeOnchain {
    pub fn new(count: i64) -> Self {
        Self { count }
    }
}

#[async_trait]
impl OnchainStore for FakeOnchain {
    async fn count_incoming_since(&self, _since: DateTime<Utc>, _wallets: &[String]) -> Result<i64> {
        Ok(self.count)
    }
}

#[derive(Default)]
pub struct FakeSignals {
    pub stored: Mutex<Vec<SignalRecord>>,
}

#[async_trait]
impl SignalStore for FakeSignals {
    async fn insert(&self, signal: &SignalRecord) -> Result<i64> {
        let mut stored = self.stored.lock().unwrap();
        let id = i64::try_from(stored.len()).unwrap() + 1;
        let mut record = signal.clone();
        record.signal_id = id;
        stored.push(record);
        Ok(id)
    }

    async fn list_chronological(&self) -> Result<Vec<SignalRecord>> {
        let mut records = self.stored.lock().unwrap().clone();
        records.sort_by_key(|r| r.timestamp);
        Ok(records)
    }
}
