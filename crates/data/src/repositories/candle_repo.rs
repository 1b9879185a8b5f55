//! Candle data repository.
//!
//! Batch insert with natural-key dedup plus the three read windows the
//! scorer, generator, and backtest evaluator need.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::CandleRecord;
use crate::stores::MarketStore;

/// Repository for OHLCV candle operations.
#[derive(Debug, Clone)]
pub struct CandleRepository {
    pool: PgPool,
}

impl CandleRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a batch of candles inside one transaction.
    ///
    /// Duplicates on (timestamp, asset, timeframe) are silently skipped, so
    /// re-running collection with identical upstream data is idempotent.
    ///
    /// # Returns
    /// The number of rows actually inserted (excluding duplicates).
    ///
    /// # Errors
    /// Returns an error if the database transaction fails.
    pub async fn insert_batch(&self, records: &[CandleRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;
        let mut inserted = 0u64;

        for record in records {
            let result = sqlx::query(
                r"
                INSERT INTO market_data (timestamp, asset, timeframe, open, high, low, close, volume)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (timestamp, asset, timeframe) DO NOTHING
                ",
            )
            .bind(record.timestamp)
            .bind(&record.asset)
            .bind(&record.timeframe)
            .bind(record.open)
            .bind(record.high)
            .bind(record.low)
            .bind(record.close)
            .bind(record.volume)
            .execute(&mut *tx)
            .await
            .context("Failed to insert candle")?;

            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit transaction")?;
        Ok(inserted)
    }
}

#[async_trait]
impl MarketStore for CandleRepository {
    async fn recent_candles(
        &self,
        asset: &str,
        timeframe: &str,
        limit: i64,
    ) -> Result<Vec<CandleRecord>> {
        let mut records = sqlx::query_as::<_, CandleRecord>(
            r"
            SELECT timestamp, asset, timeframe, open, high, low, close, volume
            FROM market_data
            WHERE asset = $1 AND timeframe = $2
            ORDER BY timestamp DESC
            LIMIT $3
            ",
        )
        .bind(asset)
        .bind(timeframe)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query recent candles")?;

        // Query newest-first to get the window, flip to chronological for callers.
        records.reverse();
        Ok(records)
    }

    async fn candles_after(
        &self,
        asset: &str,
        after: DateTime<Utc>,
    ) -> Result<Vec<CandleRecord>> {
        let records = sqlx::query_as::<_, CandleRecord>(
            r"
            SELECT timestamp, asset, timeframe, open, high, low, close, volume
            FROM market_data
            WHERE asset = $1 AND timestamp > $2
            ORDER BY timestamp ASC
            ",
        )
        .bind(asset)
        .bind(after)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query candles after timestamp")?;

        Ok(records)
    }

    async fn latest_candle(&self, asset: &str, timeframe: &str) -> Result<Option<CandleRecord>> {
        let record = sqlx::query_as::<_, CandleRecord>(
            r"
            SELECT timestamp, asset, timeframe, open, high, low, close, volume
            FROM market_data
            WHERE asset = $1 AND timeframe = $2
            ORDER BY timestamp DESC
            LIMIT 1
            ",
        )
        .bind(asset)
        .bind(timeframe)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query latest candle")?;

        Ok(record)
    }
}
