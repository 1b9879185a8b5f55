//! Generated signal repository.
//!
//! Signals are insert-then-read-only. There is intentionally no conflict
//! key: re-running generation with unchanged inputs may store the same
//! recommendation again.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::SignalRecord;
use crate::stores::SignalStore;

/// Repository for generated signal operations.
#[derive(Debug, Clone)]
pub struct SignalRepository {
    pool: PgPool,
}

impl SignalRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SignalStore for SignalRepository {
    async fn insert(&self, signal: &SignalRecord) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            INSERT INTO generated_signals
                (timestamp_utc, asset, signal_type, entry_price, confidence_total,
                 confidence_tech, confidence_sentiment, confidence_onchain,
                 triggering_factors, take_profit_target, stop_loss_target)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING signal_id
            ",
        )
        .bind(signal.timestamp)
        .bind(&signal.asset)
        .bind(&signal.signal_type)
        .bind(signal.entry_price)
        .bind(signal.confidence_total)
        .bind(signal.confidence_tech)
        .bind(signal.confidence_sentiment)
        .bind(signal.confidence_onchain)
        .bind(&signal.triggering_factors)
        .bind(signal.take_profit_target)
        .bind(signal.stop_loss_target)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert signal")?;

        Ok(row.0)
    }

    async fn list_chronological(&self) -> Result<Vec<SignalRecord>> {
        let records = sqlx::query_as::<_, SignalRecord>(
            r"
            SELECT signal_id, timestamp_utc AS timestamp, asset, signal_type, entry_price,
                   confidence_total, confidence_tech, confidence_sentiment, confidence_onchain,
                   triggering_factors, take_profit_target, stop_loss_target
            FROM generated_signals
            ORDER BY timestamp_utc ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list signals")?;

        Ok(records)
    }
}
