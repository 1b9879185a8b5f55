//! On-chain transaction repository.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::OnchainTxRecord;
use crate::stores::OnchainStore;

/// Repository for on-chain transfer operations.
#[derive(Debug, Clone)]
pub struct OnchainTxRepository {
    pool: PgPool,
}

impl OnchainTxRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a batch of transfers inside one transaction.
    ///
    /// Duplicates on `tx_hash` are silently skipped, so re-polling the
    /// explorer is idempotent.
    ///
    /// # Returns
    /// The number of rows actually inserted (excluding duplicates).
    ///
    /// # Errors
    /// Returns an error if the database transaction fails.
    pub async fn insert_batch(&self, records: &[OnchainTxRecord]) -> Result<u64> {
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
                INSERT INTO onchain_transactions
                    (tx_hash, timestamp_utc, wallet_monitored, from_address, to_address, value_eth)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (tx_hash) DO NOTHING
                ",
            )
            .bind(&record.tx_hash)
            .bind(record.timestamp)
            .bind(&record.wallet_monitored)
            .bind(&record.from_address)
            .bind(&record.to_address)
            .bind(record.value_eth)
            .execute(&mut *tx)
            .await
            .context("Failed to insert on-chain transaction")?;

            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit transaction")?;
        Ok(inserted)
    }
}

#[async_trait]
impl OnchainStore for OnchainTxRepository {
    async fn count_incoming_since(&self, since: DateTime<Utc>, wallets: &[String]) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*) FROM onchain_transactions
            WHERE timestamp_utc >= $1
              AND to_address = ANY($2)
              AND value_eth > 0
            ",
        )
        .bind(since)
        .bind(wallets)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count incoming transactions")?;

        Ok(row.0)
    }
}
