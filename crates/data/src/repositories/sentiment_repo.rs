//! Sentiment reading repository.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::SentimentRecord;
use crate::stores::SentimentStore;

/// Repository for sentiment reading operations.
#[derive(Debug, Clone)]
pub struct SentimentRepository {
    pool: PgPool,
}

impl SentimentRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one scored headline.
    ///
    /// # Errors
    /// Returns an error if the database insertion fails.
    pub async fn insert(&self, record: &SentimentRecord) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO sentiment_data (timestamp_utc, source, headline, sentiment_score)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(record.timestamp)
        .bind(&record.source)
        .bind(&record.headline)
        .bind(record.score)
        .execute(&self.pool)
        .await
        .context("Failed to insert sentiment reading")?;

        Ok(())
    }
}

#[async_trait]
impl SentimentStore for SentimentRepository {
    async fn scores_since(&self, since: DateTime<Utc>) -> Result<Vec<f64>> {
        let rows: Vec<(f64,)> = sqlx::query_as(
            r"
            SELECT sentiment_score FROM sentiment_data
            WHERE timestamp_utc >= $1
            ORDER BY timestamp_utc DESC
            ",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query sentiment scores")?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
