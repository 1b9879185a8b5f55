use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Idempotent DDL for every table the pipeline reads or writes.
///
/// `market_data` and `onchain_transactions` carry natural-key primary keys
/// so collectors can re-run without duplicating rows. `generated_signals`
/// deliberately has no dedup key: re-running generation with unchanged
/// inputs may emit the same signal again.
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS market_data (
        timestamp   TIMESTAMPTZ       NOT NULL,
        asset       TEXT              NOT NULL,
        timeframe   TEXT              NOT NULL,
        open        NUMERIC           NOT NULL,
        high        NUMERIC           NOT NULL,
        low         NUMERIC           NOT NULL,
        close       NUMERIC           NOT NULL,
        volume      NUMERIC           NOT NULL,
        PRIMARY KEY (timestamp, asset, timeframe)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS sentiment_data (
        id              BIGSERIAL         PRIMARY KEY,
        timestamp_utc   TIMESTAMPTZ       NOT NULL,
        source          TEXT              NOT NULL,
        headline        TEXT              NOT NULL,
        sentiment_score DOUBLE PRECISION  NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS onchain_transactions (
        tx_hash          TEXT              PRIMARY KEY,
        timestamp_utc    TIMESTAMPTZ       NOT NULL,
        wallet_monitored TEXT              NOT NULL,
        from_address     TEXT              NOT NULL,
        to_address       TEXT              NOT NULL,
        value_eth        NUMERIC           NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS generated_signals (
        signal_id            BIGSERIAL         PRIMARY KEY,
        timestamp_utc        TIMESTAMPTZ       NOT NULL,
        asset                TEXT              NOT NULL,
        signal_type          TEXT              NOT NULL,
        entry_price          NUMERIC           NOT NULL,
        confidence_total     DOUBLE PRECISION  NOT NULL,
        confidence_tech      DOUBLE PRECISION  NOT NULL,
        confidence_sentiment DOUBLE PRECISION  NOT NULL,
        confidence_onchain   DOUBLE PRECISION  NOT NULL,
        triggering_factors   JSONB             NOT NULL,
        take_profit_target   NUMERIC           NOT NULL,
        stop_loss_target     NUMERIC           NOT NULL
    )
    ",
];

pub struct DatabaseClient {
    pool: PgPool,
}

impl DatabaseClient {
    /// Creates a new database client connected to the specified `PostgreSQL` database.
    ///
    /// # Errors
    /// Returns an error if the database connection cannot be established.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self { pool })
    }

    /// Returns a handle to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Creates all tables if they do not exist yet. Safe to run on every start.
    ///
    /// # Errors
    /// Returns an error if any DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<()> {
        for &statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to apply schema statement")?;
        }
        tracing::info!("database schema is up to date");
        Ok(())
    }
}
