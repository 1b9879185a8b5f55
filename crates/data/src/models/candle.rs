//! OHLCV candle data model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One interval's OHLCV summary for a tracked asset.
///
/// Candles are immutable once recorded and unique per
/// (timestamp, asset, timeframe).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CandleRecord {
    pub timestamp: DateTime<Utc>,
    /// Trading pair in exchange notation (e.g. "BTC/USDT")
    pub asset: String,
    /// Candle interval identifier (e.g. "1h")
    pub timeframe: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}
