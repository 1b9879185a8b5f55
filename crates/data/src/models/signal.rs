//! Generated trading signal data model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Signal direction. Only long entries are produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Buy,
}

impl SignalKind {
    /// Returns the string representation stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Buy => "BUY",
        }
    }
}

/// A persisted trading recommendation.
///
/// Immutable after insert; the backtest evaluator only reads these.
/// `confidence_total` is the fixed 0.4/0.3/0.3 weighted sum of the three
/// sub-scores, rounded to 2 decimals, and was above the emission threshold
/// at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SignalRecord {
    /// Database-assigned id; 0 until inserted
    pub signal_id: i64,
    pub timestamp: DateTime<Utc>,
    pub asset: String,
    pub signal_type: String,
    pub entry_price: Decimal,
    pub confidence_total: f64,
    pub confidence_tech: f64,
    pub confidence_sentiment: f64,
    pub confidence_onchain: f64,
    /// Factor-name to value/annotation map explaining what fired
    pub triggering_factors: JsonValue,
    pub take_profit_target: Decimal,
    pub stop_loss_target: Decimal,
}

impl SignalRecord {
    /// Creates a BUY signal ready for insertion.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn buy(
        timestamp: DateTime<Utc>,
        asset: String,
        entry_price: Decimal,
        confidence_total: f64,
        confidence_tech: f64,
        confidence_sentiment: f64,
        confidence_onchain: f64,
        triggering_factors: JsonValue,
        take_profit_target: Decimal,
        stop_loss_target: Decimal,
    ) -> Self {
        Self {
            signal_id: 0,
            timestamp,
            asset,
            signal_type: SignalKind::Buy.as_str().to_string(),
            entry_price,
            confidence_total,
            confidence_tech,
            confidence_sentiment,
            confidence_onchain,
            triggering_factors,
            take_profit_target,
            stop_loss_target,
        }
    }

    /// Returns the parsed signal kind, if recognized.
    #[must_use]
    pub fn kind(&self) -> Option<SignalKind> {
        match self.signal_type.as_str() {
            "BUY" => Some(SignalKind::Buy),
            _ => None,
        }
    }
}
