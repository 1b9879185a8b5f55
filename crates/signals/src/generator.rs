//! Signal generator.
//!
//! Walks the tracked assets, scores each one, and persists a BUY signal
//! with computed take-profit and stop-loss targets whenever the composite
//! confidence clears the emission threshold. A failure on one asset never
//! aborts the rest of the batch.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use confluence_data::{MarketStore, SignalRecord, SignalStore};

use crate::scorer::{round2, ConfidenceBreakdown, ConfidenceScorer};

/// Minimum composite confidence required to emit a signal (exclusive).
pub const EMISSION_THRESHOLD: f64 = 0.75;

const TECHNICAL_WEIGHT: f64 = 0.4;
const SENTIMENT_WEIGHT: f64 = 0.3;
const ONCHAIN_WEIGHT: f64 = 0.3;

/// Combines the three sub-scores into the composite confidence,
/// rounded to 2 decimals.
#[must_use]
pub fn composite_confidence(technical: f64, sentiment: f64, onchain: f64) -> f64 {
    round2(TECHNICAL_WEIGHT * technical + SENTIMENT_WEIGHT * sentiment + ONCHAIN_WEIGHT * onchain)
}

fn take_profit_target(entry: Decimal) -> Decimal {
    entry * dec!(1.05)
}

fn stop_loss_target(entry: Decimal) -> Decimal {
    entry * dec!(0.975)
}

/// Emits BUY signals for tracked assets whose confidence clears the threshold.
pub struct SignalGenerator {
    scorer: ConfidenceScorer,
    market: Arc<dyn MarketStore>,
    signals: Arc<dyn SignalStore>,
    assets: Vec<String>,
    timeframe: String,
}

impl SignalGenerator {
    /// Creates a generator over the given scorer and stores.
    #[must_use]
    pub fn new(
        scorer: ConfidenceScorer,
        market: Arc<dyn MarketStore>,
        signals: Arc<dyn SignalStore>,
        assets: Vec<String>,
        timeframe: impl Into<String>,
    ) -> Self {
        Self {
            scorer,
            market,
            signals,
            assets,
            timeframe: timeframe.into(),
        }
    }

    /// Runs one generation cycle over all tracked assets as of `now`.
    ///
    /// Per-asset failures are logged and skipped.
    ///
    /// # Returns
    /// The number of signals emitted this run.
    ///
    /// # Errors
    /// Per-asset errors never surface here; only batch-level failures do.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut emitted = 0;

        for asset in &self.assets {
            tracing::debug!("scoring {}", asset);
            match self.evaluate_asset(asset, now).await {
                Ok(true) => emitted += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Failed to evaluate {}: {:#}", asset, e);
                }
            }
        }

        Ok(emitted)
    }

    async fn evaluate_asset(&self, asset: &str, now: DateTime<Utc>) -> Result<bool> {
        let breakdown = self.scorer.score(asset, now).await?;
        let confidence_total =
            composite_confidence(breakdown.technical, breakdown.sentiment, breakdown.onchain);

        if confidence_total <= EMISSION_THRESHOLD {
            tracing::info!(
                "No BUY signal for {}: confidence {:.2}",
                asset,
                confidence_total
            );
            return Ok(false);
        }

        let Some(latest) = self.market.latest_candle(asset, &self.timeframe).await? else {
            tracing::warn!(
                "No market data for {}, cannot price a signal despite confidence {:.2}",
                asset,
                confidence_total
            );
            return Ok(false);
        };

        let signal = build_signal(asset, now, latest.close, confidence_total, &breakdown);
        let signal_id = self.signals.insert(&signal).await?;
        tracing::info!(
            "BUY signal {} emitted for {} at {} (confidence {:.2})",
            signal_id,
            asset,
            signal.entry_price,
            confidence_total
        );

        Ok(true)
    }
}

fn build_signal(
    asset: &str,
    now: DateTime<Utc>,
    entry_price: Decimal,
    confidence_total: f64,
    breakdown: &ConfidenceBreakdown,
) -> SignalRecord {
    SignalRecord::buy(
        now,
        asset.to_string(),
        entry_price,
        confidence_total,
        breakdown.technical,
        breakdown.sentiment,
        breakdown.onchain,
        breakdown.factors_json(),
        take_profit_target(entry_price),
        stop_loss_target(entry_price),
    )
}
