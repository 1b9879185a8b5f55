//! Confidence scorer.
//!
//! Reads recent windows of market, sentiment, and on-chain data for one
//! asset and produces three bounded sub-scores plus the factor annotations
//! that explain what fired. The breakdown is transient; only emitted
//! signals persist it.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde_json::{json, Map, Value as JsonValue};

use confluence_core::indicators::{relative_strength_index, DEFAULT_RSI_PERIOD};
use confluence_data::{MarketStore, OnchainStore, SentimentStore};

/// Candles fed to the RSI per scoring pass.
const CANDLE_LOOKBACK: i64 = 100;
/// Lookback for the sentiment average.
const SENTIMENT_WINDOW_HOURS: i64 = 3;
/// Lookback for monitored-wallet inflows.
const ONCHAIN_WINDOW_HOURS: i64 = 24;
/// Flat on-chain contribution when any monitored inflow exists in the window.
const ONCHAIN_ACTIVITY_SCORE: f64 = 0.8;

/// Rounds to 2 decimal places, the precision sub-scores are stored with.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Maps an RSI reading onto the technical sub-score.
///
/// The mapping is piecewise and asymmetric around the neutral point 50:
/// oversold readings (< 30) land in (0.2, 1.0], overbought readings (> 70)
/// in [-1.0, -0.2), and the neutral band in [-0.2, 0.2]. The breakpoints
/// and coefficients are the documented scoring policy; both band boundaries
/// fall into the neutral formula.
#[must_use]
pub fn technical_score(rsi: f64) -> f64 {
    if rsi < 30.0 {
        (30.0 - rsi) / 30.0 * 0.8 + 0.2
    } else if rsi > 70.0 {
        (70.0 - rsi) / 30.0 * 0.8 - 0.2
    } else {
        (50.0 - rsi) / 50.0 * 0.5
    }
}

/// Per-asset confidence sub-scores with the factors that produced them.
#[derive(Debug, Clone)]
pub struct ConfidenceBreakdown {
    /// Technical sub-score from the RSI transform, in [-1, 1]
    pub technical: f64,
    /// Mean sentiment over the 3h window, in [-1, 1]
    pub sentiment: f64,
    /// On-chain activity step: 0.8 or 0.0
    pub onchain: f64,
    /// Factor-name to value/annotation map
    pub triggering_factors: Map<String, JsonValue>,
}

impl ConfidenceBreakdown {
    /// Returns the factor map as a JSON object for persistence.
    #[must_use]
    pub fn factors_json(&self) -> JsonValue {
        JsonValue::Object(self.triggering_factors.clone())
    }
}

/// Combines technical, sentiment, and on-chain readings for one asset.
///
/// Each data source degrades independently: a missing window contributes
/// 0.0 rather than failing the scoring pass.
pub struct ConfidenceScorer {
    market: Arc<dyn MarketStore>,
    sentiment: Arc<dyn SentimentStore>,
    onchain: Arc<dyn OnchainStore>,
    timeframe: String,
    wallets: Vec<String>,
}

impl ConfidenceScorer {
    /// Creates a scorer over the given stores.
    #[must_use]
    pub fn new(
        market: Arc<dyn MarketStore>,
        sentiment: Arc<dyn SentimentStore>,
        onchain: Arc<dyn OnchainStore>,
        timeframe: impl Into<String>,
        wallets: Vec<String>,
    ) -> Self {
        Self {
            market,
            sentiment,
            onchain,
            timeframe: timeframe.into(),
            wallets,
        }
    }

    /// Scores one asset as of `now`.
    ///
    /// # Errors
    /// Returns an error if any store read fails.
    pub async fn score(&self, asset: &str, now: DateTime<Utc>) -> Result<ConfidenceBreakdown> {
        let mut factors = Map::new();

        // Technical: RSI over up to the last 100 closes.
        let mut technical = 0.0;
        let candles = self
            .market
            .recent_candles(asset, &self.timeframe, CANDLE_LOOKBACK)
            .await?;
        if !candles.is_empty() {
            let closes: Vec<f64> = candles
                .iter()
                .map(|c| c.close.to_f64().unwrap_or(0.0))
                .collect();
            let rsi = relative_strength_index(&closes, DEFAULT_RSI_PERIOD);
            technical = technical_score(rsi);
            factors.insert("rsi".to_string(), json!(rsi));
        }

        // Sentiment: mean score over the 3h window.
        let mut sentiment = 0.0;
        let scores = self
            .sentiment
            .scores_since(now - Duration::hours(SENTIMENT_WINDOW_HOURS))
            .await?;
        if !scores.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            sentiment = mean;
            factors.insert("sentiment_avg_3h".to_string(), json!(mean));
        }

        // On-chain: any positive inflow into a monitored wallet in 24h.
        let inflows = self
            .onchain
            .count_incoming_since(now - Duration::hours(ONCHAIN_WINDOW_HOURS), &self.wallets)
            .await?;
        let onchain = if inflows > 0 {
            ONCHAIN_ACTIVITY_SCORE
        } else {
            0.0
        };
        let annotation = if inflows > 0 {
            "significant_buy_activity"
        } else {
            "no_significant_buy_activity"
        };
        factors.insert("onchain_activity".to_string(), json!(annotation));

        Ok(ConfidenceBreakdown {
            technical: round2(technical),
            sentiment: round2(sentiment),
            onchain: round2(onchain),
            triggering_factors: factors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeMarket, FakeOnchain, FakeSentiment};
    use chrono::TimeZone;

    fn sample_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap()
    }

    fn scorer(market: FakeMarket, sentiment: FakeSentiment, onchain: FakeOnchain) -> ConfidenceScorer {
        ConfidenceScorer::new(
            Arc::new(market),
            Arc::new(sentiment),
            Arc::new(onchain),
            "1h",
            vec!["0xAAA".to_string()],
        )
    }

    #[test]
    fn technical_score_oversold_band() {
        // RSI 20: (30-20)/30 * 0.8 + 0.2 = 0.4667
        assert!((round2(technical_score(20.0)) - 0.47).abs() < f64::EPSILON);
        // RSI 0 is the strongest buy reading.
        assert!((technical_score(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn technical_score_overbought_band() {
        // RSI 80: (70-80)/30 * 0.8 - 0.2 = -0.4667
        assert!((round2(technical_score(80.0)) + 0.47).abs() < f64::EPSILON);
        assert!((technical_score(100.0) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn technical_score_band_boundaries_are_neutral() {
        // Both boundaries fall into the neutral formula: the oversold side
        // is exclusive at 30, the overbought side at 70.
        assert!((technical_score(30.0) - 0.2).abs() < 1e-9);
        assert!((technical_score(70.0) + 0.2).abs() < 1e-9);
        assert!(technical_score(50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn no_market_data_leaves_technical_zero_without_factor() {
        let breakdown = scorer(
            FakeMarket::empty(),
            FakeSentiment::new(vec![]),
            FakeOnchain::new(0),
        )
        .score("BTC/USDT", sample_now())
        .await
        .unwrap();

        assert!(breakdown.technical.abs() < f64::EPSILON);
        assert!(!breakdown.triggering_factors.contains_key("rsi"));
    }

    #[tokio::test]
    async fn falling_market_scores_strongly_bullish() {
        // Strictly decreasing closes push RSI to 0 and the technical
        // sub-score to its 1.0 maximum.
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - f64::from(i)).collect();
        let breakdown = scorer(
            FakeMarket::from_closes("BTC/USDT", "1h", &closes),
            FakeSentiment::new(vec![]),
            FakeOnchain::new(0),
        )
        .score("BTC/USDT", sample_now())
        .await
        .unwrap();

        assert!((breakdown.technical - 1.0).abs() < f64::EPSILON);
        assert!((breakdown.triggering_factors["rsi"].as_f64().unwrap()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn sentiment_mean_is_recorded_as_factor() {
        let breakdown = scorer(
            FakeMarket::empty(),
            FakeSentiment::new(vec![0.9, 0.7, 0.8]),
            FakeOnchain::new(0),
        )
        .score("BTC/USDT", sample_now())
        .await
        .unwrap();

        assert!((breakdown.sentiment - 0.8).abs() < f64::EPSILON);
        let recorded = breakdown.triggering_factors["sentiment_avg_3h"]
            .as_f64()
            .unwrap();
        assert!((recorded - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_sentiment_window_has_no_factor() {
        let breakdown = scorer(
            FakeMarket::empty(),
            FakeSentiment::new(vec![]),
            FakeOnchain::new(0),
        )
        .score("BTC/USDT", sample_now())
        .await
        .unwrap();

        assert!(breakdown.sentiment.abs() < f64::EPSILON);
        assert!(!breakdown.triggering_factors.contains_key("sentiment_avg_3h"));
    }

    #[tokio::test]
    async fn onchain_annotation_is_always_present() {
        let active = scorer(
            FakeMarket::empty(),
            FakeSentiment::new(vec![]),
            FakeOnchain::new(3),
        )
        .score("BTC/USDT", sample_now())
        .await
        .unwrap();
        assert!((active.onchain - 0.8).abs() < f64::EPSILON);
        assert_eq!(
            active.triggering_factors["onchain_activity"],
            "significant_buy_activity"
        );

        let quiet = scorer(
            FakeMarket::empty(),
            FakeSentiment::new(vec![]),
            FakeOnchain::new(0),
        )
        .score("BTC/USDT", sample_now())
        .await
        .unwrap();
        assert!(quiet.onchain.abs() < f64::EPSILON);
        assert_eq!(
            quiet.triggering_factors["onchain_activity"],
            "no_significant_buy_activity"
        );
    }
}
