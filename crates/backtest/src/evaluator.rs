//! Backtest evaluator.
//!
//! Walks all persisted signals in chronological order and scans the price
//! history after each one for the first target hit.

use std::sync::Arc;

use anyhow::Result;

use confluence_data::{CandleRecord, MarketStore, SignalRecord, SignalStore};
use rust_decimal::Decimal;

use crate::report::BacktestReport;

/// Outcome of replaying one signal against subsequent price action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// A close reached the take-profit target
    TakeProfit { profit: Decimal },
    /// A close reached the stop-loss target before take-profit
    StopLoss { loss: Decimal },
    /// Neither target hit; final close above entry
    OpenWin { profit: Decimal },
    /// Neither target hit; final close at or below entry
    OpenLoss { loss: Decimal },
}

impl TradeOutcome {
    /// Returns true for outcomes that count as winning trades.
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, TradeOutcome::TakeProfit { .. } | TradeOutcome::OpenWin { .. })
    }
}

/// Classifies one signal against the candles after its timestamp.
///
/// Scans forward close-by-close; the take-profit check runs before the
/// stop-loss check on each candle, so a candle satisfying both counts as a
/// win. If neither target is hit the position is treated as still open and
/// classified by the final close against entry. Returns `None` when there
/// are no candles to scan.
#[must_use]
pub fn evaluate_signal(signal: &SignalRecord, candles: &[CandleRecord]) -> Option<TradeOutcome> {
    for candle in candles {
        if candle.close >= signal.take_profit_target {
            return Some(TradeOutcome::TakeProfit {
                profit: signal.take_profit_target - signal.entry_price,
            });
        }
        if candle.close <= signal.stop_loss_target {
            return Some(TradeOutcome::StopLoss {
                loss: signal.entry_price - signal.stop_loss_target,
            });
        }
    }

    let final_close = candles.last()?.close;
    if final_close > signal.entry_price {
        Some(TradeOutcome::OpenWin {
            profit: final_close - signal.entry_price,
        })
    } else {
        Some(TradeOutcome::OpenLoss {
            loss: signal.entry_price - final_close,
        })
    }
}

/// Replays every stored signal and aggregates a performance report.
pub struct BacktestEvaluator {
    market: Arc<dyn MarketStore>,
    signals: Arc<dyn SignalStore>,
}

impl BacktestEvaluator {
    /// Creates an evaluator over the given stores.
    #[must_use]
    pub fn new(market: Arc<dyn MarketStore>, signals: Arc<dyn SignalStore>) -> Self {
        Self { market, signals }
    }

    /// Evaluates all persisted signals.
    ///
    /// Signals with no market data after their timestamp are skipped and
    /// reported; a store failure on one signal does not abort the rest.
    ///
    /// # Errors
    /// Returns an error if the signal listing itself fails.
    pub async fn run(&self) -> Result<BacktestReport> {
        let signals = self.signals.list_chronological().await?;
        let mut report = BacktestReport::default();

        if signals.is_empty() {
            tracing::info!("No signals to evaluate");
            return Ok(report);
        }

        tracing::info!("Evaluating {} signals", signals.len());

        for signal in &signals {
            let candles = match self
                .market
                .candles_after(&signal.asset, signal.timestamp)
                .await
            {
                Ok(candles) => candles,
                Err(e) => {
                    tracing::error!(
                        "Failed to load market data for signal {}: {:#}",
                        signal.signal_id,
                        e
                    );
                    report.skipped_signals += 1;
                    continue;
                }
            };

            match evaluate_signal(signal, &candles) {
                Some(outcome) => report.record(outcome),
                None => {
                    tracing::warn!(
                        "No market data after signal {} ({}), skipping",
                        signal.signal_id,
                        signal.asset
                    );
                    report.skipped_signals += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap()
    }

    fn sample_signal(entry: Decimal) -> SignalRecord {
        SignalRecord::buy(
            base_time(),
            "BTC/USDT".to_string(),
            entry,
            0.88,
            1.0,
            0.8,
            0.8,
            json!({"onchain_activity": "significant_buy_activity"}),
            entry * dec!(1.05),
            entry * dec!(0.975),
        )
    }

    fn candles_from_closes(closes: &[Decimal]) -> Vec<CandleRecord> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| CandleRecord {
                timestamp: base_time() + Duration::hours(i64::try_from(i).unwrap() + 1),
                asset: "BTC/USDT".to_string(),
                timeframe: "1h".to_string(),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: Decimal::ONE,
            })
            .collect()
    }

    #[test]
    fn take_profit_hit_stops_the_scan() {
        // Entry 100, take-profit 105, stop-loss 97.5. The 106 close is the
        // first at or above target; the later 90 close must never be seen.
        let signal = sample_signal(dec!(100));
        let candles = candles_from_closes(&[dec!(101), dec!(106), dec!(90)]);

        let outcome = evaluate_signal(&signal, &candles).unwrap();
        assert_eq!(outcome, TradeOutcome::TakeProfit { profit: dec!(5.00) });
        assert!(outcome.is_win());
    }

    #[test]
    fn stop_loss_hit_records_fixed_loss() {
        let signal = sample_signal(dec!(100));
        let candles = candles_from_closes(&[dec!(98), dec!(97)]);

        let outcome = evaluate_signal(&signal, &candles).unwrap();
        assert_eq!(outcome, TradeOutcome::StopLoss { loss: dec!(2.500) });
        assert!(!outcome.is_win());
    }

    #[test]
    fn take_profit_wins_when_both_targets_match_one_candle() {
        // A degenerate close satisfying both comparisons counts as a win
        // because take-profit is checked first.
        let candles = candles_from_closes(&[dec!(200)]);
        let widened = SignalRecord {
            take_profit_target: dec!(105),
            stop_loss_target: dec!(300),
            ..sample_signal(dec!(100))
        };

        let outcome = evaluate_signal(&widened, &candles).unwrap();
        assert!(matches!(outcome, TradeOutcome::TakeProfit { .. }));
    }

    #[test]
    fn open_position_above_entry_is_a_win() {
        let signal = sample_signal(dec!(100));
        let candles = candles_from_closes(&[dec!(101), dec!(103)]);

        let outcome = evaluate_signal(&signal, &candles).unwrap();
        assert_eq!(outcome, TradeOutcome::OpenWin { profit: dec!(3) });
    }

    #[test]
    fn open_position_at_or_below_entry_is_a_loss() {
        let signal = sample_signal(dec!(100));

        let flat = evaluate_signal(&signal, &candles_from_closes(&[dec!(100)])).unwrap();
        assert_eq!(flat, TradeOutcome::OpenLoss { loss: dec!(0) });

        let down = evaluate_signal(&signal, &candles_from_closes(&[dec!(99)])).unwrap();
        assert_eq!(down, TradeOutcome::OpenLoss { loss: dec!(1) });
    }

    #[test]
    fn no_candles_yields_no_outcome() {
        let signal = sample_signal(dec!(100));
        assert_eq!(evaluate_signal(&signal, &[]), None);
    }

    struct FakeMarket {
        candles: Vec<CandleRecord>,
    }

    #[async_trait]
    impl MarketStore for FakeMarket {
        async fn recent_candles(
            &self,
            _asset: &str,
            _timeframe: &str,
            _limit: i64,
        ) -> Result<Vec<CandleRecord>> {
            Ok(self.candles.clone())
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

        async fn latest_candle(
            &self,
            _asset: &str,
            _timeframe: &str,
        ) -> Result<Option<CandleRecord>> {
            Ok(self.candles.last().cloned())
        }
    }

    struct FakeSignals {
        signals: Vec<SignalRecord>,
    }

    #[async_trait]
    impl SignalStore for FakeSignals {
        async fn insert(&self, _signal: &SignalRecord) -> Result<i64> {
            unimplemented!("evaluator never inserts")
        }

        async fn list_chronological(&self) -> Result<Vec<SignalRecord>> {
            Ok(self.signals.clone())
        }
    }

    #[tokio::test]
    async fn run_aggregates_and_skips_unevaluable_signals() {
        // One winning signal with price history, one signal with nothing
        // after its timestamp (must be skipped, not counted).
        let evaluated = sample_signal(dec!(100));
        let mut orphan = sample_signal(dec!(100));
        orphan.asset = "ETH/USDT".to_string();

        let market = FakeMarket {
            candles: candles_from_closes(&[dec!(101), dec!(106)]),
        };
        let signals = FakeSignals {
            signals: vec![evaluated, orphan],
        };

        let report = BacktestEvaluator::new(Arc::new(market), Arc::new(signals))
            .run()
            .await
            .unwrap();

        assert_eq!(report.total_trades, 1);
        assert_eq!(report.winning_trades, 1);
        assert_eq!(report.skipped_signals, 1);
        assert_eq!(report.total_profit, dec!(5.00));
        assert!((report.win_rate() - 100.0).abs() < f64::EPSILON);
    }
}
