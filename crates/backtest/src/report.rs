//! Aggregated backtest performance report.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::evaluator::TradeOutcome;

/// Portfolio-level statistics across all evaluated signals.
#[derive(Debug, Default, Clone)]
pub struct BacktestReport {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub total_profit: Decimal,
    pub total_loss: Decimal,
    /// Signals with no market data after their timestamp
    pub skipped_signals: usize,
}

impl BacktestReport {
    /// Folds one trade outcome into the totals.
    pub fn record(&mut self, outcome: TradeOutcome) {
        self.total_trades += 1;
        match outcome {
            TradeOutcome::TakeProfit { profit } | TradeOutcome::OpenWin { profit } => {
                self.winning_trades += 1;
                self.total_profit += profit;
            }
            TradeOutcome::StopLoss { loss } | TradeOutcome::OpenLoss { loss } => {
                self.total_loss += loss;
            }
        }
    }

    /// Winning trades as a percentage of evaluated trades; 0 with no trades.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.winning_trades as f64 / self.total_trades as f64 * 100.0;
        rate
    }

    /// Total profit over total loss.
    ///
    /// Positive infinity when there are profits and no losses; 0 when there
    /// is nothing on either side.
    #[must_use]
    pub fn profit_factor(&self) -> f64 {
        if self.total_loss > Decimal::ZERO {
            (self.total_profit / self.total_loss)
                .to_f64()
                .unwrap_or(0.0)
        } else if self.total_profit > Decimal::ZERO {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

impl fmt::Display for BacktestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Backtest Results ---")?;
        writeln!(f, "Total trades:  {}", self.total_trades)?;
        writeln!(f, "Win rate:      {:.2}%", self.win_rate())?;
        writeln!(f, "Profit factor: {:.2}", self.profit_factor())?;
        if self.skipped_signals > 0 {
            writeln!(f, "Skipped:       {} (no subsequent data)", self.skipped_signals)?;
        }
        write!(f, "------------------------")
    }
}
