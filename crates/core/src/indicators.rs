//! Technical indicator library.
//!
//! Pure functions over chronological close-price slices. Only the most
//! recent indicator value is returned; callers re-feed a fresh window each
//! scoring cycle.

/// Default lookback period for RSI.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Computes the Relative Strength Index over a chronological price slice.
///
/// Gains and losses are averaged with a simple moving average over the
/// trailing `period` deltas, shrinking to however many deltas exist when the
/// series is shorter than `period`. Returns the RSI for the most recent
/// price only, in `[0, 100]`.
///
/// Fewer than 2 prices yields the neutral value 50.0. A window with no
/// losses yields 100.0 (relative strength would be infinite).
#[must_use]
pub fn relative_strength_index(closes: &[f64], period: usize) -> f64 {
    if closes.len() < 2 {
        return 50.0;
    }

    let delta_count = closes.len() - 1;
    let window = period.max(1).min(delta_count);
    let start = closes.len() - 1 - window;

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in closes[start..].windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let window_f = window as f64;
    let avg_gain = gain_sum / window_f;
    let avg_loss = loss_sum / window_f;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_increasing_prices_max_out() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let rsi = relative_strength_index(&closes, DEFAULT_RSI_PERIOD);
        assert!((rsi - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fewer_than_two_prices_is_neutral() {
        assert!((relative_strength_index(&[], DEFAULT_RSI_PERIOD) - 50.0).abs() < f64::EPSILON);
        assert!(
            (relative_strength_index(&[42_000.0], DEFAULT_RSI_PERIOD) - 50.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn flat_prices_have_no_losses() {
        // Zero average loss is the RS = infinity special case.
        let closes = [100.0; 20];
        assert!((relative_strength_index(&closes, DEFAULT_RSI_PERIOD) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn balanced_gains_and_losses_sit_at_midpoint() {
        // Alternating +1/-1 deltas over a full window: avg gain == avg loss.
        let closes: Vec<f64> = (0..20)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let rsi = relative_strength_index(&closes, 14);
        assert!((rsi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn short_series_shrinks_the_window() {
        // Two deltas: +1.0 and -0.5. avg_gain = 0.5, avg_loss = 0.25, RS = 2.
        let closes = [100.0, 101.0, 100.5];
        let rsi = relative_strength_index(&closes, 14);
        let expected = 100.0 - 100.0 / (1.0 + 2.0);
        assert!((rsi - expected).abs() < 1e-9);
    }

    #[test]
    fn only_trailing_window_contributes() {
        // Heavy losses outside the 2-delta window must not affect the value.
        let closes = [500.0, 10.0, 100.0, 101.0, 102.0];
        let rsi = relative_strength_index(&closes, 2);
        assert!((rsi - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_period_is_clamped_to_one() {
        let closes = [100.0, 99.0];
        let rsi = relative_strength_index(&closes, 0);
        assert!((rsi - 0.0).abs() < f64::EPSILON);
    }
}
