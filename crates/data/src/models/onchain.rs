//! On-chain transaction data model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One transfer touching a monitored wallet.
///
/// Append-only and deduplicated by `tx_hash`. Scoring reads back only an
/// inflow count, so this model is write-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnchainTxRecord {
    pub tx_hash: String,
    pub timestamp: DateTime<Utc>,
    /// The monitored wallet this transfer was collected for
    pub wallet_monitored: String,
    pub from_address: String,
    pub to_address: String,
    /// Transfer value in ETH, never negative
    pub value_eth: Decimal,
}

impl OnchainTxRecord {
    /// Returns true if this transfer moves a positive value into the given wallet.
    #[must_use]
    pub fn is_inflow_to(&self, wallet: &str) -> bool {
        self.value_eth > Decimal::ZERO && self.to_address.eq_ignore_ascii_case(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_tx(to: &str, value: Decimal) -> OnchainTxRecord {
        OnchainTxRecord {
            tx_hash: "0xdeadbeef".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap(),
            wallet_monitored: "0xAAA".to_string(),
            from_address: "0xBBB".to_string(),
            to_address: to.to_string(),
            value_eth: value,
        }
    }

    #[test]
    fn inflow_requires_positive_value() {
        assert!(sample_tx("0xAAA", dec!(1.5)).is_inflow_to("0xAAA"));
        assert!(!sample_tx("0xAAA", dec!(0)).is_inflow_to("0xAAA"));
    }

    #[test]
    fn inflow_matches_address_case_insensitively() {
        assert!(sample_tx("0xAaA", dec!(1)).is_inflow_to("0xaaa"));
        assert!(!sample_tx("0xCCC", dec!(1)).is_inflow_to("0xAAA"));
    }
}
