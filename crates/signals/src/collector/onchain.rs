//! Etherscan on-chain collector.
//!
//! Polls the account transaction list for every monitored wallet and
//! stores transfers deduplicated by hash.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use confluence_data::{OnchainTxRecord, OnchainTxRepository};

/// Wei per ETH as a decimal scale: 10^18.
const WEI_SCALE: u32 = 18;

/// Configuration for the on-chain collector.
#[derive(Debug, Clone)]
pub struct OnchainCollectorConfig {
    /// Etherscan API base URL
    pub api_url: String,
    pub api_key: String,
    /// Wallet addresses to poll
    pub wallets: Vec<String>,
}

pub struct OnchainCollector {
    config: OnchainCollectorConfig,
    client: reqwest::Client,
    repo: OnchainTxRepository,
}

#[derive(Debug, Deserialize)]
struct TxListResponse {
    result: Vec<EtherscanTx>,
}

#[derive(Debug, Deserialize)]
struct EtherscanTx {
    hash: String,
    #[serde(rename = "timeStamp")]
    time_stamp: String,
    from: String,
    to: String,
    /// Transfer value in wei, as a decimal string
    value: String,
}

impl OnchainCollector {
    /// Creates a collector writing through the given repository.
    #[must_use]
    pub fn new(config: OnchainCollectorConfig, repo: OnchainTxRepository) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            repo,
        }
    }

    /// Collects transactions for all monitored wallets.
    ///
    /// A failing wallet is logged and skipped.
    ///
    /// # Returns
    /// The number of new transactions stored across all wallets.
    pub async fn collect(&self) -> Result<u64> {
        let mut stored = 0u64;

        for wallet in &self.config.wallets {
            if wallet.is_empty() {
                continue;
            }
            match self.collect_wallet(wallet).await {
                Ok(count) => {
                    tracing::info!("Stored {} new transactions for {}", count, wallet);
                    stored += count;
                }
                Err(e) => {
                    tracing::error!("Failed to collect on-chain data for {}: {:#}", wallet, e);
                }
            }
        }

        Ok(stored)
    }

    async fn collect_wallet(&self, wallet: &str) -> Result<u64> {
        let response: TxListResponse = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", wallet),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "asc"),
                ("apikey", &self.config.api_key),
            ])
            .send()
            .await
            .context("Transaction list request failed")?
            .error_for_status()
            .context("Transaction list request rejected")?
            .json()
            .await
            .context("Failed to parse transaction list response")?;

        let mut records = Vec::with_capacity(response.result.len());
        for tx in &response.result {
            records.push(parse_transaction(wallet, tx)?);
        }

        self.repo.insert_batch(&records).await
    }
}

fn parse_transaction(wallet: &str, tx: &EtherscanTx) -> Result<OnchainTxRecord> {
    let seconds: i64 = tx
        .time_stamp
        .parse()
        .with_context(|| format!("invalid timestamp '{}'", tx.time_stamp))?;
    let timestamp: DateTime<Utc> = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| anyhow!("timestamp {} out of range", seconds))?;

    Ok(OnchainTxRecord {
        tx_hash: tx.hash.clone(),
        timestamp,
        wallet_monitored: wallet.to_string(),
        from_address: tx.from.clone(),
        to_address: tx.to.clone(),
        value_eth: wei_to_eth(&tx.value)?,
    })
}

/// Converts a wei string to an ETH `Decimal` without going through floats.
fn wei_to_eth(wei: &str) -> Result<Decimal> {
    let wei: i128 = wei
        .parse()
        .with_context(|| format!("invalid wei value '{wei}'"))?;
    Decimal::try_from_i128_with_scale(wei, WEI_SCALE)
        .map_err(|e| anyhow!("wei value out of range: {e}"))
}
