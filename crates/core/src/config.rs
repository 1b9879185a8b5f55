use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub tracker: TrackerConfig,
    pub collectors: CollectorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Which assets and wallets the pipeline watches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Trading pairs in exchange notation (e.g. "BTC/USDT")
    pub assets: Vec<String>,
    /// Candle timeframe identifier (e.g. "1h")
    pub timeframe: String,
    /// Wallet addresses monitored for inflows
    pub wallets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorsConfig {
    pub binance_api_url: String,
    pub etherscan_api_url: String,
    pub etherscan_api_key: String,
    pub sentiment_api_url: String,
    pub sentiment_api_key: String,
    pub sentiment_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/confluence".to_string(),
                max_connections: 10,
            },
            tracker: TrackerConfig {
                assets: vec!["BTC/USDT".to_string(), "ETH/USDT".to_string()],
                timeframe: "1h".to_string(),
                wallets: Vec::new(),
            },
            collectors: CollectorsConfig {
                binance_api_url: "https://api.binance.com".to_string(),
                etherscan_api_url: "https://api.etherscan.io/api".to_string(),
                etherscan_api_key: String::new(),
                sentiment_api_url: "https://api.openai.com/v1/chat/completions".to_string(),
                sentiment_api_key: String::new(),
                sentiment_model: "gpt-4o-mini".to_string(),
            },
        }
    }
}
