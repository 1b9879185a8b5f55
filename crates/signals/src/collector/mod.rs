//! Data collectors.
//!
//! Thin fetch-and-store plumbing: each collector pulls one upstream API
//! and writes through the matching repository. Natural-key conflict
//! suppression in the repositories makes re-running a collector
//! idempotent. Failures are isolated per asset / wallet / headline.

mod market;
mod onchain;
mod sentiment;

pub use market::{MarketCollector, MarketCollectorConfig};
pub use onchain::{OnchainCollector, OnchainCollectorConfig};
pub use sentiment::{SentimentCollector, SentimentCollectorConfig};
