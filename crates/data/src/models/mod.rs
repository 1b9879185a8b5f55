//! Data models for all pipeline entities.

mod candle;
mod onchain;
mod sentiment;
mod signal;

pub use candle::CandleRecord;
pub use onchain::OnchainTxRecord;
pub use sentiment::SentimentRecord;
pub use signal::{SignalKind, SignalRecord};
