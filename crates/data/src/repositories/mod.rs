//! Typed repositories over the `PostgreSQL` pool.

mod candle_repo;
mod onchain_repo;
mod sentiment_repo;
mod signal_repo;

pub use candle_repo::CandleRepository;
pub use onchain_repo::OnchainTxRepository;
pub use sentiment_repo::SentimentRepository;
pub use signal_repo::SignalRepository;

use sqlx::PgPool;

/// Bundle of all repositories sharing one pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub candles: CandleRepository,
    pub sentiment: SentimentRepository,
    pub onchain: OnchainTxRepository,
    pub signals: SignalRepository,
}

impl Repositories {
    /// Creates all repositories over a shared pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            candles: CandleRepository::new(pool.clone()),
            sentiment: SentimentRepository::new(pool.clone()),
            onchain: OnchainTxRepository::new(pool.clone()),
            signals: SignalRepository::new(pool),
        }
    }
}
