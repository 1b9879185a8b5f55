//! Sentiment reading data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scored headline. Append-only; rows are never updated.
///
/// Scoring reads back only the bare scores, so this model is write-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub timestamp: DateTime<Utc>,
    /// Where the headline came from (e.g. "news_api")
    pub source: String,
    pub headline: String,
    /// Sentiment score in [-1, 1]; -1 very negative, 1 very positive
    pub score: f64,
}

impl SentimentRecord {
    /// Creates a new reading, clamping the score into [-1, 1].
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, source: String, headline: String, score: f64) -> Self {
        Self {
            timestamp,
            source,
            headline,
            score: score.clamp(-1.0, 1.0),
        }
    }
}
