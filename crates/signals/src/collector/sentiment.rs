//! Sentiment collector.
//!
//! Scores news headlines through an OpenAI-compatible chat completions
//! endpoint and stores one reading per headline.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use confluence_data::{SentimentRecord, SentimentRepository};

const SYSTEM_PROMPT: &str = "You are a sentiment analysis bot. Analyze the sentiment of the given \
     headline and return a score between -1 (very negative) and 1 (very positive). Only return \
     the score as a float.";

/// Configuration for the sentiment collector.
#[derive(Debug, Clone)]
pub struct SentimentCollectorConfig {
    /// Chat completions endpoint URL
    pub api_url: String,
    pub api_key: String,
    /// Model identifier passed to the endpoint
    pub model: String,
    /// Source label stored with each reading
    pub source: String,
}

pub struct SentimentCollector {
    config: SentimentCollectorConfig,
    client: reqwest::Client,
    repo: SentimentRepository,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl SentimentCollector {
    /// Creates a collector writing through the given repository.
    #[must_use]
    pub fn new(config: SentimentCollectorConfig, repo: SentimentRepository) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            repo,
        }
    }

    /// Scores and stores each headline.
    ///
    /// A failing headline is logged and skipped.
    ///
    /// # Returns
    /// The number of readings stored.
    pub async fn collect(&self, headlines: &[String]) -> Result<u64> {
        let mut stored = 0u64;

        for headline in headlines {
            match self.score_headline(headline).await {
                Ok(score) => {
                    let record = SentimentRecord::new(
                        Utc::now(),
                        self.config.source.clone(),
                        headline.clone(),
                        score,
                    );
                    if let Err(e) = self.repo.insert(&record).await {
                        tracing::error!("Failed to store sentiment for '{}': {:#}", headline, e);
                    } else {
                        tracing::info!("Scored '{}' at {:.2}", headline, record.score);
                        stored += 1;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to score '{}': {:#}", headline, e);
                }
            }
        }

        Ok(stored)
    }

    async fn score_headline(&self, headline: &str) -> Result<f64> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Analyze the sentiment of this headline: '{headline}'"),
                },
            ],
            temperature: 0.0,
        };

        let response: ChatResponse = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Sentiment request failed")?
            .error_for_status()
            .context("Sentiment request rejected")?
            .json()
            .await
            .context("Failed to parse sentiment response")?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .ok_or_else(|| anyhow!("sentiment response had no choices"))?;

        parse_score(content)
    }
}

/// Parses the model reply as a bare float score.
fn parse_score(content: &str) -> Result<f64> {
    content
        .trim()
        .parse::<f64>()
        .with_context(|| format!("sentiment response was not a number: '{content}'"))
}
