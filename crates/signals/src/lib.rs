//! Confidence scoring and signal generation.
//!
//! This crate turns stored market, sentiment, and on-chain windows into a
//! composite confidence score per asset and emits BUY signals when the
//! score clears the emission threshold. It also hosts the thin collectors
//! that keep those windows populated.

pub mod collector;
pub mod generator;
pub mod scorer;

#[cfg(test)]
mod testutil;

pub use generator::{composite_confidence, SignalGenerator, EMISSION_THRESHOLD};
pub use scorer::{round2, technical_score, ConfidenceBreakdown, ConfidenceScorer};
