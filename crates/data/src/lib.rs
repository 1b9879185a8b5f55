//! Data storage and management for the confluence signal engine.
//!
//! This crate provides:
//! - Database client for `PostgreSQL` with idempotent schema bootstrap
//! - Data models for candles, sentiment readings, on-chain transfers, and signals
//! - Store traits consumed by the scorer, generator, and backtest evaluator
//! - Repositories for typed database access

pub mod database;
pub mod models;
pub mod repositories;
pub mod stores;

pub use database::DatabaseClient;

// Re-export models
pub use models::{CandleRecord, OnchainTxRecord, SentimentRecord, SignalKind, SignalRecord};

// Re-export store contracts
pub use stores::{MarketStore, OnchainStore, SentimentStore, SignalStore};

// Re-export repositories
pub use repositories::{
    CandleRepository, OnchainTxRepository, Repositories, SentimentRepository, SignalRepository,
};
