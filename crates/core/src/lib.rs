pub mod config;
pub mod config_loader;
pub mod indicators;

pub use config::{AppConfig, CollectorsConfig, DatabaseConfig, TrackerConfig};
pub use config_loader::ConfigLoader;
pub use indicators::{relative_strength_index, DEFAULT_RSI_PERIOD};
