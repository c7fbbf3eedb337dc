pub mod config;
pub mod pattern_document;

pub use config::{AppConfig, ThreadConfig, CONFIG_ENV, DEFAULT_CONFIG_FILE};
pub use pattern_document::{fingerprint, LegendEntry, PatternDocument};
