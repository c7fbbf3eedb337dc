//! Pipeline orchestration and the terminal [`Pattern`] artifact.

mod builder;
mod config;
mod pattern;

pub use builder::{build, PatternBuilder};
pub use config::PatternConfig;
pub use pattern::{Pattern, PaletteUsage};
