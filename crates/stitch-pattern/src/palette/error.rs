//! Error types for colour parsing and palette construction.

use std::num::ParseIntError;

use thiserror::Error;

/// Error returned when a hex colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string must be 3 or 6 digits after stripping '#'.
    #[error("invalid hex color length in {0:?} (expected 3 or 6 digits)")]
    InvalidLength(String),

    #[error("non-ASCII character in hex color {0:?}")]
    NonAscii(String),

    #[error("invalid hex digit in {input:?}: {source}")]
    InvalidHex {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

/// Error returned when a palette cannot be built or looked up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("palette is empty")]
    Empty,

    #[error("unknown palette {0:?} (known: stitch, dmc-basic)")]
    UnknownPalette(String),

    #[error("invalid color for {name:?}: {source}")]
    ParseColor {
        name: String,
        #[source]
        source: ParseColorError,
    },
}
