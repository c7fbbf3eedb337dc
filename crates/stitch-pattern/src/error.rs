//! Pipeline error taxonomy.
//!
//! Every stage validates its own inputs eagerly and fails with one of the
//! [`PatternError`] variants. Nothing in the pipeline clamps an invalid
//! dimension or substitutes default data.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Error returned by every fallible pipeline operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// Target dimensions out of range, or a buffer whose data length does
    /// not match its declared dimensions.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimension {
        width: usize,
        height: usize,
        reason: String,
    },

    /// Empty palette, unknown enum name, or inconsistent tunables.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The requested computation exceeds a configured ceiling.
    #[error("resource limit exceeded: {what} is {requested} (max {limit})")]
    ResourceLimit {
        what: &'static str,
        requested: u64,
        limit: u64,
    },
}

impl PatternError {
    pub(crate) fn dimension(width: usize, height: usize, reason: impl Into<String>) -> Self {
        PatternError::InvalidDimension {
            width,
            height,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        PatternError::Configuration(message.into())
    }
}

impl From<PaletteError> for PatternError {
    fn from(err: PaletteError) -> Self {
        PatternError::Configuration(err.to_string())
    }
}

impl From<ParseColorError> for PatternError {
    fn from(err: ParseColorError) -> Self {
        PatternError::Configuration(err.to_string())
    }
}
