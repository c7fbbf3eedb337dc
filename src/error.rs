use std::path::PathBuf;

use stitch_pattern::{PaletteError, PatternError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("Unsupported PNG layout: {color_type:?} at {bit_depth:?}")]
    UnsupportedPng {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("Config error in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_unsupported_png() {
        let error = AppError::UnsupportedPng {
            color_type: png::ColorType::Indexed,
            bit_depth: png::BitDepth::Four,
        };
        assert_eq!(error.to_string(), "Unsupported PNG layout: Indexed at Four");
    }

    #[test]
    fn test_app_error_from_pattern_error() {
        let pattern_error = PatternError::Configuration("palette is empty".to_string());
        let app_error: AppError = pattern_error.into();
        match app_error {
            AppError::Pattern(_) => {}
            _ => panic!("Expected Pattern variant"),
        }
    }

    #[test]
    fn test_app_error_from_palette_error() {
        let app_error: AppError = PaletteError::UnknownPalette("neon".to_string()).into();
        assert_eq!(
            app_error.to_string(),
            "Palette error: unknown palette \"neon\" (known: stitch, dmc-basic)"
        );
    }

    #[test]
    fn test_app_error_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let error: AppError = io.into();
        assert_eq!(error.to_string(), "IO error: missing.png");
    }
}
