//! Recognised pipeline options and their defaults.

use serde::{Deserialize, Serialize};

use crate::condition::SharpenMode;
use crate::edges::{EdgeAlgorithm, EdgeThresholds};
use crate::error::PatternError;
use crate::limits::Limits;
use crate::palette::Palette;
use crate::resample::{ResampleMode, DEFAULT_CONTRAST_RATIO};

/// Everything [`PatternBuilder`](super::PatternBuilder) can be told.
///
/// Every field has a default, so an empty YAML or JSON object deserializes
/// to [`PatternConfig::default()`]. The palette is not part of the
/// serialized form; it is always the built-in default after
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatternConfig {
    /// Threads to quantize against. Defaults to the `stitch` palette.
    #[serde(skip, default = "Palette::default_builtin")]
    pub palette: Palette,
    pub resample_mode: ResampleMode,
    pub dither: bool,
    pub edge_algorithm: EdgeAlgorithm,
    /// Prune isolated internal edges after detection.
    pub contour_enabled: bool,
    pub transparency_threshold: u8,
    /// `None` disables near-black snapping.
    pub black_threshold: Option<u8>,
    /// Detail-preserving resampling: dominant-pixel brightness ratio.
    pub contrast_ratio: f32,
    pub edge_thresholds: EdgeThresholds,
    pub sharpen: SharpenMode,
    pub remove_background: bool,
    pub limits: Limits,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default_builtin(),
            resample_mode: ResampleMode::AreaAverage,
            dither: false,
            edge_algorithm: EdgeAlgorithm::None,
            contour_enabled: true,
            transparency_threshold: 20,
            black_threshold: Some(30),
            contrast_ratio: DEFAULT_CONTRAST_RATIO,
            edge_thresholds: EdgeThresholds::default(),
            sharpen: SharpenMode::None,
            remove_background: false,
            limits: Limits::default(),
        }
    }
}

impl PatternConfig {
    /// Reject inconsistent tunables before any work starts.
    pub fn validate(&self) -> Result<(), PatternError> {
        if !(self.contrast_ratio.is_finite() && self.contrast_ratio > 0.0) {
            return Err(PatternError::config(format!(
                "contrast ratio must be positive, got {}",
                self.contrast_ratio
            )));
        }
        self.edge_thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PatternConfig::default();
        assert_eq!(config.resample_mode, ResampleMode::AreaAverage);
        assert!(!config.dither);
        assert_eq!(config.edge_algorithm, EdgeAlgorithm::None);
        assert!(config.contour_enabled);
        assert_eq!(config.transparency_threshold, 20);
        assert_eq!(config.black_threshold, Some(30));
        assert!((config.contrast_ratio - 1.3).abs() < f32::EPSILON);
        assert_eq!(config.palette.len(), 21);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_palette_stays_out_of_serialized_form() {
        let json = serde_json::to_value(PatternConfig::default()).unwrap();
        assert!(json.get("palette").is_none());
        assert_eq!(json["edgeAlgorithm"], "none");

        let parsed: PatternConfig = serde_json::from_str(r#"{"dither":true}"#).unwrap();
        assert!(parsed.dither);
        assert_eq!(parsed.palette, Palette::default_builtin());
    }

    #[test]
    fn test_rejects_zero_contrast_ratio() {
        let config = PatternConfig {
            contrast_ratio: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PatternError::Configuration(_))
        ));
    }
}
