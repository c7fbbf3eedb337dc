//! Grid resampling: source image to stitch-grid resolution.
//!
//! This is the only stage that changes dimensions. Two strategies are
//! available through [`ResampleMode`]:
//!
//! - [`ResampleMode::AreaAverage`]: box filter over each cell's source
//!   footprint
//! - [`ResampleMode::DetailPreserving`]: box filter, but a high-contrast
//!   pixel inside the footprint wins when it is markedly brighter than the
//!   average
//!
//! Footprints are `floor(x * scale) .. ceil((x + 1) * scale)` clamped to
//! the source bounds, with no wraparound.

mod area;
mod detail;
mod sizing;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::PatternError;
use crate::limits::Limits;

pub use sizing::fit_within;

/// Default brightness ratio for [`ResampleMode::DetailPreserving`].
pub const DEFAULT_CONTRAST_RATIO: f32 = 1.3;

/// Resampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResampleMode {
    #[default]
    AreaAverage,
    DetailPreserving,
}

impl ResampleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResampleMode::AreaAverage => "areaAverage",
            ResampleMode::DetailPreserving => "detailPreserving",
        }
    }
}

impl fmt::Display for ResampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResampleMode {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::option_key(s).as_str() {
            "areaaverage" | "area" => Ok(ResampleMode::AreaAverage),
            "detailpreserving" | "detail" => Ok(ResampleMode::DetailPreserving),
            _ => Err(PatternError::config(format!(
                "unknown resample mode {s:?} (expected areaAverage or detailPreserving)"
            ))),
        }
    }
}

/// Integer source span `[start, end)` covered by target index `i`.
pub(crate) fn footprint(i: usize, scale: f64, source_len: usize) -> (usize, usize) {
    let start = ((i as f64 * scale).floor() as usize).min(source_len);
    let end = (((i + 1) as f64 * scale).ceil() as usize).min(source_len);
    (start, end)
}

/// Source index nearest to the centre of target index `i`.
pub(crate) fn nearest_source(i: usize, scale: f64, source_len: usize) -> usize {
    let centre = (i as f64 + 0.5) * scale;
    (centre.floor() as usize).min(source_len - 1)
}

/// Configured resampler.
///
/// ```
/// use stitch_pattern::{Color, PixelBuffer, ResampleMode, Resampler};
///
/// let source = PixelBuffer::filled(8, 8, Color::rgb(10, 20, 30)).unwrap();
/// let grid = Resampler::new(ResampleMode::AreaAverage)
///     .resample(&source, 3, 2)
///     .unwrap();
/// assert_eq!(grid.data().len(), 3 * 2 * 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resampler {
    mode: ResampleMode,
    contrast_ratio: f32,
    limits: Limits,
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new(ResampleMode::default())
    }
}

impl Resampler {
    pub fn new(mode: ResampleMode) -> Self {
        Self {
            mode,
            contrast_ratio: DEFAULT_CONTRAST_RATIO,
            limits: Limits::default(),
        }
    }

    /// Brightness ratio a dominant pixel must exceed the footprint average by.
    pub fn contrast_ratio(mut self, ratio: f32) -> Self {
        self.contrast_ratio = ratio;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn mode(&self) -> ResampleMode {
        self.mode
    }

    /// Produce a `target_width x target_height` buffer from `source`.
    ///
    /// # Errors
    ///
    /// - [`PatternError::InvalidDimension`] for a zero or oversized side
    /// - [`PatternError::ResourceLimit`] when the target cell count or the
    ///   source pixel count exceeds [`Limits`]
    /// - [`PatternError::Configuration`] for a non-positive contrast ratio
    pub fn resample(
        &self,
        source: &PixelBuffer,
        target_width: usize,
        target_height: usize,
    ) -> Result<PixelBuffer, PatternError> {
        self.limits.check_target(target_width, target_height)?;
        self.limits.check_source(source.width(), source.height())?;
        if !(self.contrast_ratio.is_finite() && self.contrast_ratio > 0.0) {
            return Err(PatternError::config(format!(
                "contrast ratio must be positive, got {}",
                self.contrast_ratio
            )));
        }

        debug!(
            source_width = source.width(),
            source_height = source.height(),
            target_width,
            target_height,
            mode = %self.mode,
            "resampling"
        );

        let data = match self.mode {
            ResampleMode::AreaAverage => area::area_average(source, target_width, target_height),
            ResampleMode::DetailPreserving => {
                detail::detail_preserving(source, target_width, target_height, self.contrast_ratio)
            }
        };
        PixelBuffer::new(target_width, target_height, data)
    }
}

/// Resample with default ratio and limits.
pub fn resample(
    source: &PixelBuffer,
    target_width: usize,
    target_height: usize,
    mode: ResampleMode,
) -> Result<PixelBuffer, PatternError> {
    Resampler::new(mode).resample(source, target_width, target_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_output_size_matches_request() {
        let source = PixelBuffer::filled(7, 5, Color::rgb(1, 2, 3)).unwrap();
        for (w, h) in [(1, 1), (3, 2), (7, 5), (20, 13)] {
            for mode in [ResampleMode::AreaAverage, ResampleMode::DetailPreserving] {
                let out = resample(&source, w, h, mode).unwrap();
                assert_eq!(out.data().len(), w * h * 4, "{mode} {w}x{h}");
            }
        }
    }

    #[test]
    fn test_rejects_bad_targets() {
        let source = PixelBuffer::filled(4, 4, Color::BLACK).unwrap();
        assert!(matches!(
            resample(&source, 0, 4, ResampleMode::AreaAverage),
            Err(PatternError::InvalidDimension { .. })
        ));
        assert!(matches!(
            resample(&source, 4, 2001, ResampleMode::AreaAverage),
            Err(PatternError::InvalidDimension { .. })
        ));
        let tight = Resampler::default().limits(Limits::default().with_max_target_cells(10));
        assert!(matches!(
            tight.resample(&source, 4, 4),
            Err(PatternError::ResourceLimit { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let source = PixelBuffer::filled(4, 4, Color::BLACK).unwrap();
        let r = Resampler::new(ResampleMode::DetailPreserving).contrast_ratio(0.0);
        assert!(matches!(
            r.resample(&source, 2, 2),
            Err(PatternError::Configuration(_))
        ));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("areaAverage".parse::<ResampleMode>().unwrap(), ResampleMode::AreaAverage);
        assert_eq!(
            "detail-preserving".parse::<ResampleMode>().unwrap(),
            ResampleMode::DetailPreserving
        );
        assert!(matches!(
            "bicubic".parse::<ResampleMode>(),
            Err(PatternError::Configuration(_))
        ));
    }

    #[test]
    fn test_footprint_is_clamped_and_non_empty_when_downscaling() {
        assert_eq!(footprint(0, 2.0, 4), (0, 2));
        assert_eq!(footprint(1, 2.0, 4), (2, 4));
        // 5 -> 3: footprints overlap at fractional scale
        assert_eq!(footprint(1, 5.0 / 3.0, 5), (1, 4));
        assert_eq!(footprint(2, 5.0 / 3.0, 5), (3, 5));
    }
}
