//! PatternBuilder, the composition root of the pipeline.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, debug_span};

use super::config::PatternConfig;
use super::pattern::{PaletteUsage, Pattern};
use crate::buffer::PixelBuffer;
use crate::condition::{remove_background, sharpen, SharpenMode};
use crate::contour;
use crate::edges::{EdgeAlgorithm, EdgeDetector, EdgeMap, EdgeThresholds};
use crate::error::PatternError;
use crate::grid::CellKey;
use crate::limits::Limits;
use crate::palette::Palette;
use crate::quantize::{quantize_indexed, QuantizeOptions};
use crate::resample::{ResampleMode, Resampler};

/// Image-to-pattern converter.
///
/// - [`PatternBuilder::default()`] quantizes against the built-in `stitch`
///   palette; [`new`](Self::new) takes any other [`Palette`]
/// - Configuration methods consume and return `self`
/// - [`build()`](Self::build) takes `&self`, so one builder converts any
///   number of images
///
/// Stage order: resample, optional background removal, edge detection on
/// the unquantized grid, contour refinement, optional sharpening,
/// quantization, assembly. Either a complete [`Pattern`] comes back or an
/// error; nothing partial.
///
/// ```
/// use stitch_pattern::{Color, Palette, PaletteColor, PatternBuilder, PixelBuffer};
///
/// let palette = Palette::new(vec![
///     PaletteColor::new("Red", 255, 0, 0),
///     PaletteColor::new("Black", 0, 0, 0),
/// ]);
/// let source = PixelBuffer::filled(4, 4, Color::rgb(255, 0, 0)).unwrap();
///
/// let pattern = PatternBuilder::new(palette).build(&source, 2, 2).unwrap();
/// assert_eq!(pattern.stitch_count(), 4);
/// assert_eq!(pattern.contour_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    config: PatternConfig,
}

impl PatternBuilder {
    pub fn new(palette: Palette) -> Self {
        Self {
            config: PatternConfig {
                palette,
                ..PatternConfig::default()
            },
        }
    }

    /// Replace every option at once, the palette included.
    pub fn config(mut self, config: PatternConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    #[inline]
    pub fn resample_mode(mut self, mode: ResampleMode) -> Self {
        self.config.resample_mode = mode;
        self
    }

    #[inline]
    pub fn dither(mut self, enabled: bool) -> Self {
        self.config.dither = enabled;
        self
    }

    #[inline]
    pub fn edge_algorithm(mut self, algorithm: EdgeAlgorithm) -> Self {
        self.config.edge_algorithm = algorithm;
        self
    }

    #[inline]
    pub fn contour_enabled(mut self, enabled: bool) -> Self {
        self.config.contour_enabled = enabled;
        self
    }

    #[inline]
    pub fn transparency_threshold(mut self, threshold: u8) -> Self {
        self.config.transparency_threshold = threshold;
        self
    }

    #[inline]
    pub fn black_threshold(mut self, threshold: Option<u8>) -> Self {
        self.config.black_threshold = threshold;
        self
    }

    #[inline]
    pub fn contrast_ratio(mut self, ratio: f32) -> Self {
        self.config.contrast_ratio = ratio;
        self
    }

    #[inline]
    pub fn edge_thresholds(mut self, thresholds: EdgeThresholds) -> Self {
        self.config.edge_thresholds = thresholds;
        self
    }

    #[inline]
    pub fn sharpen(mut self, mode: SharpenMode) -> Self {
        self.config.sharpen = mode;
        self
    }

    #[inline]
    pub fn remove_background(mut self, enabled: bool) -> Self {
        self.config.remove_background = enabled;
        self
    }

    #[inline]
    pub fn limits(mut self, limits: Limits) -> Self {
        self.config.limits = limits;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    pub fn current_config(&self) -> &PatternConfig {
        &self.config
    }

    /// Convert `source` into a `target_width x target_height` pattern.
    ///
    /// # Errors
    ///
    /// - [`PatternError::Configuration`]: empty palette or invalid tunables
    /// - [`PatternError::InvalidDimension`]: zero or oversized target side
    /// - [`PatternError::ResourceLimit`]: target cells or source pixels over
    ///   the configured [`Limits`]
    pub fn build(
        &self,
        source: &PixelBuffer,
        target_width: usize,
        target_height: usize,
    ) -> Result<Pattern, PatternError> {
        let config = &self.config;
        let span = debug_span!(
            "build",
            target_width,
            target_height,
            edges = %config.edge_algorithm,
            dither = config.dither
        );
        let _guard = span.enter();

        let palette = &config.palette;
        config.validate()?;
        palette.ensure_non_empty()?;
        config.limits.check_target(target_width, target_height)?;
        config.limits.check_source(source.width(), source.height())?;

        let resampled = Resampler::new(config.resample_mode)
            .contrast_ratio(config.contrast_ratio)
            .limits(config.limits)
            .resample(source, target_width, target_height)?;
        let resampled = if config.remove_background {
            remove_background(&resampled)
        } else {
            resampled
        };

        let edges = match config.edge_algorithm {
            EdgeAlgorithm::None => EdgeMap::new(target_width, target_height),
            algorithm => EdgeDetector::new(algorithm)
                .thresholds(config.edge_thresholds)
                .transparency_threshold(config.transparency_threshold)
                .detect(&resampled)?,
        };
        let edges = if config.contour_enabled {
            contour::refine(&edges)
        } else {
            edges
        };

        let conditioned = sharpen(&resampled, config.sharpen);
        let quantized = quantize_indexed(
            &conditioned,
            palette,
            &QuantizeOptions {
                dither: config.dither,
                transparency_threshold: config.transparency_threshold,
                black_threshold: config.black_threshold,
            },
        )?;

        let mut counts = vec![0usize; palette.len()];
        let mut cell_colors = BTreeMap::new();
        for y in 0..target_height {
            for x in 0..target_width {
                if let Some(i) = quantized.index(x, y) {
                    counts[i] += 1;
                    cell_colors.insert(CellKey::new(x, y), palette.colors()[i].color());
                }
            }
        }
        let palette_used: Vec<PaletteUsage> = counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(index, &count)| PaletteUsage {
                index,
                color: palette.colors()[index].clone(),
                count,
            })
            .collect();
        let contour_cells: BTreeSet<CellKey> = edges.to_backstitch();

        debug!(
            stitches = cell_colors.len(),
            contours = contour_cells.len(),
            colors = palette_used.len(),
            "pattern assembled"
        );
        Ok(Pattern::new(
            target_width,
            target_height,
            cell_colors,
            contour_cells,
            palette_used,
        ))
    }
}

/// One-shot conversion with an explicit config.
///
/// `PatternConfig::default()` is a complete configuration, palette included.
pub fn build(
    source: &PixelBuffer,
    target_width: usize,
    target_height: usize,
    config: &PatternConfig,
) -> Result<Pattern, PatternError> {
    PatternBuilder::default()
        .config(config.clone())
        .build(source, target_width, target_height)
}
