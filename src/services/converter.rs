use std::path::Path;

use stitch_pattern::{derive_kmeans, fit_within, Palette, Pattern, PatternBuilder, PixelBuffer};

use crate::error::AppError;
use crate::models::{AppConfig, PatternDocument};

use super::decode::decode_png_file;

/// Requested grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSize {
    /// Exactly `width x height` cells
    Exact { width: usize, height: usize },
    /// Aspect-preserving, longer side this many cells
    Longest(usize),
}

impl GridSize {
    /// Concrete cell dimensions for a source of the given size.
    pub fn resolve(self, source_width: usize, source_height: usize) -> (usize, usize) {
        match self {
            GridSize::Exact { width, height } => (width, height),
            GridSize::Longest(cells) => fit_within(source_width, source_height, cells),
        }
    }
}

/// Runs the pattern pipeline with an application config.
pub struct ConvertService {
    config: AppConfig,
}

impl ConvertService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Palette for `source`: k-means derived when configured, otherwise the
    /// named palette.
    pub fn palette_for(&self, source: &PixelBuffer) -> Result<Palette, AppError> {
        let named = self.config.resolve_palette(None)?;
        let Some(options) = &self.config.kmeans else {
            return Ok(named);
        };

        let derived = derive_kmeans(source, options)?;
        if self.config.snap_kmeans {
            let snapped = derived.snap_to(&named)?;
            tracing::info!(
                derived = derived.len(),
                snapped = snapped.len(),
                palette = %self.config.palette,
                "Snapped k-means palette"
            );
            Ok(snapped)
        } else {
            tracing::info!(colors = derived.len(), "Derived k-means palette");
            Ok(derived)
        }
    }

    /// Convert an already decoded image.
    pub fn convert(&self, source: &PixelBuffer, grid: GridSize) -> Result<Pattern, AppError> {
        let (width, height) = grid.resolve(source.width(), source.height());
        let palette = self.palette_for(source)?;

        let pattern = PatternBuilder::default()
            .config(self.config.pattern.clone())
            .with_palette(palette)
            .build(source, width, height)?;

        tracing::info!(
            width,
            height,
            stitches = pattern.stitch_count(),
            contours = pattern.contour_count(),
            colors = pattern.palette_used().len(),
            "Pattern built"
        );
        Ok(pattern)
    }

    /// Decode `input`, convert it and return the JSON document.
    pub fn convert_file(&self, input: &Path, grid: GridSize) -> Result<PatternDocument, AppError> {
        let source = decode_png_file(input)?;
        let pattern = self.convert(&source, grid)?;
        Ok(PatternDocument::from_pattern(&pattern))
    }
}
