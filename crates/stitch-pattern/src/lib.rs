#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! stitch-pattern: raster image to cross-stitch chart conversion
//!
//! The crate turns a decoded RGBA bitmap into a stitch grid: every cell gets
//! one thread colour from a fixed palette, and structurally important
//! boundaries are marked as backstitch contour cells.
//!
//! # Quick Start
//!
//! [`PatternBuilder`] is the primary entry point. Every option has a
//! default, the palette included (the built-in `stitch` set):
//!
//! ```
//! use stitch_pattern::{Color, EdgeAlgorithm, PatternBuilder, PixelBuffer};
//!
//! let source = PixelBuffer::filled(40, 30, Color::rgb(70, 130, 180)).unwrap();
//!
//! let pattern = PatternBuilder::default()
//!     .dither(true)
//!     .edge_algorithm(EdgeAlgorithm::Outline)
//!     .build(&source, 20, 15)
//!     .unwrap();
//!
//! assert_eq!(pattern.width(), 20);
//! assert_eq!(pattern.stitch_count(), 20 * 15);
//! ```
//!
//! # Pipeline
//!
//! 1. [`Resampler`]: source size to grid size (the only stage that changes
//!    dimensions)
//! 2. [`EdgeDetector`]: contour cells from the resampled, unquantized grid,
//!    because quantization erases the gradients edges depend on
//! 3. [`contour::refine`]: drops isolated internal edge cells
//! 4. [`quantize()`]: nearest palette colour per cell, optionally with
//!    Floyd-Steinberg error diffusion
//! 5. Assembly into a [`Pattern`]
//!
//! Each stage takes a buffer by reference and returns a new one. Given the
//! same inputs, including palette order, the whole pipeline is
//! deterministic. The one exception is [`derive_kmeans`], an optional palette
//! source whose centroids start from random pixels.
//!
//! # Colour Distance
//!
//! All nearest-colour searches use [`weighted_distance`],
//! `sqrt(0.3*dr² + 0.59*dg² + 0.11*db²)`. Ties go to the earliest palette
//! entry.

pub mod buffer;
pub mod color;
pub mod condition;
pub mod contour;
pub mod edges;
pub mod error;
pub mod grid;
pub mod limits;
pub mod palette;
pub mod pattern;
pub mod quantize;
pub mod resample;

#[cfg(test)]
mod domain_tests;

pub use buffer::PixelBuffer;
pub use color::{hsl_to_rgb, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv, weighted_distance, Color, Hsl, Hsv};
pub use condition::{remove_background, sharpen, SharpenMode};
pub use edges::{
    edges_to_backstitch, sobel_magnitude, Edge, EdgeAlgorithm, EdgeDetector, EdgeKind, EdgeMap,
    EdgeStrength, EdgeThresholds,
};
pub use error::PatternError;
pub use grid::CellKey;
pub use limits::Limits;
pub use palette::{
    derive_kmeans, KMeansOptions, Palette, PaletteColor, PaletteError, ParseColorError,
    BUILTIN_PALETTES, DEFAULT_PALETTE,
};
pub use pattern::{build, PaletteUsage, Pattern, PatternBuilder, PatternConfig};
pub use quantize::{quantize, quantize_indexed, QuantizeOptions, QuantizedImage};
pub use resample::{fit_within, resample, ResampleMode, Resampler};

/// Normalise a user-supplied option name: lowercase, separators removed.
pub(crate) fn option_key(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
