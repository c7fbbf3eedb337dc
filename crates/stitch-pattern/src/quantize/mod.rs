//! Palette quantization with optional Floyd-Steinberg error diffusion.
//!
//! Every visible pixel (alpha at or above the transparency threshold) is
//! replaced by a palette colour. Pixels below the threshold become
//! [`Color::EMPTY`] and are skipped by the diffusion scan entirely: they
//! neither emit error nor receive it.
//!
//! With dithering on, pixels are visited strictly row-major, left to right.
//! The scan is sequential by construction; only the non-dithered path runs
//! in parallel.

mod accumulator;
mod kernel;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::PatternError;
use crate::palette::Palette;

use accumulator::ErrorAccumulator;
pub use kernel::{Kernel, FLOYD_STEINBERG};

/// Quantizer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuantizeOptions {
    pub dither: bool,
    /// Alpha below this is background.
    pub transparency_threshold: u8,
    /// Pixels with every RGB channel below this snap to the palette's pure
    /// black entry, bypassing the nearest-colour search. Has no effect when
    /// the palette has no `(0, 0, 0)` entry.
    pub black_threshold: Option<u8>,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            dither: false,
            transparency_threshold: 20,
            black_threshold: Some(30),
        }
    }
}

impl QuantizeOptions {
    pub fn dithered() -> Self {
        Self {
            dither: true,
            ..Self::default()
        }
    }
}

/// Palette indices for a quantized image.
///
/// `None` marks a background pixel. The indexed form is canonical; the RGBA
/// buffer is derived from it on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedImage {
    indices: Vec<Option<usize>>,
    alpha: Vec<u8>,
    width: usize,
    height: usize,
}

impl QuantizedImage {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette index per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[Option<usize>] {
        &self.indices
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.indices[y * self.width + x]
    }

    /// RGBA buffer: palette RGB with the source alpha for visible pixels,
    /// [`Color::EMPTY`] for background.
    pub fn to_buffer(&self, palette: &Palette) -> Result<PixelBuffer, PatternError> {
        let colors: Vec<Color> = self
            .indices
            .iter()
            .zip(&self.alpha)
            .map(|(index, &a)| match index.and_then(|i| palette.get(i)) {
                Some(entry) => entry.color().with_alpha(a),
                None => Color::EMPTY,
            })
            .collect();
        PixelBuffer::from_colors(self.width, self.height, &colors)
    }
}

/// Quantize `buffer` to `palette`, returning an RGBA buffer of the same size.
///
/// # Errors
///
/// [`PatternError::Configuration`] when the palette is empty.
pub fn quantize(
    buffer: &PixelBuffer,
    palette: &Palette,
    options: &QuantizeOptions,
) -> Result<PixelBuffer, PatternError> {
    quantize_indexed(buffer, palette, options)?.to_buffer(palette)
}

/// Quantize `buffer` to palette indices.
pub fn quantize_indexed(
    buffer: &PixelBuffer,
    palette: &Palette,
    options: &QuantizeOptions,
) -> Result<QuantizedImage, PatternError> {
    palette.ensure_non_empty()?;
    let black = options
        .black_threshold
        .and_then(|t| palette.black_index().map(|i| (t, i)));

    let indices = if options.dither {
        diffuse(buffer, palette, &FLOYD_STEINBERG, options.transparency_threshold, black)?
    } else {
        buffer
            .data()
            .par_chunks_exact(4)
            .map(|px| {
                let c = Color::from_slice(px);
                if !c.is_visible(options.transparency_threshold) {
                    return Ok(None);
                }
                if let Some((t, i)) = black {
                    if c.is_near_black(t) {
                        return Ok(Some(i));
                    }
                }
                palette.nearest_index(c.rgb_f32()).map(Some)
            })
            .collect::<Result<Vec<_>, PatternError>>()?
    };

    let visible = indices.iter().filter(|i| i.is_some()).count();
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        dither = options.dither,
        visible,
        palette = palette.len(),
        "quantized"
    );

    Ok(QuantizedImage {
        indices,
        alpha: buffer.data().chunks_exact(4).map(|px| px[3]).collect(),
        width: buffer.width(),
        height: buffer.height(),
    })
}

/// Sequential error-diffusion scan.
fn diffuse(
    buffer: &PixelBuffer,
    palette: &Palette,
    kernel: &Kernel,
    transparency_threshold: u8,
    black: Option<(u8, usize)>,
) -> Result<Vec<Option<usize>>, PatternError> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut output = vec![None; width * height];
    let mut errors = ErrorAccumulator::new(width, height);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let source = buffer.pixel(x, y);
            if !source.is_visible(transparency_threshold) {
                continue;
            }
            let idx = y * width + x;

            // Snapped blacks absorb whatever error reached them.
            if let Some((t, i)) = black {
                if source.is_near_black(t) {
                    output[idx] = Some(i);
                    continue;
                }
            }

            let accumulated = errors.get(x, y);
            let base = source.rgb_f32();
            let pixel = [
                (base[0] + accumulated[0]).clamp(0.0, 255.0),
                (base[1] + accumulated[1]).clamp(0.0, 255.0),
                (base[2] + accumulated[2]).clamp(0.0, 255.0),
            ];

            let nearest = palette.nearest_index(pixel)?;
            output[idx] = Some(nearest);

            let target = palette.colors()[nearest].rgb_f32();
            let error = [
                pixel[0] - target[0],
                pixel[1] - target[1],
                pixel[2] - target[2],
            ];

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as isize + dx as isize;
                let ny = y as isize + dy as isize;
                let receives = buffer
                    .get(nx, ny)
                    .is_some_and(|n| n.is_visible(transparency_threshold));
                if receives {
                    let share = weight as f32 / divisor;
                    errors.add(nx, ny, [error[0] * share, error[1] * share, error[2] * share]);
                }
            }
        }
    }
    Ok(output)
}
