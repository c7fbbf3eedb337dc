//! The RGBA pixel buffer passed between stages.

use crate::color::Color;
use crate::error::PatternError;

/// Row-major RGBA8 image.
///
/// Constructed through [`PixelBuffer::new`], which enforces
/// `width > 0`, `height > 0` and `data.len() == width * height * 4`.
/// Stages never mutate a buffer they receive; each produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, PatternError> {
        if width == 0 || height == 0 {
            return Err(PatternError::dimension(
                width,
                height,
                "buffer width and height must be positive",
            ));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| PatternError::dimension(width, height, "buffer size overflows"))?;
        if data.len() != expected {
            return Err(PatternError::dimension(
                width,
                height,
                format!("data length {} does not match {expected}", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer of the given size filled with one colour.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self, PatternError> {
        let data = color
            .to_bytes()
            .repeat(width.saturating_mul(height));
        Self::new(width, height, data)
    }

    /// Build from per-pixel colours in row-major order.
    pub fn from_colors(
        width: usize,
        height: usize,
        colors: &[Color],
    ) -> Result<Self, PatternError> {
        let data = colors.iter().flat_map(|c| c.to_bytes()).collect();
        Self::new(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false: a valid buffer has at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Colour at `(x, y)`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let i = (y * self.width + x) * 4;
        Color::from_slice(&self.data[i..i + 4])
    }

    /// Colour at signed coordinates, `None` outside the image.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Option<Color> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixel(x as usize, y as usize))
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.data.chunks_exact(4).map(Color::from_slice)
    }

    /// New buffer of the same size with every pixel passed through `f`.
    pub fn map_pixels(&self, mut f: impl FnMut(usize, usize, Color) -> Color) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            for x in 0..self.width {
                data.extend_from_slice(&f(x, y, self.pixel(x, y)).to_bytes());
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}
