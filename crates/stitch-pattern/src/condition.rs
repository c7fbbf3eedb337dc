//! Optional conditioning between resampling and quantization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::PatternError;

/// Channels above this on all of R, G and B count as paper-white background.
pub const BACKGROUND_LEVEL: u8 = 250;

/// Turn near-white pixels into the empty representation.
pub fn remove_background(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.map_pixels(|_, _, c| {
        if c.r > BACKGROUND_LEVEL && c.g > BACKGROUND_LEVEL && c.b > BACKGROUND_LEVEL {
            Color::EMPTY
        } else {
            c
        }
    })
}

/// Sharpening applied just before quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SharpenMode {
    #[default]
    None,
    Subtle,
    Strong,
}

impl SharpenMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SharpenMode::None => "none",
            SharpenMode::Subtle => "subtle",
            SharpenMode::Strong => "strong",
        }
    }

    fn kernel(self) -> Option<[[f32; 3]; 3]> {
        match self {
            SharpenMode::None => None,
            SharpenMode::Subtle => Some([[0.0, -0.25, 0.0], [-0.25, 2.0, -0.25], [0.0, -0.25, 0.0]]),
            SharpenMode::Strong => Some([[-1.0, -1.0, -1.0], [-1.0, 9.0, -1.0], [-1.0, -1.0, -1.0]]),
        }
    }
}

impl fmt::Display for SharpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharpenMode {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::option_key(s).as_str() {
            "none" | "off" => Ok(SharpenMode::None),
            "subtle" => Ok(SharpenMode::Subtle),
            "strong" => Ok(SharpenMode::Strong),
            _ => Err(PatternError::config(format!(
                "unknown sharpen mode {s:?} (expected none, subtle or strong)"
            ))),
        }
    }
}

/// Convolve RGB of interior pixels with the mode's 3x3 kernel.
///
/// Alpha and the one-pixel border are copied unchanged. Results are
/// rounded and clamped to 0..=255.
pub fn sharpen(buffer: &PixelBuffer, mode: SharpenMode) -> PixelBuffer {
    let Some(kernel) = mode.kernel() else {
        return buffer.clone();
    };
    let (w, h) = (buffer.width(), buffer.height());
    buffer.map_pixels(|x, y, c| {
        if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            return c;
        }
        let mut sum = [0.0f32; 3];
        for (ky, row) in kernel.iter().enumerate() {
            for (kx, weight) in row.iter().enumerate() {
                let n = buffer.pixel(x + kx - 1, y + ky - 1);
                sum[0] += n.r as f32 * weight;
                sum[1] += n.g as f32 * weight;
                sum[2] += n.b as f32 * weight;
            }
        }
        let byte = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Color::new(byte(sum[0]), byte(sum[1]), byte(sum[2]), c.a)
    })
}
