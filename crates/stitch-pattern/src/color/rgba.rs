//! The single colour record used throughout the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// An 8-bit RGBA colour.
///
/// Every stage reads and writes this one representation; hex strings and
/// float triples only appear at the boundaries (config parsing, error
/// diffusion, serialisation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Background representation for pixels below the transparency threshold.
    pub const EMPTY: Color = Color::new(255, 255, 255, 0);

    /// Opaque pure black, the backstitch colour.
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub fn from_slice(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn rgb_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// RGB channels as floats in 0..=255, the working space of error diffusion.
    #[inline]
    pub fn rgb_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Same colour with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Whether the pixel counts as stitched at the given alpha threshold.
    #[inline]
    pub fn is_visible(self, transparency_threshold: u8) -> bool {
        self.a >= transparency_threshold
    }

    /// Rec. 601 luma: `0.299R + 0.587G + 0.114B`.
    #[inline]
    pub fn luma(self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Unweighted channel sum `R + G + B`.
    #[inline]
    pub fn intensity(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// Sum of absolute RGB channel differences (alpha ignored).
    #[inline]
    pub fn channel_delta(self, other: Color) -> u32 {
        self.r.abs_diff(other.r) as u32
            + self.g.abs_diff(other.g) as u32
            + self.b.abs_diff(other.b) as u32
    }

    /// True when all three RGB channels are strictly below `threshold`.
    #[inline]
    pub fn is_near_black(self, threshold: u8) -> bool {
        self.r < threshold && self.g < threshold && self.b < threshold
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive) into an
    /// opaque colour.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // Digits are sliced by byte offset below.
        if !hex.is_ascii() {
            return Err(ParseColorError::NonAscii(s.to_string()));
        }

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(ParseColorError::InvalidLength(s.to_string())),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|source| ParseColorError::InvalidHex {
                    input: s.to_string(),
                    source,
                })
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!("#FF8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("#F80".parse::<Color>().unwrap(), Color::rgb(255, 136, 0));
        assert_eq!("  #000  ".parse::<Color>().unwrap(), Color::BLACK);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "#12345".parse::<Color>(),
            Err(ParseColorError::InvalidLength(_))
        ));
        assert!(matches!(
            "#GG0000".parse::<Color>(),
            Err(ParseColorError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_multibyte_digits() {
        // Two 3-byte characters pass a byte-length check of 6.
        assert_eq!(
            "#€€".parse::<Color>(),
            Err(ParseColorError::NonAscii("#€€".to_string()))
        );
        assert!(matches!(
            "ff€".parse::<Color>(),
            Err(ParseColorError::NonAscii(_))
        ));
        assert!(matches!(
            "é".parse::<Color>(),
            Err(ParseColorError::NonAscii(_))
        ));
    }

    #[test]
    fn test_to_hex_is_lowercase_and_padded() {
        assert_eq!(Color::rgb(255, 0, 10).to_hex(), "#ff000a");
        assert_eq!(Color::EMPTY.to_hex(), "#ffffff");
    }

    #[test]
    fn test_channel_delta_and_intensity() {
        let a = Color::rgb(10, 200, 30);
        let b = Color::rgb(20, 100, 30);
        assert_eq!(a.channel_delta(b), 110);
        assert_eq!(a.intensity(), 240);
    }

    #[test]
    fn test_luma_weights() {
        assert!((Color::rgb(255, 255, 255).luma() - 255.0).abs() < 1e-3);
        assert!((Color::rgb(0, 255, 0).luma() - 149.685).abs() < 1e-3);
    }

    #[test]
    fn test_near_black_is_strict() {
        assert!(Color::rgb(29, 29, 29).is_near_black(30));
        assert!(!Color::rgb(29, 30, 29).is_near_black(30));
    }
}
