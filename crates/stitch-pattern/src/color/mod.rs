//! Colour representation, colour-model conversions and the distance metric.
//!
//! - [`Color`]: the RGBA record every stage passes around
//! - [`Hsv`] / [`Hsl`]: cylindrical models used for feature classification
//!   and palette listings
//! - [`weighted_distance`]: the luminance-weighted metric behind every
//!   nearest-colour search

mod hsl;
mod hsv;
mod rgba;

pub use hsl::{hsl_to_rgb, rgb_to_hsl, Hsl};
pub use hsv::{hsv_to_rgb, rgb_to_hsv, Hsv};
pub use rgba::Color;

/// Luminance-weighted RGB distance:
/// `sqrt(0.3*dr² + 0.59*dg² + 0.11*db²)`.
///
/// Works on float triples so that error-accumulated values (which may sit
/// outside a byte before clamping) can be measured without rounding.
#[inline]
pub fn weighted_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    (0.3 * dr * dr + 0.59 * dg * dg + 0.11 * db * db).sqrt()
}
