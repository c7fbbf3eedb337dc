//! Thread palettes and nearest-colour lookup.
//!
//! A [`Palette`] is an ordered list of [`PaletteColor`]s. Lookup is a linear
//! scan under [`weighted_distance`](crate::color::weighted_distance); the
//! first entry at the minimal distance wins, so palette order is the
//! tie-break.

mod builtin;
mod error;
mod kmeans;
mod palette;

pub use builtin::{BUILTIN_PALETTES, DEFAULT_PALETTE};
pub use error::{PaletteError, ParseColorError};
pub use kmeans::{derive_kmeans, KMeansOptions};
pub use palette::{Palette, PaletteColor};
