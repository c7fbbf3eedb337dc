//! Palette struct with nearest-colour matching.

use serde::{Deserialize, Serialize};

use super::builtin;
use super::error::PaletteError;
use crate::color::{weighted_distance, Color};
use crate::error::PatternError;

/// A named thread colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub name: String,
    /// Chart symbol printed in the legend, when the palette defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<char>,
}

impl PaletteColor {
    pub fn new(name: impl Into<String>, r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            name: name.into(),
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Opaque [`Color`] for this entry.
    #[inline]
    pub fn color(&self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }

    #[inline]
    pub fn rgb_f32(&self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    pub fn to_hex(&self) -> String {
        self.color().to_hex()
    }
}

/// Ordered set of thread colours.
///
/// Duplicate colours are allowed; insertion order decides ties. An empty
/// palette can be constructed (so that configuration errors surface at
/// lookup time with a proper error rather than at load time), but every
/// lookup on it fails with [`PatternError::Configuration`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

impl Palette {
    pub fn new(colors: Vec<PaletteColor>) -> Self {
        Self { colors }
    }

    /// Build a palette from `(name, hex)` pairs.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] for no entries, [`PaletteError::ParseColor`]
    /// naming the first entry whose hex string does not parse.
    pub fn from_hex<N: AsRef<str>, H: AsRef<str>>(
        entries: &[(N, H)],
    ) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        let colors = entries
            .iter()
            .map(|(name, hex)| {
                let name = name.as_ref();
                let c: Color =
                    hex.as_ref()
                        .parse()
                        .map_err(|source| PaletteError::ParseColor {
                            name: name.to_string(),
                            source,
                        })?;
                Ok(PaletteColor::new(name, c.r, c.g, c.b))
            })
            .collect::<Result<Vec<_>, PaletteError>>()?;
        Ok(Self { colors })
    }

    /// Look up a built-in palette by name (`stitch`, `dmc-basic`).
    pub fn builtin(name: &str) -> Result<Self, PaletteError> {
        builtin::lookup(name)
            .map(Self::from_table)
            .ok_or_else(|| PaletteError::UnknownPalette(name.to_string()))
    }

    /// The built-in [`DEFAULT_PALETTE`](super::DEFAULT_PALETTE).
    pub fn default_builtin() -> Self {
        Self::from_table(builtin::DEFAULT_TABLE)
    }

    fn from_table(table: builtin::Table) -> Self {
        table
            .entries
            .iter()
            .enumerate()
            .map(|(i, &(n, r, g, b))| {
                let color = PaletteColor::new(n, r, g, b);
                match table.symbols.get(i) {
                    Some(&symbol) => color.with_symbol(symbol),
                    None => color,
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<&PaletteColor> {
        self.colors.get(index)
    }

    /// Fail with a configuration error if the palette cannot answer lookups.
    pub fn ensure_non_empty(&self) -> Result<(), PatternError> {
        if self.colors.is_empty() {
            return Err(PaletteError::Empty.into());
        }
        Ok(())
    }

    /// Index of the entry closest to `rgb`; first minimum wins.
    ///
    /// `rgb` may lie outside 0..=255 (error-diffused values); callers that
    /// need byte semantics clamp first.
    pub fn nearest_index(&self, rgb: [f32; 3]) -> Result<usize, PatternError> {
        self.ensure_non_empty()?;
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (i, entry) in self.colors.iter().enumerate() {
            let dist = weighted_distance(rgb, entry.rgb_f32());
            // Strict comparison keeps the earliest entry on ties.
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        Ok(best)
    }

    /// Entry closest to `(r, g, b)` under the weighted metric.
    pub fn nearest(&self, r: u8, g: u8, b: u8) -> Result<&PaletteColor, PatternError> {
        let index = self.nearest_index([r as f32, g as f32, b as f32])?;
        Ok(&self.colors[index])
    }

    /// Index of the first entry whose RGB equals `color` exactly.
    pub fn find_exact(&self, color: Color) -> Option<usize> {
        self.colors
            .iter()
            .position(|c| c.r == color.r && c.g == color.g && c.b == color.b)
    }

    /// Index of the first pure-black entry, the target for near-black snapping.
    pub fn black_index(&self) -> Option<usize> {
        self.find_exact(Color::BLACK)
    }
}

impl FromIterator<PaletteColor> for Palette {
    fn from_iter<I: IntoIterator<Item = PaletteColor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
