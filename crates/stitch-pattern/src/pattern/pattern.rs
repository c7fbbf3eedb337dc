use std::collections::{BTreeMap, BTreeSet};

use crate::color::Color;
use crate::grid::CellKey;
use crate::palette::PaletteColor;

/// One legend line: a palette entry present in the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteUsage {
    /// Position in the palette the pattern was built with.
    pub index: usize,
    pub color: PaletteColor,
    /// Number of cells stitched in this colour.
    pub count: usize,
}

/// A finished cross-stitch chart.
///
/// `cell_colors` holds every stitched cell; an absent key is unstitched.
/// `contour_cells` is a separate overlay: a cell can be in both, and the
/// overlay never replaces the fill colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,
    cell_colors: BTreeMap<CellKey, Color>,
    contour_cells: BTreeSet<CellKey>,
    palette_used: Vec<PaletteUsage>,
}

impl Pattern {
    pub(crate) fn new(
        width: usize,
        height: usize,
        cell_colors: BTreeMap<CellKey, Color>,
        contour_cells: BTreeSet<CellKey>,
        palette_used: Vec<PaletteUsage>,
    ) -> Self {
        Self {
            width,
            height,
            cell_colors,
            contour_cells,
            palette_used,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_colors(&self) -> &BTreeMap<CellKey, Color> {
        &self.cell_colors
    }

    pub fn contour_cells(&self) -> &BTreeSet<CellKey> {
        &self.contour_cells
    }

    /// Palette entries in use, in palette order.
    pub fn palette_used(&self) -> &[PaletteUsage] {
        &self.palette_used
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.cell_colors.get(&CellKey::new(x, y)).copied()
    }

    pub fn is_contour(&self, x: usize, y: usize) -> bool {
        self.contour_cells.contains(&CellKey::new(x, y))
    }

    pub fn stitch_count(&self) -> usize {
        self.cell_colors.len()
    }

    pub fn contour_count(&self) -> usize {
        self.contour_cells.len()
    }
}
