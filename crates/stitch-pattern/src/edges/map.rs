//! Dense edge map and its sparse backstitch projection.

use std::collections::BTreeSet;

use crate::error::PatternError;
use crate::grid::CellKey;

/// Where an edge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Silhouette: the cell touches the image border or a transparent cell.
    External,
    /// Colour or luminance structure inside the silhouette.
    Internal,
}

/// Band of a thresholded gradient. Only Canny produces weak edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStrength {
    Weak,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub kind: EdgeKind,
    pub strength: EdgeStrength,
}

impl Edge {
    pub const EXTERNAL: Edge = Edge {
        kind: EdgeKind::External,
        strength: EdgeStrength::Strong,
    };

    pub const INTERNAL: Edge = Edge {
        kind: EdgeKind::Internal,
        strength: EdgeStrength::Strong,
    };

    pub const WEAK: Edge = Edge {
        kind: EdgeKind::Internal,
        strength: EdgeStrength::Weak,
    };
}

/// Classified edge cells over a `width x height` grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    width: usize,
    height: usize,
    cells: Vec<Option<Edge>>,
}

impl EdgeMap {
    /// Map with no edges.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Map from explicit cells. Keys outside the grid are rejected.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: impl IntoIterator<Item = (CellKey, Edge)>,
    ) -> Result<Self, PatternError> {
        let mut map = Self::new(width, height);
        for (key, edge) in cells {
            if key.x >= width || key.y >= height {
                return Err(PatternError::dimension(
                    width,
                    height,
                    format!("edge cell {key} lies outside the grid"),
                ));
            }
            map.set(key.x, key.y, Some(edge));
        }
        Ok(map)
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
    pub fn get(&self, x: usize, y: usize) -> Option<Edge> {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, edge: Option<Edge>) {
        self.cells[y * self.width + x] = edge;
    }

    /// Whether signed `(x, y)` is inside the grid and holds an edge.
    #[inline]
    pub fn is_edge(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.get(x as usize, y as usize).is_some()
    }

    /// Number of edge cells.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Edge cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, Edge)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|e| (CellKey::new(i % width, i / width), e)))
    }

    /// Sparse set of every edge cell, weak or strong.
    pub fn to_backstitch(&self) -> BTreeSet<CellKey> {
        self.iter().map(|(key, _)| key).collect()
    }
}

/// Sparse set of the cells whose value is strictly above `threshold`.
///
/// Works for boolean maps (`threshold = false`) as well as magnitude maps.
///
/// ```
/// use stitch_pattern::{edges_to_backstitch, CellKey};
///
/// let set = edges_to_backstitch(&[false, true, true, false], 2, 2, false).unwrap();
/// assert!(set.contains(&CellKey::new(1, 0)));
/// assert!(set.contains(&CellKey::new(0, 1)));
/// assert_eq!(set.len(), 2);
/// ```
pub fn edges_to_backstitch<T: Copy + PartialOrd>(
    values: &[T],
    width: usize,
    height: usize,
    threshold: T,
) -> Result<BTreeSet<CellKey>, PatternError> {
    if values.len() != width * height {
        return Err(PatternError::dimension(
            width,
            height,
            format!("edge map has {} values", values.len()),
        ));
    }
    Ok(values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > threshold)
        .map(|(i, _)| CellKey::new(i % width, i / width))
        .collect())
}
