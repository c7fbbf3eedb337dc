//! Cell addressing for the stitch grid.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// One stitch cell, `(x, y)` with `x` the column.
///
/// Ordered row-major (by `y`, then `x`) so that sorted collections iterate
/// in the same order a stitcher reads a chart. Rendered as `"x,y"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: usize,
    pub y: usize,
}

impl CellKey {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for CellKey {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| PatternError::config(format!("cell key {s:?} is not \"x,y\"")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| PatternError::config(format!("cell key {s:?}: {e}")))
        };
        Ok(CellKey::new(parse(x)?, parse(y)?))
    }
}

impl From<(usize, usize)> for CellKey {
    fn from((x, y): (usize, usize)) -> Self {
        CellKey::new(x, y)
    }
}
