//! Size ceilings checked before any buffer is allocated.

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Upper bounds on accepted dimensions and pixel counts.
///
/// Checked up front by the resampler and the builder so that an oversized
/// request fails with [`PatternError::ResourceLimit`] (or
/// [`PatternError::InvalidDimension`] for a single side) instead of
/// allocating.
///
/// ```
/// use stitch_pattern::Limits;
///
/// let limits = Limits::default().with_max_target_cells(250_000);
/// assert!(limits.check_target(600, 600).is_err());
/// assert!(limits.check_target(500, 500).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
    /// Largest accepted target width or height.
    pub max_dimension: usize,
    /// Largest accepted `target_width * target_height`.
    pub max_target_cells: u64,
    /// Largest accepted source `width * height`.
    pub max_source_pixels: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dimension: 2000,
            max_target_cells: 1_000_000,
            max_source_pixels: 100_000_000,
        }
    }
}

impl Limits {
    pub fn with_max_dimension(mut self, max: usize) -> Self {
        self.max_dimension = max;
        self
    }

    pub fn with_max_target_cells(mut self, max: u64) -> Self {
        self.max_target_cells = max;
        self
    }

    pub fn with_max_source_pixels(mut self, max: u64) -> Self {
        self.max_source_pixels = max;
        self
    }

    /// Validate a requested grid size.
    pub fn check_target(&self, width: usize, height: usize) -> Result<(), PatternError> {
        if width == 0 || height == 0 {
            return Err(PatternError::dimension(
                width,
                height,
                "target width and height must be positive",
            ));
        }
        if width > self.max_dimension || height > self.max_dimension {
            return Err(PatternError::dimension(
                width,
                height,
                format!("target side exceeds maximum of {}", self.max_dimension),
            ));
        }
        let cells = width as u64 * height as u64;
        if cells > self.max_target_cells {
            return Err(PatternError::ResourceLimit {
                what: "target cells",
                requested: cells,
                limit: self.max_target_cells,
            });
        }
        Ok(())
    }

    /// Validate a source image's pixel count.
    pub fn check_source(&self, width: usize, height: usize) -> Result<(), PatternError> {
        let pixels = width as u64 * height as u64;
        if pixels > self.max_source_pixels {
            return Err(PatternError::ResourceLimit {
                what: "source pixels",
                requested: pixels,
                limit: self.max_source_pixels,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_side_is_invalid_dimension() {
        let err = Limits::default().check_target(0, 5).unwrap_err();
        assert!(matches!(err, PatternError::InvalidDimension { .. }));
    }

    #[test]
    fn test_side_over_max_is_invalid_dimension() {
        let limits = Limits::default();
        assert!(limits.check_target(2000, 1).is_ok());
        assert!(matches!(
            limits.check_target(2001, 1),
            Err(PatternError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_cells_over_max_is_resource_limit() {
        let err = Limits::default().check_target(1500, 1500).unwrap_err();
        assert_eq!(
            err,
            PatternError::ResourceLimit {
                what: "target cells",
                requested: 2_250_000,
                limit: 1_000_000,
            }
        );
    }

    #[test]
    fn test_cell_cap_is_inclusive() {
        let limits = Limits::default().with_max_target_cells(250_000);
        assert!(limits.check_target(500, 500).is_ok());
        assert!(limits.check_target(400, 400).is_ok());
        assert!(matches!(
            limits.check_target(600, 600),
            Err(PatternError::ResourceLimit { requested: 360_000, .. })
        ));
    }

    #[test]
    fn test_source_ceiling() {
        let limits = Limits::default().with_max_source_pixels(100);
        assert!(limits.check_source(10, 10).is_ok());
        assert!(matches!(
            limits.check_source(11, 10),
            Err(PatternError::ResourceLimit { what: "source pixels", .. })
        ));
    }
}
