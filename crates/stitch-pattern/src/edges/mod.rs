//! Edge detection over a resampled, pre-quantization buffer.
//!
//! Strategies, selected with [`EdgeAlgorithm`]:
//!
//! - **Outline**: conservative thin outline; silhouette plus extreme colour
//!   jumps only
//! - **Sobel**: luma gradient magnitude, binary threshold
//! - **Canny** (simplified): Gaussian blur, Sobel magnitude, then a
//!   weak/strong band split. No non-maximum suppression and no hysteresis
//!   linking; weak edges stay weak.
//! - **Feature**: silhouette edges plus internal 8-neighbourhood features,
//!   each classified
//! - **Selective**: only transitions that pass an HSV importance test
//!
//! All strategies produce an [`EdgeMap`] of the buffer's dimensions.

mod canny;
mod feature;
mod map;
mod outline;
mod selective;
mod sobel;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::PatternError;

pub use map::{edges_to_backstitch, Edge, EdgeKind, EdgeMap, EdgeStrength};
pub use sobel::sobel_magnitude;

/// Edge detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeAlgorithm {
    #[default]
    None,
    Outline,
    Sobel,
    Canny,
    Feature,
    Selective,
}

impl EdgeAlgorithm {
    pub const ALL: [EdgeAlgorithm; 6] = [
        EdgeAlgorithm::None,
        EdgeAlgorithm::Outline,
        EdgeAlgorithm::Sobel,
        EdgeAlgorithm::Canny,
        EdgeAlgorithm::Feature,
        EdgeAlgorithm::Selective,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeAlgorithm::None => "none",
            EdgeAlgorithm::Outline => "outline",
            EdgeAlgorithm::Sobel => "sobel",
            EdgeAlgorithm::Canny => "canny",
            EdgeAlgorithm::Feature => "feature",
            EdgeAlgorithm::Selective => "selective",
        }
    }
}

impl fmt::Display for EdgeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeAlgorithm {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = crate::option_key(s);
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| {
                PatternError::config(format!(
                    "unknown edge algorithm {s:?} (expected none, outline, sobel, canny, feature or selective)"
                ))
            })
    }
}

/// Tunable thresholds for every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeThresholds {
    /// Outline: summed channel delta a neighbour must exceed.
    pub outline_delta: u32,
    /// Sobel: magnitude a pixel must exceed.
    pub sobel: f32,
    /// Canny: magnitude above this is at least a weak edge.
    pub canny_low: f32,
    /// Canny: magnitude above this is a strong edge.
    pub canny_high: f32,
    /// Feature: largest 8-neighbour delta an internal edge must exceed.
    pub internal_feature: u32,
    /// Selective: summed channel delta a neighbour must exceed.
    pub selective_delta: u32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            outline_delta: 300,
            sobel: 50.0,
            canny_low: 50.0,
            canny_high: 150.0,
            internal_feature: 120,
            selective_delta: 150,
        }
    }
}

impl EdgeThresholds {
    pub fn validate(&self) -> Result<(), PatternError> {
        let finite = [self.sobel, self.canny_low, self.canny_high];
        if finite.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(PatternError::config(
                "edge thresholds must be finite and non-negative",
            ));
        }
        if self.canny_low > self.canny_high {
            return Err(PatternError::config(format!(
                "canny low threshold {} exceeds high threshold {}",
                self.canny_low, self.canny_high
            )));
        }
        Ok(())
    }
}

/// Configured edge detector.
///
/// ```
/// use stitch_pattern::{Color, EdgeAlgorithm, EdgeDetector, PixelBuffer};
///
/// let buffer = PixelBuffer::filled(4, 4, Color::rgb(200, 0, 0)).unwrap();
/// let map = EdgeDetector::new(EdgeAlgorithm::Outline).detect(&buffer).unwrap();
/// // every border cell touches the outside
/// assert_eq!(map.len(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDetector {
    algorithm: EdgeAlgorithm,
    thresholds: EdgeThresholds,
    transparency_threshold: u8,
}

impl EdgeDetector {
    pub fn new(algorithm: EdgeAlgorithm) -> Self {
        Self {
            algorithm,
            thresholds: EdgeThresholds::default(),
            transparency_threshold: 20,
        }
    }

    pub fn thresholds(mut self, thresholds: EdgeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn transparency_threshold(mut self, threshold: u8) -> Self {
        self.transparency_threshold = threshold;
        self
    }

    pub fn algorithm(&self) -> EdgeAlgorithm {
        self.algorithm
    }

    /// Run the selected strategy over `buffer`.
    pub fn detect(&self, buffer: &PixelBuffer) -> Result<EdgeMap, PatternError> {
        self.thresholds.validate()?;
        let t = &self.thresholds;
        let alpha = self.transparency_threshold;
        let (w, h) = (buffer.width(), buffer.height());

        let map = match self.algorithm {
            EdgeAlgorithm::None => EdgeMap::new(w, h),
            EdgeAlgorithm::Outline => outline::detect(buffer, t.outline_delta, alpha),
            EdgeAlgorithm::Sobel => {
                let magnitude = sobel_magnitude(&sobel::grayscale(buffer), w, h);
                banded(&magnitude, w, h, t.sobel, t.sobel)
            }
            EdgeAlgorithm::Canny => {
                let blurred = PixelBuffer::new(w, h, canny::gaussian_blur(buffer))?;
                let magnitude = sobel_magnitude(&sobel::grayscale(&blurred), w, h);
                banded(&magnitude, w, h, t.canny_low, t.canny_high)
            }
            EdgeAlgorithm::Feature => feature::detect(buffer, t.internal_feature, alpha),
            EdgeAlgorithm::Selective => selective::detect(buffer, t.selective_delta, alpha),
        };

        debug!(
            algorithm = %self.algorithm,
            width = w,
            height = h,
            edges = map.len(),
            "edges detected"
        );
        Ok(map)
    }
}

/// Threshold a magnitude map: above `high` is strong, above `low` weak.
fn banded(magnitude: &[f32], width: usize, height: usize, low: f32, high: f32) -> EdgeMap {
    let mut map = EdgeMap::new(width, height);
    for (i, &m) in magnitude.iter().enumerate() {
        let edge = if m > high {
            Some(Edge::INTERNAL)
        } else if m > low {
            Some(Edge::WEAK)
        } else {
            None
        };
        if edge.is_some() {
            map.set(i % width, i / width, edge);
        }
    }
    map
}
