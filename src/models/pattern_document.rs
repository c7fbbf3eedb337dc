use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use stitch_pattern::Pattern;

/// JSON form of a finished pattern.
///
/// Maps are keyed by `"x,y"` strings; `BTreeMap` keeps the output stable,
/// sorted lexically by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDocument {
    pub width: usize,
    pub height: usize,
    pub cell_colors: BTreeMap<String, String>,
    pub contour_cells: Vec<String>,
    pub palette_used: Vec<LegendEntry>,
    /// SHA-256 over the cell and contour listing, hex encoded
    pub fingerprint: String,
}

/// One legend row: a thread and how many stitches use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub hex: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<char>,
}

impl PatternDocument {
    pub fn from_pattern(pattern: &Pattern) -> Self {
        let cell_colors: BTreeMap<String, String> = pattern
            .cell_colors()
            .iter()
            .map(|(key, color)| (key.to_string(), color.to_hex()))
            .collect();
        let contour_cells: Vec<String> = pattern
            .contour_cells()
            .iter()
            .map(ToString::to_string)
            .collect();
        let palette_used = pattern
            .palette_used()
            .iter()
            .map(|usage| LegendEntry {
                name: usage.color.name.clone(),
                hex: usage.color.to_hex(),
                count: usage.count,
                symbol: usage.color.symbol,
            })
            .collect();

        Self {
            width: pattern.width(),
            height: pattern.height(),
            fingerprint: fingerprint(pattern),
            cell_colors,
            contour_cells,
            palette_used,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn stitch_count(&self) -> usize {
        self.cell_colors.len()
    }
}

/// Digest of a pattern's content, independent of JSON formatting.
///
/// Cells are hashed in chart (row-major) order, then contours.
pub fn fingerprint(pattern: &Pattern) -> String {
    let mut hasher = Sha256::new();

    hasher.update(format!("{}x{}", pattern.width(), pattern.height()).as_bytes());
    hasher.update(b"|cells:");
    for (key, color) in pattern.cell_colors() {
        hasher.update(key.to_string().as_bytes());
        hasher.update(b"=");
        hasher.update(color.to_hex().as_bytes());
        hasher.update(b";");
    }
    hasher.update(b"|contours:");
    for key in pattern.contour_cells() {
        hasher.update(key.to_string().as_bytes());
        hasher.update(b";");
    }

    hex::encode(hasher.finalize())
}
