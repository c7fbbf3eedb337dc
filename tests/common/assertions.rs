//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use stitchgrid::models::PatternDocument;

/// Assert every cell of the grid is stitched
pub fn assert_fully_stitched(doc: &PatternDocument) {
    assert_eq!(
        doc.cell_colors.len(),
        doc.width * doc.height,
        "Expected every cell stitched in a {}x{} grid",
        doc.width,
        doc.height
    );
}

/// Assert legend counts add up to the stitched cells
pub fn assert_legend_consistent(doc: &PatternDocument) {
    let total: usize = doc.palette_used.iter().map(|e| e.count).sum();
    assert_eq!(total, doc.cell_colors.len(), "Legend counts disagree with cells");
    for entry in &doc.palette_used {
        let used = doc.cell_colors.values().filter(|hex| **hex == entry.hex).count();
        assert!(
            used >= entry.count,
            "Legend entry {} claims {} stitches, found {}",
            entry.name,
            entry.count,
            used
        );
    }
}

/// Assert a cell key is in the contour listing
pub fn assert_contour(doc: &PatternDocument, key: &str) {
    assert!(
        doc.contour_cells.iter().any(|k| k == key),
        "Expected {key} in contour cells, got {:?}",
        doc.contour_cells
    );
}
