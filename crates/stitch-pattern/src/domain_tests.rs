//! Cross-stage regression tests.
//!
//! Each test pins one pipeline-wide property and says what broke if it fails.

use pretty_assertions::assert_eq;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::contour;
use crate::edges::{Edge, EdgeAlgorithm, EdgeDetector, EdgeMap};
use crate::grid::CellKey;
use crate::palette::{Palette, PaletteColor};
use crate::pattern::PatternBuilder;
use crate::quantize::{quantize, QuantizeOptions};
use crate::resample::{resample, ResampleMode};

fn red_black() -> Palette {
    Palette::new(vec![
        PaletteColor::new("Red", 255, 0, 0),
        PaletteColor::new("Black", 0, 0, 0),
    ])
}

fn black_white() -> Palette {
    Palette::new(vec![
        PaletteColor::new("Black", 0, 0, 0),
        PaletteColor::new("White", 255, 255, 255),
    ])
}

/// Deterministic noisy image with a transparent stripe.
fn noisy(width: usize, height: usize) -> PixelBuffer {
    let colors: Vec<Color> = (0..width * height)
        .map(|i| {
            let v = i.wrapping_mul(2654435761) >> 7;
            let alpha = if i % width == 3 { 0 } else { 255 };
            Color::new((v & 0xff) as u8, ((v >> 8) & 0xff) as u8, ((v >> 16) & 0xff) as u8, alpha)
        })
        .collect();
    PixelBuffer::from_colors(width, height, &colors).unwrap()
}

// ========================================================================
// Dimensions
// ========================================================================

/// If this breaks, a stage other than resampling changed the grid size, or
/// the pattern reports cells outside its own bounds.
#[test]
fn test_every_stage_preserves_target_dimensions() {
    let source = noisy(23, 17);
    for mode in [ResampleMode::AreaAverage, ResampleMode::DetailPreserving] {
        for (w, h) in [(1, 1), (5, 3), (23, 17), (40, 9)] {
            let resampled = resample(&source, w, h, mode).unwrap();
            assert_eq!((resampled.width(), resampled.height()), (w, h));

            for algorithm in EdgeAlgorithm::ALL {
                let map = EdgeDetector::new(algorithm).detect(&resampled).unwrap();
                assert_eq!((map.width(), map.height()), (w, h));

                let pattern = PatternBuilder::new(red_black())
                    .resample_mode(mode)
                    .edge_algorithm(algorithm)
                    .dither(true)
                    .build(&source, w, h)
                    .unwrap();
                assert_eq!((pattern.width(), pattern.height()), (w, h));
                assert!(pattern
                    .cell_colors()
                    .keys()
                    .chain(pattern.contour_cells())
                    .all(|k| k.x < w && k.y < h));
            }
        }
    }
}

// ========================================================================
// Quantization
// ========================================================================

/// If this breaks, a dithered or snapped pixel escaped the palette, e.g. by
/// writing the error-adjusted value instead of the matched entry.
#[test]
fn test_quantized_colours_are_palette_members() {
    let palette = Palette::builtin("dmc-basic").unwrap();
    let source = noisy(30, 20);
    for dither in [false, true] {
        let out = quantize(
            &source,
            &palette,
            &QuantizeOptions {
                dither,
                ..Default::default()
            },
        )
        .unwrap();
        for c in out.pixels().filter(|c| c.a > 0) {
            assert!(palette.find_exact(c).is_some(), "{c:?} not in palette");
        }
    }
}

/// If this breaks, error diffusion no longer spreads quantization error:
/// local averages of a dithered gradient must track the source better than
/// flat nearest-colour mapping does.
#[test]
fn test_dither_tracks_local_average_better_than_nearest() {
    let (w, h) = (64, 32);
    let colors: Vec<Color> = (0..w * h)
        .map(|i| {
            let v = ((i % w) * 255 / (w - 1)) as u8;
            Color::rgb(v, v, v)
        })
        .collect();
    let source = PixelBuffer::from_colors(w, h, &colors).unwrap();

    let block_sse = |out: &PixelBuffer| -> f64 {
        let mut sse = 0.0;
        for by in (0..h).step_by(8) {
            for bx in (0..w).step_by(8) {
                let mut src = 0.0;
                let mut dst = 0.0;
                for y in by..by + 8 {
                    for x in bx..bx + 8 {
                        src += source.pixel(x, y).r as f64;
                        dst += out.pixel(x, y).r as f64;
                    }
                }
                let diff = (src - dst) / 64.0;
                sse += diff * diff;
            }
        }
        sse
    };

    let options = QuantizeOptions {
        black_threshold: None,
        ..Default::default()
    };
    let flat = quantize(&source, &black_white(), &options).unwrap();
    let dithered = quantize(
        &source,
        &black_white(),
        &QuantizeOptions {
            dither: true,
            ..options
        },
    )
    .unwrap();

    let (flat_sse, dithered_sse) = (block_sse(&flat), block_sse(&dithered));
    assert!(
        dithered_sse < flat_sse,
        "dithered {dithered_sse} should beat flat {flat_sse}"
    );
}

/// If this breaks, nearest-colour ties are no longer resolved by palette
/// order and output depends on iteration quirks.
#[test]
fn test_duplicate_palette_entry_first_index_wins() {
    let palette = Palette::new(vec![
        PaletteColor::new("Cream", 240, 230, 200),
        PaletteColor::new("Black", 0, 0, 0),
        PaletteColor::new("Cream Again", 240, 230, 200),
    ]);
    let source = PixelBuffer::filled(4, 4, Color::rgb(235, 228, 190)).unwrap();
    let pattern = PatternBuilder::new(palette).build(&source, 4, 4).unwrap();
    assert_eq!(pattern.palette_used().len(), 1);
    assert_eq!(pattern.palette_used()[0].index, 0);
    assert_eq!(pattern.palette_used()[0].count, 16);
}

// ========================================================================
// Edges and contours
// ========================================================================

/// If this breaks, silhouette detection stopped treating transparent
/// neighbours as outside.
#[test]
fn test_outline_marks_visible_pixels_touching_transparency() {
    let mut colors = vec![Color::rgb(30, 160, 90); 49];
    colors[24] = Color::EMPTY;
    let source = PixelBuffer::from_colors(7, 7, &colors).unwrap();
    let map = EdgeDetector::new(EdgeAlgorithm::Outline).detect(&source).unwrap();
    for (x, y) in [(2, 3), (4, 3), (3, 2), (3, 4)] {
        assert!(map.get(x, y).is_some(), "({x},{y}) should be an edge");
    }
    assert_eq!(map.get(3, 3), None);
    // diagonal neighbours of the hole touch only visible pixels
    assert_eq!(map.get(2, 2), None);
}

/// If this breaks, refinement started dropping silhouette cells or stopped
/// pruning isolated internal noise.
#[test]
fn test_refine_keeps_external_drops_isolated_internal() {
    let map = EdgeMap::from_cells(
        6,
        6,
        [
            (CellKey::new(0, 0), Edge::EXTERNAL),
            (CellKey::new(3, 3), Edge::INTERNAL),
            (CellKey::new(5, 1), Edge::INTERNAL),
            (CellKey::new(5, 2), Edge::WEAK),
        ],
    )
    .unwrap();
    let refined = contour::refine(&map);
    assert_eq!(refined.get(0, 0), Some(Edge::EXTERNAL));
    assert_eq!(refined.get(3, 3), None);
    assert_eq!(refined.get(5, 1), Some(Edge::INTERNAL));
    assert_eq!(refined.get(5, 2), Some(Edge::WEAK));
}

// ========================================================================
// End to end
// ========================================================================

/// If this breaks, solid input no longer produces a solid chart.
#[test]
fn test_solid_red_downsamples_to_solid_red() {
    let source = PixelBuffer::filled(4, 4, Color::rgb(255, 0, 0)).unwrap();
    let pattern = PatternBuilder::new(red_black()).build(&source, 2, 2).unwrap();
    assert_eq!(pattern.stitch_count(), 4);
    assert!(pattern
        .cell_colors()
        .values()
        .all(|c| *c == Color::rgb(255, 0, 0)));
    assert_eq!(pattern.contour_count(), 0);
    assert_eq!(pattern.palette_used()[0].color.name, "Red");
}

/// If this breaks, transparent cells leaked into the fill or the hole's
/// rim lost its contour.
#[test]
fn test_transparent_hole_is_unstitched_and_rimmed() {
    let mut colors = vec![Color::rgb(255, 0, 0); 100];
    colors[5 * 10 + 5] = Color::EMPTY;
    let source = PixelBuffer::from_colors(10, 10, &colors).unwrap();
    let pattern = PatternBuilder::new(red_black())
        .edge_algorithm(EdgeAlgorithm::Outline)
        .build(&source, 10, 10)
        .unwrap();

    assert_eq!(pattern.color_at(5, 5), None);
    assert!(!pattern.is_contour(5, 5));
    for (x, y) in [(4, 5), (6, 5), (5, 4), (5, 6)] {
        assert!(pattern.is_contour(x, y), "({x},{y}) should be contour");
    }
    assert_eq!(pattern.stitch_count(), 99);
}

/// If this breaks, some stage picked up hidden state (thread scheduling,
/// hash order) and identical inputs diverge.
#[test]
fn test_identical_inputs_identical_patterns() {
    let source = noisy(37, 29);
    let builder = PatternBuilder::new(Palette::builtin("stitch").unwrap())
        .resample_mode(ResampleMode::DetailPreserving)
        .edge_algorithm(EdgeAlgorithm::Feature)
        .dither(true);
    let first = builder.build(&source, 20, 15).unwrap();
    for _ in 0..3 {
        assert_eq!(builder.build(&source, 20, 15).unwrap(), first);
    }
}
