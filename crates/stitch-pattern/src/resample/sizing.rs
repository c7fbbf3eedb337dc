/// Aspect-preserving grid size whose longer side is `max_cells`.
///
/// The shorter side is `round(max_cells * short / long)`, at least 1.
/// Zero-sized inputs yield `(0, 0)` and are rejected later by the resampler.
pub fn fit_within(source_width: usize, source_height: usize, max_cells: usize) -> (usize, usize) {
    if source_width == 0 || source_height == 0 || max_cells == 0 {
        return (0, 0);
    }
    let scaled = |short: usize, long: usize| {
        ((max_cells as f64 * short as f64 / long as f64).round() as usize).max(1)
    };
    if source_width >= source_height {
        (max_cells, scaled(source_height, source_width))
    } else {
        (scaled(source_width, source_height), max_cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_and_portrait() {
        assert_eq!(fit_within(1600, 900, 80), (80, 45));
        assert_eq!(fit_within(900, 1600, 80), (45, 80));
        assert_eq!(fit_within(500, 500, 60), (60, 60));
    }

    #[test]
    fn test_extreme_ratio_keeps_one_cell() {
        assert_eq!(fit_within(10_000, 1, 50), (50, 1));
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(fit_within(0, 10, 50), (0, 0));
    }
}
