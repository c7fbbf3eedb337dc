//! Float error accumulator for one quantization pass.

/// Per-pixel RGB error carried forward by diffusion.
///
/// Same dimensions as the image being quantized and owned by a single
/// `quantize` call. Float storage keeps repeated small contributions from
/// rounding away.
#[derive(Debug)]
pub(crate) struct ErrorAccumulator {
    errors: Vec<[f32; 3]>,
    width: usize,
    height: usize,
}

impl ErrorAccumulator {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            errors: vec![[0.0; 3]; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub(crate) fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.errors[y * self.width + x]
    }

    /// Add `error` at signed coordinates; out-of-range targets are dropped.
    #[inline]
    pub(crate) fn add(&mut self, x: isize, y: isize, error: [f32; 3]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let cell = &mut self.errors[y as usize * self.width + x as usize];
        for c in 0..3 {
            cell[c] += error[c];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_and_drops_out_of_range() {
        let mut acc = ErrorAccumulator::new(2, 2);
        acc.add(1, 0, [1.0, 2.0, 3.0]);
        acc.add(1, 0, [0.5, 0.5, 0.5]);
        acc.add(-1, 1, [9.0, 9.0, 9.0]);
        acc.add(2, 0, [9.0, 9.0, 9.0]);
        acc.add(0, 2, [9.0, 9.0, 9.0]);
        assert_eq!(acc.get(1, 0), [1.5, 2.5, 3.5]);
        assert_eq!(acc.get(0, 0), [0.0; 3]);
        assert_eq!(acc.get(0, 1), [0.0; 3]);
    }
}
