use rayon::prelude::*;

use crate::buffer::PixelBuffer;

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Rounded luma per pixel.
pub(super) fn grayscale(buffer: &PixelBuffer) -> Vec<u8> {
    buffer
        .pixels()
        .map(|c| c.luma().round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Sobel gradient magnitude `sqrt(gx² + gy²)` per pixel.
///
/// Border rows and columns stay at zero since the 3x3 window needs a full
/// neighbourhood. Rows are computed in parallel; every value depends only
/// on `gray`, so the result matches a sequential pass exactly.
pub fn sobel_magnitude(gray: &[u8], width: usize, height: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; width * height];
    if width < 3 || height < 3 {
        return out;
    }
    out.par_chunks_mut(width)
        .enumerate()
        .filter(|(y, _)| *y >= 1 && *y < height - 1)
        .for_each(|(y, row)| {
            for x in 1..width - 1 {
                let mut gx = 0i32;
                let mut gy = 0i32;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let p = gray[(y + ky - 1) * width + (x + kx - 1)] as i32;
                        gx += p * SOBEL_X[ky][kx];
                        gy += p * SOBEL_Y[ky][kx];
                    }
                }
                row[x] = ((gx * gx + gy * gy) as f32).sqrt();
            }
        });
    out
}
