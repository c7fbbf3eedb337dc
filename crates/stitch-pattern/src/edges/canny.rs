use crate::buffer::PixelBuffer;

const GAUSSIAN_3X3: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];

/// 3x3 Gaussian blur over all four channels, rounded.
///
/// Border pixels have no full window and are copied through unchanged.
pub(super) fn gaussian_blur(buffer: &PixelBuffer) -> Vec<u8> {
    let (w, h) = (buffer.width(), buffer.height());
    let src = buffer.data();
    let mut out = src.to_vec();
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut sum = [0u32; 4];
            for ky in 0..3 {
                for kx in 0..3 {
                    let i = ((y + ky - 1) * w + (x + kx - 1)) * 4;
                    let weight = GAUSSIAN_3X3[ky][kx];
                    for c in 0..4 {
                        sum[c] += src[i + c] as u32 * weight;
                    }
                }
            }
            let i = (y * w + x) * 4;
            for c in 0..4 {
                out[i + c] = (sum[c] as f32 / 16.0).round() as u8;
            }
        }
    }
    out
}
