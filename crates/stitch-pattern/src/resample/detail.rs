use rayon::prelude::*;

use super::footprint;
use crate::buffer::PixelBuffer;
use crate::color::Color;

/// Local contrast of every source pixel: summed channel delta against its
/// in-bounds 4-neighbours.
fn contrast_map(source: &PixelBuffer) -> Vec<u32> {
    let (w, h) = (source.width(), source.height());
    let mut map = vec![0u32; w * h];
    map.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let c = source.pixel(x, y);
            let (xi, yi) = (x as isize, y as isize);
            *out = [(0, -1), (-1, 0), (1, 0), (0, 1)]
                .iter()
                .filter_map(|&(dx, dy)| source.get(xi + dx, yi + dy))
                .map(|n| c.channel_delta(n))
                .sum();
        }
    });
    map
}

/// Area average that keeps a standout pixel.
///
/// Within each footprint the pixel with the highest local contrast (first
/// one on ties, row-major) is the dominant candidate. It replaces the mean
/// when its intensity is above `ratio` times the mean intensity.
pub(super) fn detail_preserving(
    source: &PixelBuffer,
    target_width: usize,
    target_height: usize,
    ratio: f32,
) -> Vec<u8> {
    let (sw, sh) = (source.width(), source.height());
    let scale_x = sw as f64 / target_width as f64;
    let scale_y = sh as f64 / target_height as f64;
    let contrast = contrast_map(source);

    let mut out = vec![0u8; target_width * target_height * 4];
    out.par_chunks_mut(target_width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let (y0, y1) = footprint(y, scale_y, sh);
            for x in 0..target_width {
                let (x0, x1) = footprint(x, scale_x, sw);
                let mut sum = [0u64; 4];
                let mut count = 0u64;
                let mut dominant: Option<(u32, Color)> = None;

                for sy in y0..y1 {
                    for sx in x0..x1 {
                        let px = source.pixel(sx, sy);
                        for (acc, v) in sum.iter_mut().zip(px.to_bytes()) {
                            *acc += v as u64;
                        }
                        count += 1;
                        let score = contrast[sy * sw + sx];
                        if dominant.map_or(true, |(best, _)| score > best) {
                            dominant = Some((score, px));
                        }
                    }
                }

                let dst = &mut row[x * 4..x * 4 + 4];
                let Some((_, dominant)) = dominant else {
                    let sx = super::nearest_source(x, scale_x, sw);
                    let sy = super::nearest_source(y, scale_y, sh);
                    dst.copy_from_slice(&source.pixel(sx, sy).to_bytes());
                    continue;
                };

                let n = count as f64;
                let avg_intensity = (sum[0] + sum[1] + sum[2]) as f64 / n;
                if dominant.intensity() as f64 > avg_intensity * ratio as f64 {
                    dst.copy_from_slice(&dominant.to_bytes());
                } else {
                    for c in 0..4 {
                        dst[c] = (sum[c] as f64 / n).round() as u8;
                    }
                }
            }
        });
    out
}
