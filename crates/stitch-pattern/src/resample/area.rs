use rayon::prelude::*;

use super::{footprint, nearest_source};
use crate::buffer::PixelBuffer;

/// Box-filter every target cell over its source footprint.
///
/// Each channel, alpha included, is the rounded mean of the footprint. An
/// empty footprint falls back to the single nearest source pixel.
pub(super) fn area_average(source: &PixelBuffer, target_width: usize, target_height: usize) -> Vec<u8> {
    let (sw, sh) = (source.width(), source.height());
    let scale_x = sw as f64 / target_width as f64;
    let scale_y = sh as f64 / target_height as f64;
    let src = source.data();

    let mut out = vec![0u8; target_width * target_height * 4];
    out.par_chunks_mut(target_width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let (y0, y1) = footprint(y, scale_y, sh);
            for x in 0..target_width {
                let (x0, x1) = footprint(x, scale_x, sw);
                let dst = &mut row[x * 4..x * 4 + 4];

                if x0 >= x1 || y0 >= y1 {
                    let sx = nearest_source(x, scale_x, sw);
                    let sy = nearest_source(y, scale_y, sh);
                    let i = (sy * sw + sx) * 4;
                    dst.copy_from_slice(&src[i..i + 4]);
                    continue;
                }

                let mut sum = [0u64; 4];
                for sy in y0..y1 {
                    let row_start = (sy * sw + x0) * 4;
                    let row_end = (sy * sw + x1) * 4;
                    for px in src[row_start..row_end].chunks_exact(4) {
                        for c in 0..4 {
                            sum[c] += px[c] as u64;
                        }
                    }
                }
                let count = ((x1 - x0) * (y1 - y0)) as f64;
                for c in 0..4 {
                    dst[c] = (sum[c] as f64 / count).round() as u8;
                }
            }
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_two_by_two_blocks_average() {
        // 4x2 source: left half black/white checker, right half solid red
        let source = PixelBuffer::from_colors(
            4,
            2,
            &[
                Color::rgb(0, 0, 0),
                Color::rgb(255, 255, 255),
                Color::rgb(255, 0, 0),
                Color::rgb(255, 0, 0),
                Color::rgb(255, 255, 255),
                Color::rgb(0, 0, 0),
                Color::rgb(255, 0, 0),
                Color::rgb(255, 0, 0),
            ],
        )
        .unwrap();
        let out = PixelBuffer::new(2, 1, area_average(&source, 2, 1)).unwrap();
        assert_eq!(out.pixel(0, 0), Color::rgb(128, 128, 128));
        assert_eq!(out.pixel(1, 0), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_alpha_is_averaged_like_colour() {
        let source = PixelBuffer::from_colors(
            2,
            1,
            &[Color::new(100, 100, 100, 0), Color::new(100, 100, 100, 255)],
        )
        .unwrap();
        let out = area_average(&source, 1, 1);
        assert_eq!(out, vec![100, 100, 100, 128]);
    }

    #[test]
    fn test_upscale_replicates_pixels() {
        let source =
            PixelBuffer::from_colors(2, 1, &[Color::rgb(10, 0, 0), Color::rgb(0, 0, 10)]).unwrap();
        let out = PixelBuffer::new(4, 1, area_average(&source, 4, 1)).unwrap();
        assert_eq!(out.pixel(0, 0), Color::rgb(10, 0, 0));
        assert_eq!(out.pixel(1, 0), Color::rgb(10, 0, 0));
        assert_eq!(out.pixel(2, 0), Color::rgb(0, 0, 10));
        assert_eq!(out.pixel(3, 0), Color::rgb(0, 0, 10));
    }
}
