use super::map::{Edge, EdgeMap};
use crate::buffer::PixelBuffer;
use crate::color::{rgb_to_hsv, Color};

/// Whether a colour transition reads as a facial or structural feature
/// rather than shading noise.
pub(super) fn is_important_feature(a: Color, b: Color) -> bool {
    let ha = rgb_to_hsv(a.r, a.g, a.b);
    let hb = rgb_to_hsv(b.r, b.g, b.b);

    if (ha.v - hb.v).abs() > 0.3 {
        return true;
    }
    if (ha.s - hb.s).abs() > 0.4 {
        return true;
    }
    (ha.v < 0.2 && hb.v > 0.8) || (ha.v > 0.8 && hb.v < 0.2)
}

/// Contours only where they matter.
///
/// Interior visible pixels only. A transparent 4-neighbour makes an
/// external edge; a 4-neighbour with summed delta above `delta_threshold`
/// that also passes [`is_important_feature`] makes an internal one. The
/// first qualifying neighbour (left, right, up, down) decides.
pub(super) fn detect(buffer: &PixelBuffer, delta_threshold: u32, transparency: u8) -> EdgeMap {
    let (w, h) = (buffer.width(), buffer.height());
    let mut map = EdgeMap::new(w, h);
    if w < 3 || h < 3 {
        return map;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let c = buffer.pixel(x, y);
            if !c.is_visible(transparency) {
                continue;
            }
            for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                let n = buffer.pixel(nx, ny);
                if !n.is_visible(transparency) {
                    map.set(x, y, Some(Edge::EXTERNAL));
                    break;
                }
                if c.channel_delta(n) > delta_threshold && is_important_feature(c, n) {
                    map.set(x, y, Some(Edge::INTERNAL));
                    break;
                }
            }
        }
    }
    map
}
