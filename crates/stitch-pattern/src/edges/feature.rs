use super::map::{Edge, EdgeMap};
use crate::buffer::PixelBuffer;

/// Silhouette plus internal feature detection, each cell classified.
///
/// External: a visible pixel with an out-of-range or transparent
/// 4-neighbour. Internal: an interior visible pixel whose largest summed
/// channel delta against its visible 8-neighbours exceeds
/// `feature_threshold`. External wins where both apply.
pub(super) fn detect(buffer: &PixelBuffer, feature_threshold: u32, transparency: u8) -> EdgeMap {
    let (w, h) = (buffer.width(), buffer.height());
    let mut map = EdgeMap::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let c = buffer.pixel(x, y);
            if !c.is_visible(transparency) {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let silhouette = [(-1, 0), (1, 0), (0, -1), (0, 1)].iter().any(|&(dx, dy)| {
                buffer
                    .get(xi + dx, yi + dy)
                    .map_or(true, |n| !n.is_visible(transparency))
            });
            if silhouette {
                map.set(x, y, Some(Edge::EXTERNAL));
                continue;
            }

            let interior = x > 0 && y > 0 && x + 1 < w && y + 1 < h;
            if !interior {
                continue;
            }
            let max_gradient = (-1..=1)
                .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
                .filter(|&(dx, dy)| dx != 0 || dy != 0)
                .filter_map(|(dx, dy)| buffer.get(xi + dx, yi + dy))
                .filter(|n| n.is_visible(transparency))
                .map(|n| c.channel_delta(n))
                .max();
            if max_gradient.is_some_and(|g| g > feature_threshold) {
                map.set(x, y, Some(Edge::INTERNAL));
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn face() -> PixelBuffer {
        // 5x5 skin square with a dark "eye" in the middle and a transparent
        // top-left corner.
        let mut grid = vec![Color::rgb(241, 194, 125); 25];
        grid[12] = Color::rgb(20, 20, 20);
        grid[0] = Color::EMPTY;
        PixelBuffer::from_colors(5, 5, &grid).unwrap()
    }

    #[test]
    fn test_eye_and_its_ring_are_internal() {
        let map = detect(&face(), 120, 20);
        assert_eq!(map.get(2, 2), Some(Edge::INTERNAL));
        assert_eq!(map.get(1, 1), Some(Edge::INTERNAL));
        assert_eq!(map.get(3, 3), Some(Edge::INTERNAL));
    }

    #[test]
    fn test_silhouette_is_external() {
        let map = detect(&face(), 120, 20);
        assert_eq!(map.get(1, 0), Some(Edge::EXTERNAL));
        assert_eq!(map.get(4, 4), Some(Edge::EXTERNAL));
        assert_eq!(map.get(0, 0), None);
    }
}
