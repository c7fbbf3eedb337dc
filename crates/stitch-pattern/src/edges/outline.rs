use super::map::{Edge, EdgeMap};
use crate::buffer::PixelBuffer;

const NEIGHBOURS_4: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Thin outline over visible pixels.
///
/// A visible pixel is an external edge when a 4-neighbour is outside the
/// image or transparent, otherwise an internal edge when a 4-neighbour's
/// summed channel delta exceeds `delta_threshold`. Transparent pixels are
/// never edges.
pub(super) fn detect(buffer: &PixelBuffer, delta_threshold: u32, transparency: u8) -> EdgeMap {
    let (w, h) = (buffer.width(), buffer.height());
    let mut map = EdgeMap::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let c = buffer.pixel(x, y);
            if !c.is_visible(transparency) {
                continue;
            }
            let mut external = false;
            let mut internal = false;
            for (dx, dy) in NEIGHBOURS_4 {
                match buffer.get(x as isize + dx, y as isize + dy) {
                    None => external = true,
                    Some(n) if !n.is_visible(transparency) => external = true,
                    Some(n) if c.channel_delta(n) > delta_threshold => internal = true,
                    Some(_) => {}
                }
            }
            if external {
                map.set(x, y, Some(Edge::EXTERNAL));
            } else if internal {
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
    use crate::edges::EdgeKind;

    #[test]
    fn test_border_is_external() {
        let buf = PixelBuffer::filled(3, 3, Color::rgb(100, 100, 100)).unwrap();
        let map = detect(&buf, 300, 20);
        assert_eq!(map.len(), 8);
        assert_eq!(map.get(1, 1), None);
        assert_eq!(map.get(0, 0).map(|e| e.kind), Some(EdgeKind::External));
    }

    #[test]
    fn test_extreme_delta_is_internal() {
        // 5x1 interior split between black and white, delta 765
        let mut colors = vec![Color::rgb(0, 0, 0); 3];
        colors.extend([Color::rgb(255, 255, 255); 2]);
        let mut grid = colors.clone();
        grid.extend(colors.clone());
        grid.extend(colors);
        let buf = PixelBuffer::from_colors(5, 3, &grid).unwrap();
        let map = detect(&buf, 300, 20);
        assert_eq!(map.get(2, 1), Some(Edge::INTERNAL));
        assert_eq!(map.get(3, 1), Some(Edge::INTERNAL));
        assert_eq!(map.get(1, 1), None);
    }

    #[test]
    fn test_moderate_delta_ignored() {
        let mut grid = vec![Color::rgb(100, 100, 100); 9];
        grid[4] = Color::rgb(200, 200, 200); // delta 300, not above
        let buf = PixelBuffer::from_colors(3, 3, &grid).unwrap();
        assert_eq!(detect(&buf, 300, 20).get(1, 1), None);
    }
}
