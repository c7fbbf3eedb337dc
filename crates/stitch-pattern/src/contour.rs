//! Isolated-cell pruning for edge maps.

use tracing::debug;

use crate::edges::{EdgeKind, EdgeMap};

/// Drop internal edge cells that have no 4-neighbour edge.
///
/// One pass, judged against the input map: removing a cell never makes a
/// neighbour look isolated within the same call. External cells are kept
/// regardless of their neighbours.
pub fn refine(edges: &EdgeMap) -> EdgeMap {
    let mut refined = edges.clone();
    let mut dropped = 0usize;

    for (key, edge) in edges.iter() {
        if edge.kind == EdgeKind::External {
            continue;
        }
        let (x, y) = (key.x as isize, key.y as isize);
        let connected = [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .iter()
            .any(|&(dx, dy)| edges.is_edge(x + dx, y + dy));
        if !connected {
            refined.set(key.x, key.y, None);
            dropped += 1;
        }
    }

    debug!(before = edges.len(), dropped, "contour refined");
    refined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::Edge;
    use crate::grid::CellKey;

    #[test]
    fn test_isolated_internal_dropped_external_kept() {
        let map = EdgeMap::from_cells(
            5,
            5,
            [
                (CellKey::new(0, 0), Edge::EXTERNAL),
                (CellKey::new(3, 3), Edge::INTERNAL),
            ],
        )
        .unwrap();
        let refined = refine(&map);
        assert_eq!(refined.get(0, 0), Some(Edge::EXTERNAL));
        assert_eq!(refined.get(3, 3), None);
    }

    #[test]
    fn test_connected_internal_pair_survives() {
        let map = EdgeMap::from_cells(
            4,
            1,
            [
                (CellKey::new(1, 0), Edge::INTERNAL),
                (CellKey::new(2, 0), Edge::WEAK),
            ],
        )
        .unwrap();
        assert_eq!(refine(&map), map);
    }

    #[test]
    fn test_diagonal_neighbour_does_not_count() {
        let map = EdgeMap::from_cells(
            3,
            3,
            [
                (CellKey::new(0, 0), Edge::INTERNAL),
                (CellKey::new(1, 1), Edge::INTERNAL),
            ],
        )
        .unwrap();
        assert!(refine(&map).is_empty());
    }

    #[test]
    fn test_refining_twice_changes_nothing() {
        let map = EdgeMap::from_cells(
            4,
            2,
            [
                (CellKey::new(0, 0), Edge::EXTERNAL),
                (CellKey::new(1, 0), Edge::INTERNAL),
                (CellKey::new(3, 1), Edge::WEAK),
            ],
        )
        .unwrap();
        let once = refine(&map);
        assert_eq!(once.len(), 2);
        assert_eq!(refine(&once), once);
    }
}
