//! Tests for sparse grid storage, hole reporting and the y mirror

#[cfg(test)]
mod tests {
    use gridmerge::spatial::{Bounds, Content, Coordinate, Grid};

    fn at(x: i32, y: i32, z: i32) -> Coordinate {
        Coordinate::new(x, y, z)
    }

    // Tests the box is unknown until the first write
    // Verified by initialising bounds at the origin
    #[test]
    fn test_size_unknown_until_first_write() {
        let mut grid = Grid::new();
        assert!(!grid.is_size_known());
        assert_eq!(grid.bounds(), None);

        grid.set(at(4, 5, 6), "(/turf/floor)");
        assert!(grid.is_size_known());
        assert_eq!(grid.bounds(), Some(Bounds::single(at(4, 5, 6))));
    }

    // Tests set widens the box and overwrites in place
    // Verified by replacing the box on every write
    #[test]
    fn test_set_tracks_bounds() {
        let mut grid = Grid::new();
        grid.set(at(2, 2, 1), "a");
        grid.set(at(1, 3, 1), "b");
        grid.set(at(2, 2, 1), "c");

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.get(at(2, 2, 1)), Some("c"));
        assert_eq!(grid.min(), Some(at(1, 2, 1)));
        assert_eq!(grid.max(), Some(at(2, 3, 1)));
    }

    // Tests holes answer the sentinel and are counted
    // Verified by skipping the counter increment
    #[test]
    fn test_hole_reports_sentinel() {
        let mut grid = Grid::new();
        grid.set(at(1, 1, 1), "a");
        grid.set(at(2, 2, 1), "b");

        assert_eq!(grid.content_at(at(1, 1, 1)), "a");
        assert_eq!(grid.holes_reported(), 0);

        assert_eq!(grid.content_at(at(2, 1, 1)), "null");
        assert_eq!(&*grid.shared_content_at(at(1, 2, 1)), "null");
        assert_eq!(grid.holes_reported(), 2);
        assert_eq!(grid.get(at(2, 1, 1)), None);
    }

    // Tests missing cells lists every hole in canonical order
    // Verified by iterating stored cells instead of the box
    #[test]
    fn test_missing_cells() {
        let mut grid = Grid::new();
        grid.set(at(1, 1, 1), "a");
        grid.set(at(2, 2, 1), "b");

        let missing: Vec<_> = grid.missing_cells().collect();
        assert_eq!(missing, vec![at(2, 1, 1), at(1, 2, 1)]);
    }

    // Tests distinct values are deduplicated and sorted
    // Verified by collecting into a Vec
    #[test]
    fn test_distinct_values_sorted() {
        let grid: Grid = [
            (at(1, 1, 1), Content::from("wall")),
            (at(2, 1, 1), Content::from("floor")),
            (at(3, 1, 1), Content::from("wall")),
        ]
        .into_iter()
        .collect();

        let distinct = grid.distinct_values();
        let values: Vec<&str> = distinct.iter().map(|v| &**v).collect();
        assert_eq!(values, vec!["floor", "wall"]);
    }

    // Tests mirroring swaps matching rows on every level
    // Verified by mirroring against min.y only
    #[test]
    fn test_mirror_y_swaps_rows() {
        let mut grid = Grid::new();
        for z in 1..=2 {
            for y in 2..=4 {
                grid.set(at(1, y, z), format!("row{y}"));
            }
        }

        grid.mirror_y();

        for z in 1..=2 {
            assert_eq!(grid.get(at(1, 2, z)), Some("row4"));
            assert_eq!(grid.get(at(1, 3, z)), Some("row3"));
            assert_eq!(grid.get(at(1, 4, z)), Some("row2"));
        }
    }

    // Tests mirroring twice restores the grid, holes included
    // Verified by dropping values whose partner is a hole
    #[test]
    fn test_mirror_y_twice_is_identity() {
        let mut grid = Grid::new();
        grid.set(at(1, 1, 1), "a");
        grid.set(at(2, 1, 1), "b");
        grid.set(at(1, 4, 1), "c");
        let before = grid.clone();

        grid.mirror_y();
        assert_eq!(grid.get(at(1, 4, 1)), Some("a"));
        assert_eq!(grid.get(at(2, 4, 1)), Some("b"));
        assert_eq!(grid.get(at(2, 1, 1)), None);

        grid.mirror_y();
        assert_eq!(grid, before);
    }

    // Tests equality ignores the hole counter
    // Verified by deriving PartialEq over all fields
    #[test]
    fn test_equality_ignores_hole_count() {
        let mut grid = Grid::new();
        grid.set(at(1, 1, 1), "a");
        grid.set(at(2, 2, 1), "b");
        let mut other = grid.clone();

        let _ = other.content_at(at(2, 1, 1));
        assert_eq!(other.holes_reported(), 1);
        assert_eq!(grid.holes_reported(), 0);
        assert_eq!(grid, other);
        other.set(at(2, 1, 1), "c");
        assert_ne!(grid, other);
    }
}
