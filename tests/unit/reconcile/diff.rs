//! Tests for grid comparison and its display-oriented record output

#[cfg(test)]
mod tests {
    use gridmerge::reconcile::diff;
    use gridmerge::spatial::{Bounds, Content, Coordinate, Grid};

    fn at(x: i32, y: i32, z: i32) -> Coordinate {
        Coordinate::new(x, y, z)
    }

    fn filled(width: i32, height: i32, value: &str) -> Grid {
        let mut grid = Grid::new();
        for y in 1..=height {
            for x in 1..=width {
                grid.set(at(x, y, 1), value);
            }
        }
        grid
    }

    // Tests identical grids match
    // Verified by emitting a record for every compared cell
    #[test]
    fn test_identical_grids_match() {
        let grid = filled(3, 3, "(/turf/floor)");
        let result = diff(&grid, &grid.clone());

        assert!(result.is_match());
        assert_eq!(result.count(), 0);
        assert_eq!(result.render(), "");
    }

    // Tests a changed cell is reported with the revised content, y flipped
    // Verified by emitting storage-oriented y
    #[test]
    fn test_changed_cell_flipped() {
        let old = filled(2, 3, "(/turf/floor)");
        let mut new = old.clone();
        new.set(at(2, 1, 1), "(/turf/wall)");

        let result = diff(&old, &new);

        assert_eq!(result.count(), 1);
        assert_eq!(result.render(), "(2,3,1)=(/turf/wall)\n");
    }

    // Tests only the overlap of both boxes is compared
    // Verified by comparing the union of both boxes
    #[test]
    fn test_compares_intersection() {
        let old = filled(2, 2, "(a)");
        let new = filled(3, 2, "(a)");

        let result = diff(&old, &new);

        assert!(result.is_match());
        assert_eq!(
            result.compared,
            Some(Bounds {
                min: at(1, 1, 1),
                max: at(2, 2, 1),
            })
        );
    }

    // Tests disjoint and empty grids compare nothing
    // Verified by iterating an inverted intersection
    #[test]
    fn test_nothing_to_compare() {
        let mut far = Grid::new();
        far.set(at(10, 10, 1), "(a)");

        let disjoint = diff(&filled(2, 2, "(a)"), &far);
        assert_eq!(disjoint.compared, None);
        assert!(disjoint.is_match());

        let empty = diff(&Grid::new(), &far);
        assert_eq!(empty.compared, None);
    }

    // Tests holes surface as differences against the sentinel
    // Verified by skipping cells missing on either side
    #[test]
    fn test_hole_is_a_difference() {
        let old = filled(2, 2, "(a)");
        let new: Grid = old
            .iter()
            .filter(|&(cell, _)| cell != at(1, 2, 1))
            .map(|(cell, value)| (cell, Content::from(value)))
            .collect();

        let result = diff(&old, &new);

        assert_eq!(result.render(), "(1,1,1)=null\n");
        assert_eq!(new.holes_reported(), 1);
    }
}
