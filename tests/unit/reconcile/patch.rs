//! Tests for patch, pack and unpack

#[cfg(test)]
mod tests {
    use gridmerge::codec::records::Record;
    use gridmerge::reconcile::{diff, pack, patch, unpack};
    use gridmerge::spatial::{Content, Coordinate, Grid};

    fn at(x: i32, y: i32, z: i32) -> Coordinate {
        Coordinate::new(x, y, z)
    }

    fn numbered(width: i32, height: i32, depth: i32) -> Grid {
        let mut grid = Grid::new();
        for z in 1..=depth {
            for y in 1..=height {
                for x in 1..=width {
                    grid.set(at(x, y, z), format!("({x}-{y}-{z})"));
                }
            }
        }
        grid
    }

    // Tests record rows are flipped back against the original
    // Verified by applying records without the flip
    #[test]
    fn test_patch_flips_rows() {
        let original = numbered(2, 3, 1);
        let patched = patch(&original, &[Record::new(at(1, 3, 1), "(new)")]);

        assert_eq!(patched.get(at(1, 1, 1)), Some("(new)"));
        assert_eq!(patched.get(at(2, 1, 1)), Some("(2-1-1)"));
        assert_eq!(original.get(at(1, 1, 1)), Some("(1-1-1)"));
    }

    // Tests patching with a diff reproduces the revision
    // Verified by flipping against the revised box in patch
    #[test]
    fn test_patch_inverts_diff() {
        let original = numbered(3, 4, 2);
        let mut revised = original.clone();
        revised.set(at(1, 1, 1), "(wall)");
        revised.set(at(3, 4, 2), "(lava)");
        revised.set(at(2, 2, 2), "(1-1-1)");

        let records = diff(&original, &revised).records;
        let patched = patch(&original, &records);

        assert_eq!(patched, revised);
    }

    // Tests unpack groups cells per level in display orientation
    // Verified by emitting storage-oriented rows
    #[test]
    fn test_unpack_levels() {
        let grid = numbered(2, 2, 2);
        let levels = unpack(&grid);

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].len(), 4);
        assert_eq!(levels[0][0], Record::new(at(1, 2, 1), "(1-1-1)"));
        assert_eq!(levels[1][3], Record::new(at(2, 1, 2), "(2-2-2)"));
        assert!(unpack(&Grid::new()).is_empty());
    }

    // Tests holes unpack as the sentinel
    // Verified by skipping holes
    #[test]
    fn test_unpack_hole() {
        let grid: Grid = numbered(2, 2, 1)
            .iter()
            .filter(|&(cell, _)| cell != at(1, 1, 1))
            .map(|(cell, value)| (cell, Content::from(value)))
            .collect();

        let levels = unpack(&grid);
        assert_eq!(levels[0][0], Record::new(at(1, 2, 1), "null"));
        assert_eq!(levels[0][1], Record::new(at(2, 2, 1), "(2-1-1)"));
    }

    // Tests pack mirrors records into storage orientation
    // Verified by storing records without mirroring
    #[test]
    fn test_pack_mirrors() {
        let records = vec![
            Record::new(at(1, 1, 1), "(bottom)"),
            Record::new(at(1, 2, 1), "(middle)"),
            Record::new(at(1, 3, 1), "(top)"),
        ];
        let grid = pack(&records);

        assert_eq!(grid.get(at(1, 1, 1)), Some("(top)"));
        assert_eq!(grid.get(at(1, 2, 1)), Some("(middle)"));
        assert_eq!(grid.get(at(1, 3, 1)), Some("(bottom)"));
    }

    // Tests pack undoes unpack for maps whose rows start at 1
    // Verified by mirroring about zero instead of the box
    #[test]
    fn test_pack_inverts_unpack() {
        let grid = numbered(3, 5, 2);
        let records: Vec<Record> = unpack(&grid).into_iter().flatten().collect();

        assert_eq!(pack(&records), grid);
    }
}
