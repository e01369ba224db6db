//! Tests for re-encoding against a predecessor's code table

#[cfg(test)]
mod tests {
    use gridmerge::codec::decode::{ParseMode, parse};
    use gridmerge::codec::encode::EncodeOptions;
    use gridmerge::reconcile::clean;
    use gridmerge::spatial::{Coordinate, Grid};

    const OLD_MAP: &str = "\"a\" = (/turf/wall)\n\
                           \"b\" = (/turf/floor)\n\
                           \"c\" = (/obj/table)\n\
                           \n\
                           (1,1,1) = {\"\n\
                           abc\n\
                           \"}\n";

    // Tests shared values keep their codes and new values fill gaps
    // Verified by allocating without the reference
    #[test]
    fn test_clean_keeps_codes() {
        let old = parse(OLD_MAP, ParseMode::DictionaryOnly).expect("decode");
        let mut revised = Grid::new();
        revised.set(Coordinate::new(1, 1, 1), "(/turf/floor)");
        revised.set(Coordinate::new(2, 1, 1), "(/obj/chair)");
        revised.set(Coordinate::new(3, 1, 1), "(/obj/table)");

        let cleaned = clean(&old.codes, &revised, &EncodeOptions::sequential()).expect("clean");
        let codes = &cleaned.encoded.codes;

        assert_eq!(codes.code_of("(/turf/floor)"), Some("b"));
        assert_eq!(codes.code_of("(/obj/table)"), Some("c"));
        assert_eq!(codes.code_of("(/obj/chair)"), Some("a"));
        assert_eq!((cleaned.kept, cleaned.reassigned, cleaned.added), (2, 0, 1));
    }

    // Tests the cleaned output decodes to the revised grid
    // Verified by writing rows with the reference codes for new values
    #[test]
    fn test_clean_round_trips() {
        let old = parse(OLD_MAP, ParseMode::Full).expect("decode");
        let mut revised = old.grid.clone();
        revised.set(Coordinate::new(2, 1, 1), "(/turf/lava)");

        let cleaned = clean(&old.codes, &revised, &EncodeOptions::sequential()).expect("clean");
        let decoded = parse(&cleaned.encoded.text, ParseMode::Full).expect("decode");

        assert_eq!(decoded.grid, revised);
    }

    // Tests cleaning an unchanged map reproduces it byte for byte
    // Verified by sorting dictionary lines by value
    #[test]
    fn test_clean_unchanged_is_stable() {
        let old = parse(OLD_MAP, ParseMode::Full).expect("decode");

        let cleaned = clean(&old.codes, &old.grid, &EncodeOptions::sequential()).expect("clean");

        assert_eq!(cleaned.encoded.text, OLD_MAP);
        assert_eq!(cleaned.kept, 3);
    }

    // Tests codes that no longer fit are counted as reassigned
    // Verified by counting every reference value as kept
    #[test]
    fn test_clean_reassigns_out_of_range_codes() {
        let text = "\"aa\" = (/turf/wall)\n\"ba\" = (/turf/floor)\n\n(1,1,1) = {\"\naaba\n\"}\n";
        let old = parse(text, ParseMode::Full).expect("decode");

        let cleaned = clean(&old.codes, &old.grid, &EncodeOptions::sequential()).expect("clean");

        assert_eq!(cleaned.encoded.codes.code_of("(/turf/wall)"), Some("a"));
        assert_eq!(cleaned.encoded.codes.code_of("(/turf/floor)"), Some("b"));
        assert_eq!((cleaned.kept, cleaned.reassigned, cleaned.added), (0, 2, 0));
    }
}
