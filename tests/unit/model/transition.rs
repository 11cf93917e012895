//! Tests for transition counting and cumulative normalization

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;
    use kmarkov::model::transition::{MAX_SAMPLE, TransitionTable, build};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Tests the four-pixel constant scenario split by alternating bits
    // Verified by starting the cursor at the first pixel instead of 0
    #[test]
    fn test_build_constant_alternating() {
        let pixels = [10u8, 10, 10, 10];
        let assignment = bits![1, 0, 1, 0];

        let (class_a, class_b) = build(&pixels, assignment);

        assert_eq!(class_a.count(0, 10), 1);
        assert_eq!(class_a.count(10, 10), 1);
        assert_eq!(class_b.count(10, 10), 2);
        assert_eq!(class_a.total(), 2);
        assert_eq!(class_b.total(), 2);
        assert_eq!(class_b.count(0, 10), 0);
    }

    // Tests that the cursor follows true pixels across class boundaries
    // Verified by keeping one cursor per class
    #[test]
    fn test_build_shares_cursor_between_classes() {
        let pixels = [1u8, 2, 3, 4];
        let assignment = bits![1, 0, 1, 0];

        let (class_a, class_b) = build(&pixels, assignment);

        assert_eq!(class_a.count(0, 1), 1);
        assert_eq!(class_b.count(1, 2), 1);
        assert_eq!(class_a.count(2, 3), 1);
        assert_eq!(class_b.count(3, 4), 1);
        assert_eq!(class_a.count(1, 3), 0);
    }

    // Tests normalization of the scenario rows
    // Verified by normalizing against the table total instead of the row total
    #[test]
    fn test_normalize_single_transition_rows() {
        let pixels = [10u8, 10, 10, 10];
        let (class_a, class_b) = build(&pixels, bits![1, 0, 1, 0]);
        let (cdf_a, cdf_b) = (class_a.normalize(), class_b.normalize());

        for next in 0..=255u8 {
            let expected = if next >= 10 { MAX_SAMPLE } else { 0 };
            assert_eq!(cdf_a.threshold(10, next), expected);
            assert_eq!(cdf_a.threshold(0, next), expected);
            assert_eq!(cdf_b.threshold(10, next), expected);
        }
        for previous in (1..=255u8).filter(|&p| p != 10) {
            assert!(cdf_a.is_row_empty(previous));
        }
        assert!(cdf_b.is_row_empty(0));
    }

    // Tests that rows without observations stay all-zero
    // Verified by filling empty rows with a uniform distribution
    #[test]
    fn test_normalize_empty_table() {
        let cdf = TransitionTable::new().normalize();

        for previous in 0..=255u8 {
            assert!(cdf.is_row_empty(previous));
        }
    }

    // Tests monotone rows reaching the ceiling on random data
    // Verified by storing per-column probabilities instead of running sums
    #[test]
    fn test_normalize_rows_non_decreasing() {
        let mut rng = StdRng::seed_from_u64(17);
        let pixels: Vec<u8> = (0..5000).map(|_| rng.random_range(0..40)).collect();
        let assignment: BitVec = (0..5000).map(|_| rng.random_bool(0.5)).collect();

        let (class_a, _) = build(&pixels, &assignment);
        let cdf = class_a.normalize();

        for previous in 0..=255u8 {
            let row = cdf.row(previous);
            assert!(row.windows(2).into_iter().all(|pair| pair[0] <= pair[1]));
            if class_a.row_total(previous) > 0 {
                assert_eq!(row[255], MAX_SAMPLE);
            } else {
                assert!(cdf.is_row_empty(previous));
            }
        }
    }

    // Tests proportional thresholds for a split row
    // Verified by rounding up instead of flooring
    #[test]
    fn test_normalize_proportions() {
        let mut table = TransitionTable::new();
        table.record(5, 1);
        table.record(5, 3);
        table.record(5, 3);
        table.record(5, 3);

        let cdf = table.normalize();

        assert_eq!(cdf.threshold(5, 0), 0);
        assert_eq!(cdf.threshold(5, 1), MAX_SAMPLE / 4);
        assert_eq!(cdf.threshold(5, 2), MAX_SAMPLE / 4);
        assert_eq!(cdf.threshold(5, 3), MAX_SAMPLE);
    }

    // Tests inverse-transform sampling and the empty-row fallback
    // Verified by using <= when comparing against thresholds
    #[test]
    fn test_sample() {
        let mut table = TransitionTable::new();
        table.record(5, 1);
        table.record(5, 3);
        let cdf = table.normalize();

        assert_eq!(cdf.sample(5, 0), 1);
        assert_eq!(cdf.sample(5, MAX_SAMPLE / 2 - 1), 1);
        assert_eq!(cdf.sample(5, MAX_SAMPLE / 2), 3);
        assert_eq!(cdf.sample(5, MAX_SAMPLE), 0);
        assert_eq!(cdf.sample(6, 12_345), 0);
    }
}
