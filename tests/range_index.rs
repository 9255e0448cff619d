use rangeindex::{MaxIndex, SumIndex};

fn values_strategy() -> impl proptest::strategy::Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-1_000_i64..1_000, 1..64)
}

// Wrapping fold to match the index's sum policy; tree combining order
// does not matter because wrapping addition stays associative.
fn slice_sum(values: &[i64], start: usize, end: usize) -> i64 {
    values[start..=end]
        .iter()
        .fold(0_i64, |acc, &v| acc.wrapping_add(v))
}

fn slice_max(values: &[i64], start: usize, end: usize) -> i64 {
    values[start..=end].iter().copied().max().unwrap()
}

proptest::proptest! {
    #[test]
    fn sum_query_consistent(values in values_strategy(), ranges: Vec<(proptest::sample::Index, proptest::sample::Index)>) {
        let index = SumIndex::from_slice(&values).unwrap();

        for (a, b) in ranges {
            let a = a.index(values.len());
            let b = b.index(values.len());
            let (start, end) = (a.min(b), a.max(b));

            assert_eq!(index.query(start, end), Ok(slice_sum(&values, start, end)));
        }
    }

    #[test]
    fn max_query_consistent(values in values_strategy(), ranges: Vec<(proptest::sample::Index, proptest::sample::Index)>) {
        let index = MaxIndex::from_slice(&values).unwrap();

        for (a, b) in ranges {
            let a = a.index(values.len());
            let b = b.index(values.len());
            let (start, end) = (a.min(b), a.max(b));

            assert_eq!(index.query(start, end), Ok(slice_max(&values, start, end)));
        }
    }

    #[test]
    fn updates_track_slice(mut values in values_strategy(), writes: Vec<(proptest::sample::Index, i64)>) {
        // Writes deliberately span all of i64: sums that wrap must agree
        // with the wrapping reference fold, not panic.
        let mut sum_index = SumIndex::from_slice(&values).unwrap();
        let mut max_index = MaxIndex::from_slice(&values).unwrap();

        for (position, value) in writes {
            let position = position.index(values.len());
            values[position] = value;
            sum_index.update(position, value).unwrap();
            max_index.update(position, value).unwrap();

            let end = values.len() - 1;
            assert_eq!(sum_index.query(0, end), Ok(slice_sum(&values, 0, end)));
            assert_eq!(max_index.query(0, end), Ok(slice_max(&values, 0, end)));
            assert_eq!(sum_index.query(position, position), Ok(value));
            assert_eq!(max_index.query(position, position), Ok(value));
        }
    }

    #[test]
    fn sum_range_split(values in values_strategy(), split: proptest::sample::Index) {
        // query(s, e) must equal query(s, m) + query(m + 1, e) at any split.
        proptest::prop_assume!(values.len() >= 2);

        let index = SumIndex::from_slice(&values).unwrap();
        let end = values.len() - 1;
        let mid = split.index(end);

        let whole = index.query(0, end).unwrap();
        let lower = index.query(0, mid).unwrap();
        let upper = index.query(mid + 1, end).unwrap();
        assert_eq!(whole, lower.wrapping_add(upper));
    }

    #[test]
    fn update_is_local(values in values_strategy(), target: proptest::sample::Index, value in -1_000_i64..1_000) {
        proptest::prop_assume!(values.len() >= 2);

        let mut index = SumIndex::from_slice(&values).unwrap();
        let target = target.index(values.len());

        // Record every range that does not contain the target position.
        let mut untouched = Vec::new();
        for start in 0..values.len() {
            for end in start..values.len() {
                if target < start || target > end {
                    untouched.push((start, end, index.query(start, end).unwrap()));
                }
            }
        }

        index.update(target, value).unwrap();

        assert_eq!(index.query(target, target), Ok(value));
        for (start, end, before) in untouched {
            assert_eq!(index.query(start, end), Ok(before));
        }
    }

    #[test]
    fn rebuild_matches_fresh(values in values_strategy(), writes: Vec<(proptest::sample::Index, i64)>) {
        let mut index = MaxIndex::from_slice(&values).unwrap();
        for (position, value) in writes {
            index.update(position.index(values.len()), value).unwrap();
        }

        // Rebuilding from the original slice erases every update.
        index.build(&values).unwrap();
        let fresh = MaxIndex::from_slice(&values).unwrap();

        for start in 0..values.len() {
            for end in start..values.len() {
                assert_eq!(index.query(start, end), fresh.query(start, end));
            }
        }
    }
}
