use std::cmp::Ordering;
use std::error::Error;

use multisort::config::ManyPivotConfig;
use multisort::unstable::many_pivot;

/// Runs the shared suite against a sort of this crate.
macro_rules! test_sort {
    ($mod_name:ident, $sort:ty) => {
        test_sort!($mod_name, $sort, observable_comparisons: true);
    };
    ($mod_name:ident, $sort:ty, observable_comparisons: $observable:expr) => {
        mod $mod_name {
            use super::*;

            use sort_test_tools::instantiate_sort_tests;

            struct SortImpl;

            impl sort_test_tools::Sort for SortImpl {
                fn name() -> String {
                    <$sort as multisort::Sort>::name()
                }

                fn is_stable() -> bool {
                    <$sort as multisort::Sort>::is_stable()
                }

                fn observable_comparisons() -> bool {
                    $observable
                }

                fn sort<T>(arr: &mut [T])
                where
                    T: Ord + Clone,
                {
                    <$sort as multisort::Sort>::sort(arr);
                }

                fn sort_by<T, F>(arr: &mut [T], compare: F)
                where
                    T: Clone,
                    F: FnMut(&T, &T) -> Ordering,
                {
                    <$sort as multisort::Sort>::sort_by(arr, compare);
                }

                fn sort_range_by<T, F>(
                    arr: &mut [T],
                    from: usize,
                    to: usize,
                    compare: F,
                ) -> Result<(), Box<dyn Error>>
                where
                    T: Clone,
                    F: FnMut(&T, &T) -> Ordering,
                {
                    <$sort as multisort::Sort>::sort_range_by(arr, from, to, compare)?;
                    Ok(())
                }
            }

            instantiate_sort_tests!(SortImpl);
        }
    };
}

/// The many pivot sort with thresholds small enough that the multi pivot path, window
/// exhaustion and candidate rebuilds all happen at the sizes the suite uses.
struct ManyPivotSmallThreshold;

impl multisort::Sort for ManyPivotSmallThreshold {
    fn name() -> String {
        "rust_many_pivot_3w_small_threshold_unstable".into()
    }

    fn is_stable() -> bool {
        false
    }

    fn sort_range_by<T, F>(
        v: &mut [T],
        from: usize,
        to: usize,
        compare: F,
    ) -> Result<(), multisort::SortError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        let config = ManyPivotConfig::default()
            .with_sample_size(7)
            .with_algorithm_threshold(16);

        many_pivot::sort_range_by_with_config(v, from, to, &config, compare).map(|_| ())
    }
}

test_sort!(rust_std_stable, multisort::stable::rust_std::SortImpl);
test_sort!(rust_std_unstable, multisort::unstable::rust_std::SortImpl);
test_sort!(rust_three_lane_merge_stable, multisort::stable::three_lane::SortImpl);
test_sort!(
    rust_many_pivot_3w_unstable,
    many_pivot::SortImpl,
    observable_comparisons: false
);
test_sort!(
    rust_many_pivot_3w_small_threshold_unstable,
    ManyPivotSmallThreshold,
    observable_comparisons: false
);
