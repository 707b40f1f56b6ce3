use std::cmp::Ordering;
use std::error::Error;

use sort_test_tools::instantiate_sort_tests;
use sort_test_tools::Sort;

// Checks the suite itself against the standard library sort.
struct SortImpl {}

impl Sort for SortImpl {
    fn name() -> String {
        "rust_std_stable".into()
    }

    fn is_stable() -> bool {
        true
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone,
    {
        arr.sort();
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        arr.sort_by(compare);
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
        if from > to || to > arr.len() {
            return Err(format!("range {from}..{to} out of bounds for length {}", arr.len()).into());
        }

        arr[from..to].sort_by(compare);
        Ok(())
    }
}

instantiate_sort_tests!(SortImpl);
