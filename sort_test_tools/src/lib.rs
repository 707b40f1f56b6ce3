use std::cmp::Ordering;
use std::error::Error;

/// What the shared test suite and the benchmarks need from a sort.
pub trait Sort {
    fn name() -> String;

    fn is_stable() -> bool;

    /// Whether every comparison sees the elements that end up in the slice. Sorts that compare
    /// against clones of sampled elements return `false`, side effects of those comparisons are
    /// lost with the clones.
    fn observable_comparisons() -> bool {
        true
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering;

    fn sort_range_by<T, F>(
        arr: &mut [T],
        from: usize,
        to: usize,
        compare: F,
    ) -> Result<(), Box<dyn Error>>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering;
}

pub mod patterns;
pub mod test_types;
