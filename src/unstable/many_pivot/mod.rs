//! Many pivot quicksort with three way partitioning.
//!
//! Instead of picking a fresh pivot for every partition step, a sorted set of distinct candidate
//! pivots is sampled once and handed down the recursion. Each step partitions around the middle
//! candidate of its window and gives each side the half of the window that can still occur in
//! it, so the pivots stay close to the medians without resampling. Elements equal to the pivot
//! end up in a middle block that is never looked at again, which makes inputs with few distinct
//! values cheap.
//!
//! Once a window is down to `rebuild_threshold` candidates both sides start over: large ones take
//! a new sample, small ones go to the baseline sort.
//!
//! The sort is not stable. The pivot candidates are clones of sampled elements, so comparisons
//! against a pivot see the clone and not the element that is being moved around.

use std::cmp::Ordering;
use std::mem;

use crate::config::ManyPivotConfig;
use crate::error::{check_range, SortError};
use crate::Sort;
use crate::unstable::rust_std;

mod partition;
mod pivots;

use partition::partition_three_way;
use pivots::select_pivots;

sort_impl!("rust_many_pivot_3w_unstable", false);

/// What a sort call did, mostly useful to tests and benchmarks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Three way partition steps.
    pub partitions: usize,
    /// Candidate sets sampled, including the first one.
    pub candidate_sets: usize,
    /// Ranges of two or more elements handed to the baseline sort.
    pub baseline_sorts: usize,
}

impl SortStats {
    /// Candidate sets sampled because a window ran dry.
    pub fn pivot_rebuilds(&self) -> usize {
        self.candidate_sets.saturating_sub(1)
    }
}

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Clone,
{
    <SortImpl as Sort>::sort(v);
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    <SortImpl as Sort>::sort_by(v, compare);
}

/// Sorts `v[from..to]` with the process wide [`ManyPivotConfig`].
#[inline]
pub fn sort_range_by<T, F>(v: &mut [T], from: usize, to: usize, compare: F) -> Result<(), SortError>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    sort_range_by_with_config(v, from, to, ManyPivotConfig::global(), compare).map(|_| ())
}

/// Sorts `v[from..to]` with an explicit config and reports what happened.
///
/// Only the first candidate set is allowed to fail allocating, at that point nothing has been
/// moved yet. If a later rebuild can't get memory the affected range is sorted by the baseline
/// sort instead.
pub fn sort_range_by_with_config<T, F>(
    v: &mut [T],
    from: usize,
    to: usize,
    config: &ManyPivotConfig,
    mut compare: F,
) -> Result<SortStats, SortError>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    check_range(from, to, v.len())?;

    let mut sorter = ManyPivotSort {
        config: config.normalized(),
        compare: &mut compare,
        stats: SortStats::default(),
    };
    sorter.sort(&mut v[from..to])?;

    Ok(sorter.stats)
}

struct ManyPivotSort<'c, F> {
    config: ManyPivotConfig,
    compare: &'c mut F,
    stats: SortStats,
}

impl<F> ManyPivotSort<'_, F> {
    /// Size threshold entry point, used at the top and whenever a candidate window runs dry.
    fn sort<T>(&mut self, mut v: &mut [T]) -> Result<(), SortError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        loop {
            let len = v.len();
            if len < self.config.algorithm_threshold {
                self.baseline_sort(v);
                return Ok(());
            }

            let pivots = match select_pivots(v, self.config.sample_size, self.compare) {
                Ok(pivots) => pivots,
                Err(err) if self.stats.partitions == 0 => return Err(err),
                Err(err) => {
                    tracing::warn!(len, %err, "pivot rebuild failed, using baseline sort");
                    self.baseline_sort(v);
                    return Ok(());
                }
            };
            self.stats.candidate_sets += 1;
            tracing::trace!(len, candidates = pivots.len(), "sampled pivot candidates");

            match self.sort_with_pivots(mem::take(&mut v), &pivots, 0, pivots.len())? {
                Some(rest) => v = rest,
                None => return Ok(()),
            }
        }
    }

    /// Partitions `v` with the candidates in `pivots[cand_from..cand_to]`.
    ///
    /// Returns the part of `v` that still needs sorting with fresh candidates, if any. The
    /// smaller side of every partition is handled by recursion and the larger one by looping, so
    /// the stack depth stays logarithmic no matter how skewed the partitions are.
    fn sort_with_pivots<'a, T>(
        &mut self,
        mut v: &'a mut [T],
        pivots: &[T],
        mut cand_from: usize,
        mut cand_to: usize,
    ) -> Result<Option<&'a mut [T]>, SortError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        loop {
            if v.len() <= 1 {
                return Ok(None);
            }

            if cand_from == cand_to {
                return Ok(Some(v));
            }

            let window = cand_to - cand_from;
            let pivot_idx = cand_from + window / 2;
            let (lt, gt) = partition_three_way(v, &pivots[pivot_idx], self.compare);
            self.stats.partitions += 1;

            if lt == gt {
                // Every candidate in the window occurs in this range, so with a consistent
                // comparison at least one element compares equal to the pivot.
                tracing::debug!(len = v.len(), "partition made no progress, using baseline sort");
                self.baseline_sort(v);
                return Ok(None);
            }

            let (less, rest) = mem::take(&mut v).split_at_mut(lt);
            let greater = &mut rest[(gt - lt)..];

            let less_window = (cand_from, pivot_idx);
            let greater_window = (pivot_idx + 1, cand_to);

            let (small, small_window, large, large_window) = if less.len() <= greater.len() {
                (less, less_window, greater, greater_window)
            } else {
                (greater, greater_window, less, less_window)
            };

            if window <= self.config.rebuild_threshold {
                self.sort(small)?;
                return Ok(Some(large));
            }

            if let Some(rest) = self.sort_with_pivots(small, pivots, small_window.0, small_window.1)? {
                self.sort(rest)?;
            }

            v = large;
            (cand_from, cand_to) = large_window;
        }
    }

    fn baseline_sort<T>(&mut self, v: &mut [T])
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if v.len() > 1 {
            self.stats.baseline_sorts += 1;
            rust_std::sort_by(v, &mut *self.compare);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::panic::{self, AssertUnwindSafe};

    fn small_config() -> ManyPivotConfig {
        ManyPivotConfig::default()
            .with_sample_size(15)
            .with_algorithm_threshold(64)
    }

    fn pseudo_random(len: usize, modulus: u64) -> Vec<u64> {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                state % modulus
            })
            .collect()
    }

    fn assert_sorted_permutation(original: &[u64], sorted: &[u64]) {
        let mut expected = original.to_vec();
        expected.sort_unstable();
        assert_eq!(expected, sorted);
    }

    #[test]
    fn concrete_scenario() {
        let mut v = [5, 3, 1, 4, 1, 5, 9, 2, 6, 5];
        sort(&mut v);
        assert_eq!(v, [1, 1, 2, 3, 4, 5, 5, 5, 6, 9]);

        let mut v = [5, 3, 1, 4, 1, 5, 9, 2, 6, 5];
        let config = ManyPivotConfig::default()
            .with_sample_size(3)
            .with_algorithm_threshold(2);
        let stats = sort_range_by_with_config(&mut v, 0, 10, &config, i32::cmp).unwrap();
        assert_eq!(v, [1, 1, 2, 3, 4, 5, 5, 5, 6, 9]);
        assert!(stats.partitions > 0);
    }

    #[test]
    fn huge_sample_size() {
        let config = ManyPivotConfig::default()
            .with_sample_size(usize::MAX)
            .with_algorithm_threshold(2);

        let mut v = [3u64, 1, 2, 5, 4];
        let stats = sort_range_by_with_config(&mut v, 0, 5, &config, u64::cmp).unwrap();
        assert_eq!(v, [1, 2, 3, 4, 5]);
        assert!(stats.partitions > 0);

        // Not normalized by the builder.
        let config = ManyPivotConfig {
            sample_size: usize::MAX,
            ..config
        };
        let original = pseudo_random(1_000, 50);
        let mut v = original.clone();
        sort_range_by_with_config(&mut v, 0, 1_000, &config, u64::cmp).unwrap();
        assert_sorted_permutation(&original, &v);
    }

    #[test]
    fn below_threshold_goes_to_baseline() {
        let original = pseudo_random(500, 1_000);
        let mut v = original.clone();

        let stats =
            sort_range_by_with_config(&mut v, 0, 500, &ManyPivotConfig::default(), u64::cmp)
                .unwrap();

        assert_sorted_permutation(&original, &v);
        assert_eq!(
            stats,
            SortStats {
                partitions: 0,
                candidate_sets: 0,
                baseline_sorts: 1,
            }
        );
    }

    #[test]
    fn duplicate_heavy_input() {
        let original = pseudo_random(10_000, 2);
        let mut v = original.clone();

        let stats =
            sort_range_by_with_config(&mut v, 0, 10_000, &ManyPivotConfig::default(), u64::cmp)
                .unwrap();
        assert_sorted_permutation(&original, &v);
        assert!(stats.partitions <= 2, "{stats:?}");

        // Without the baseline sort taking over, every side is done after a single partition.
        let mut v = original.clone();
        let stats = sort_range_by_with_config(&mut v, 0, 10_000, &small_config(), u64::cmp).unwrap();
        assert_sorted_permutation(&original, &v);
        assert!(stats.partitions <= 4, "{stats:?}");
        assert_eq!(stats.baseline_sorts, 0);
    }

    #[test]
    fn all_equal_is_one_partition() {
        let mut v = vec![7u64; 20_000];
        let stats = sort_range_by_with_config(&mut v, 0, 20_000, &small_config(), u64::cmp).unwrap();

        assert!(v.iter().all(|&x| x == 7));
        assert_eq!(stats.partitions, 1);
        assert_eq!(stats.candidate_sets, 1);
    }

    #[test]
    fn windows_run_dry_and_rebuild() {
        let original = pseudo_random(20_000, 5_000);
        let mut v = original.clone();

        let stats = sort_range_by_with_config(&mut v, 0, 20_000, &small_config(), u64::cmp).unwrap();

        assert_sorted_permutation(&original, &v);
        assert!(stats.pivot_rebuilds() >= 1, "{stats:?}");
    }

    #[test]
    fn rebuild_threshold_zero_still_terminates() {
        let original = pseudo_random(5_000, 300);
        let mut v = original.clone();

        let config = small_config().with_rebuild_threshold(0);
        sort_range_by_with_config(&mut v, 0, 5_000, &config, u64::cmp).unwrap();

        assert_sorted_permutation(&original, &v);
    }

    #[test]
    fn sorts_only_the_sub_range() {
        let original = pseudo_random(3_000, 100_000);
        let mut v = original.clone();

        sort_range_by_with_config(&mut v, 1_000, 2_500, &small_config(), u64::cmp).unwrap();

        assert_eq!(v[..1_000], original[..1_000]);
        assert_eq!(v[2_500..], original[2_500..]);
        assert_sorted_permutation(&original[1_000..2_500], &v[1_000..2_500]);
    }

    #[test]
    fn range_errors_leave_input_untouched() {
        let original = pseudo_random(100, 10);
        let mut v = original.clone();

        assert_eq!(
            sort_range_by(&mut v, 50, 40, u64::cmp),
            Err(SortError::OutOfRange {
                from: 50,
                to: 40,
                len: 100
            })
        );
        assert!(sort_range_by(&mut v, 0, 101, u64::cmp).is_err());
        assert_eq!(v, original);
    }

    #[test]
    fn inconsistent_comparison_keeps_elements() {
        let original = pseudo_random(4_000, 1_000);
        let mut v = original.clone();

        // Finishing and panicking are both fine, losing elements is not.
        let mut flip = false;
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            sort_range_by_with_config(&mut v, 0, 4_000, &small_config(), |a: &u64, b: &u64| {
                flip = !flip;
                if flip {
                    b.cmp(a)
                } else {
                    a.cmp(b)
                }
            })
        }));

        v.sort_unstable();
        let mut expected = original;
        expected.sort_unstable();
        assert_eq!(v, expected);
    }
}
