//! In-place comparison sorts built around two ideas: many pre-selected pivots for a three-way
//! partitioning quicksort, and a three lane merge sort driven by a small merge automaton.
//!
//! Every algorithm lives in its own module and exposes the same surface: free functions `sort`,
//! `sort_by` and `sort_range_by`, plus a `SortImpl` type implementing [`Sort`], so they can be
//! swapped for one another in tests and benchmarks.

use std::cmp::Ordering;

pub use error::SortError;

/// Common contract of every sort in this crate.
pub trait Sort {
    fn name() -> String;

    /// Whether elements that compare equal keep their relative input order.
    fn is_stable() -> bool;

    /// Sorts `v[from..to]` in place, leaving the rest of `v` untouched.
    ///
    /// Fails with [`SortError::OutOfRange`] if `from > to` or `to > v.len()`, and with
    /// [`SortError::Alloc`] if scratch memory could not be reserved. In both cases no element has
    /// been moved.
    fn sort_range_by<T, F>(v: &mut [T], from: usize, to: usize, compare: F) -> Result<(), SortError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering;

    #[inline]
    fn sort<T>(v: &mut [T])
    where
        T: Ord + Clone,
    {
        Self::sort_by(v, T::cmp);
    }

    /// Sorts the whole slice. Panics if scratch memory can't be allocated, like the standard
    /// library sorts do.
    #[inline]
    fn sort_by<T, F>(v: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = v.len();
        if let Err(err) = Self::sort_range_by(v, 0, len, compare) {
            panic!("{}: {err}", Self::name());
        }
    }
}

macro_rules! sort_impl {
    ($name:expr, $stable:expr) => {
        pub struct SortImpl;

        impl $crate::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            fn is_stable() -> bool {
                $stable
            }

            #[inline]
            fn sort_range_by<T, F>(
                v: &mut [T],
                from: usize,
                to: usize,
                compare: F,
            ) -> Result<(), $crate::SortError>
            where
                T: Clone,
                F: FnMut(&T, &T) -> Ordering,
            {
                sort_range_by(v, from, to, compare)
            }
        }
    };
}

pub mod config;
pub mod error;
pub mod stable;
pub mod unstable;
