//! Stable three lane merge sort.
//!
//! A range is split into three parts of `len / 3`, `len / 3` and the rest, each part is sorted
//! recursively and the three sorted runs are merged in a single pass. Ranges of at most three
//! elements are sorted directly. See [`mode`] for how the merge picks the next element with one
//! comparison in the common case.
//!
//! All merges share one scratch buffer of `2 * (len / 3)` elements, reserved before anything is
//! moved.

use std::cmp::Ordering;
use std::mem::{self, MaybeUninit};

use crate::error::{check_range, SortError};
use crate::Sort;

mod merge;
pub mod mode;

use merge::merge_three;

sort_impl!("rust_three_lane_merge_stable", true);

/// Ranges up to this length are sorted without recursing.
const SMALL_SORT_LEN: usize = 3;

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

#[inline]
pub fn sort_range_by<T, F>(v: &mut [T], from: usize, to: usize, mut compare: F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    check_range(from, to, v.len())?;
    let v = &mut v[from..to];

    // Sorting has no meaningful behavior on zero-sized types.
    if mem::size_of::<T>() == 0 {
        return Ok(());
    }

    let len = v.len();
    if len <= SMALL_SORT_LEN {
        sort_small(v, &mut compare);
        return Ok(());
    }

    let mut buf: Vec<T> = Vec::new();
    buf.try_reserve_exact(scratch_len(len))?;
    tracing::trace!(len, scratch = buf.capacity(), "three lane merge sort");

    merge_sort(v, buf.spare_capacity_mut(), &mut compare);

    Ok(())
}

/// Merges the sorted runs `v[..mid1]`, `v[mid1..mid2]` and `v[mid2..]` in place, equal elements
/// keep their input order.
///
/// Any of the runs may be empty. Fails with [`SortError::OutOfRange`] unless
/// `mid1 <= mid2 <= v.len()`, and with [`SortError::Alloc`] if the `mid2` elements of scratch
/// space can't be reserved.
pub fn merge_three_by<T, F>(
    v: &mut [T],
    mid1: usize,
    mid2: usize,
    mut compare: F,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    check_range(mid1, mid2, v.len())?;

    if mem::size_of::<T>() == 0 || mid2 == 0 {
        return Ok(());
    }

    let mut buf: Vec<T> = Vec::new();
    buf.try_reserve_exact(mid2)?;
    merge_three(v, mid1, mid2, buf.spare_capacity_mut(), &mut compare);

    Ok(())
}

/// Scratch space needed to sort `len` elements, the first two runs of the outermost merge.
#[inline]
pub fn scratch_len(len: usize) -> usize {
    2 * (len / 3)
}

fn merge_sort<T, F>(v: &mut [T], scratch: &mut [MaybeUninit<T>], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len <= SMALL_SORT_LEN {
        sort_small(v, compare);
        return;
    }

    let gap = len / 3;
    let (mid1, mid2) = (gap, 2 * gap);

    merge_sort(&mut v[..mid1], scratch, compare);
    merge_sort(&mut v[mid1..mid2], scratch, compare);
    merge_sort(&mut v[mid2..], scratch, compare);

    merge_three(v, mid1, mid2, scratch, compare);
}

/// Stable sort of up to three elements, only strictly smaller elements move forward.
fn sort_small<T, F>(v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(v.len() <= SMALL_SORT_LEN);

    if v.len() < 2 {
        return;
    }

    if compare(&v[1], &v[0]) == Ordering::Less {
        v.swap(0, 1);
    }

    if v.len() == 3 && compare(&v[2], &v[1]) == Ordering::Less {
        v.swap(1, 2);
        if compare(&v[1], &v[0]) == Ordering::Less {
            v.swap(0, 1);
        }
    }
}
