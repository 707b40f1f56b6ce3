//! The standard library's stable sort, kept as the reference point for benchmarks.

use std::cmp::Ordering;

use crate::error::{check_range, SortError};

sort_impl!("rust_std_stable", true);

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    v.sort();
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    v.sort_by(compare);
}

#[inline]
pub fn sort_range_by<T, F>(v: &mut [T], from: usize, to: usize, compare: F) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    check_range(from, to, v.len())?;
    sort_by(&mut v[from..to], compare);

    Ok(())
}
