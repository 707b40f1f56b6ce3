use std::cmp::Ordering;

use crate::error::SortError;

/// Index of the `i`-th of `sample_size` evenly spaced samples in a range of length `len`.
///
/// Every sample sits half a bucket into its bucket, so repeatedly halving naturally aligned data
/// doesn't keep hitting the same positions. Computes `len * i / sample_size` without overflow for
/// any `len`, as long as `sample_size * sample_size` fits in `usize`.
#[inline]
pub(crate) fn sample_offset(len: usize, i: usize, sample_size: usize) -> usize {
    let (quot, rem) = (len / sample_size, len % sample_size);

    // `len / (2 * sample_size) == quot / 2`
    quot * i + (rem * i) / sample_size + quot / 2
}

/// Samples `v` and returns the distinct sampled values in strictly increasing order.
///
/// At most `min(sample_size, v.len())` values are returned, fewer if the sample contained
/// duplicates. The
/// candidate storage is reserved up front, so an allocation failure is reported before anything
/// has been cloned.
pub(crate) fn select_pivots<T, F>(
    v: &[T],
    sample_size: usize,
    compare: &mut F,
) -> Result<Vec<T>, SortError>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    let mut pivots = Vec::new();
    if len == 0 || sample_size == 0 {
        return Ok(pivots);
    }

    // More samples than elements would only read elements twice.
    let sample_size = sample_size.min(len);
    pivots.try_reserve_exact(sample_size)?;

    for i in 0..sample_size {
        let sample = &v[sample_offset(len, i, sample_size)];

        // Binary insertion, duplicates are dropped.
        if let Err(insert_pos) = pivots.binary_search_by(|probe| compare(probe, sample)) {
            pivots.insert(insert_pos, sample.clone());
        }
    }

    Ok(pivots)
}
