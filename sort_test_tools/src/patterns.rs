//! Input patterns for testing and benchmarking sorts, all `i32`.
//!
//! Everything random is derived from one seed per process, so a failing run can be repeated by
//! setting `OVERRIDE_SEED` to the seed the harness printed.

use std::cmp::Reverse;
use std::env;
use std::ops::Range;
use std::str::FromStr;
use std::sync::Mutex;

use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;

use zipf::ZipfDistribution;

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = seeded_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<Uniform<i32>>,
{
    // :.:.:.::

    let dist: Uniform<i32> = range.into();
    let mut rng = seeded_rng();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

/// `len` values drawn from `distinct` different ones. `distinct == 2` is the classic stress case
/// for three way partitioning.
pub fn random_distinct(len: usize, distinct: u32) -> Vec<i32> {
    // ::.::..:
    // ::::::::

    let max = distinct.clamp(1, i32::MAX as u32) as i32 - 1;
    random_uniform(len, 0..=max)
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law

    if len == 0 {
        return Vec::new();
    }

    let dist = match ZipfDistribution::new(len, exponent) {
        Ok(dist) => dist,
        Err(()) => panic!("invalid zipf parameters len: {len} exponent: {exponent}"),
    };
    let mut rng = seeded_rng();

    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    //  ^      ^
    //  |      |
    // sorted  |
    //     unsorted

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len.min(len)].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    saws(len, saw_count, |_| Direction::Ascending)
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    saws(len, saw_count, |_| Direction::Descending)
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    let directions = random_uniform(saw_count.max(1) + 1, 0..=1);
    saws(len, saw_count, |i| Direction::from_bit(directions[i]))
}

pub fn saw_mixed_range(len: usize, range: Range<usize>) -> Vec<i32> {
    //     :.
    // :.  :::.    .::.      .:
    // :::.:::::..::::::..:.:::

    // Direction and length of each saw are random, lengths are taken from `range`.

    let mut vals = random(len);
    if len == 0 {
        return vals;
    }

    let max_chunks = len / range.start.max(1) + 1;
    let directions = random_uniform(max_chunks, 0..=1);
    let chunk_lens = random_uniform(max_chunks, (range.start as i32)..(range.end as i32));

    let mut start = 0;
    for (&chunk_len, &direction) in chunk_lens.iter().zip(&directions) {
        if start >= len {
            break;
        }

        let end = (start + chunk_len.max(1) as usize).min(len);
        Direction::from_bit(direction).apply(&mut vals[start..end]);
        start = end;
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random(len);
    let (first_half, second_half) = vals.split_at_mut(len / 2);
    Direction::Ascending.apply(first_half);
    Direction::Descending.apply(second_half);

    vals
}

/// Overwrites the default behavior so that each call to a random derived pattern yields new random
/// values.
///
/// By default `patterns::random(4)` will yield the same values per process invocation.
/// Benchmarks should call this.
pub fn use_random_seed_each_time() {
    let (seed_type, _) = get_or_init_seed_type_and_value();
    if seed_type == SeedType::ExternalOverride {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    *lock_seed() = Some((SeedType::RandomEachTime, 0));
}

pub fn random_init_seed() -> u64 {
    get_or_init_seed_type_and_value().1
}

// --- Private ---

#[derive(Copy, Clone)]
enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn from_bit(bit: i32) -> Self {
        if bit == 0 {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    fn apply(self, chunk: &mut [i32]) {
        match self {
            Direction::Ascending => chunk.sort_unstable(),
            Direction::Descending => chunk.sort_unstable_by_key(|&e| Reverse(e)),
        }
    }
}

/// Random values cut into `saw_count` chunks, each chunk sorted in the direction `direction_of`
/// picks for it.
fn saws(len: usize, saw_count: usize, direction_of: impl Fn(usize) -> Direction) -> Vec<i32> {
    let mut vals = random(len);
    if len == 0 {
        return vals;
    }

    let chunk_len = (len / saw_count.max(1)).max(1);
    for (i, chunk) in vals.chunks_mut(chunk_len).enumerate() {
        direction_of(i.min(saw_count)).apply(chunk);
    }

    vals
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum SeedType {
    RandomEachTime,
    RandomOncePerProcess,
    ExternalOverride,
}

static SEED_TYPE_AND_VALUE: Mutex<Option<(SeedType, u64)>> = Mutex::new(None);

fn lock_seed() -> std::sync::MutexGuard<'static, Option<(SeedType, u64)>> {
    // A panicking test must not take the seed down with it.
    SEED_TYPE_AND_VALUE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn get_or_init_seed_type_and_value() -> (SeedType, u64) {
    let (seed_type, seed_val) = *lock_seed().get_or_insert_with(|| {
        match env::var("OVERRIDE_SEED").ok().map(|seed| u64::from_str(seed.trim())) {
            Some(Ok(override_seed)) => (SeedType::ExternalOverride, override_seed),
            Some(Err(err)) => panic!("OVERRIDE_SEED is not a valid u64: {err}"),
            None => (SeedType::RandomOncePerProcess, thread_rng().gen()),
        }
    });

    if seed_type == SeedType::RandomEachTime {
        (SeedType::RandomEachTime, thread_rng().gen())
    } else {
        (seed_type, seed_val)
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}
