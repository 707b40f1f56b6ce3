use std::cmp::Ordering;
use std::mem::{self, MaybeUninit};
use std::ptr;

use super::mode::{Lane, Mode, Rank, Transition};

/// Merges the sorted runs `v[..mid1]`, `v[mid1..mid2]` and `v[mid2..]` into one sorted run.
///
/// The first two runs are moved into `scratch`, the third one is consumed in place from the
/// front. Equal elements keep their input order. Any of the runs may be empty.
///
/// Panics if `mid1 <= mid2 <= v.len()` doesn't hold or `scratch` is shorter than `mid2`.
pub(crate) fn merge_three<T, F>(
    v: &mut [T],
    mid1: usize,
    mid2: usize,
    scratch: &mut [MaybeUninit<T>],
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    assert!(mid1 <= mid2 && mid2 <= len && scratch.len() >= mid2);

    if mem::size_of::<T>() == 0 {
        return;
    }

    // Ranking the initial heads happens before anything moves, a panic in `compare` here leaves
    // `v` untouched.
    let mut mode = match initial_mode(v, mid1, mid2, compare) {
        Some(mode) if !mode.is_drain() => mode,
        // At most one run holds elements, it is already in place.
        _ => return,
    };

    let v_ptr = v.as_mut_ptr();
    let buf = scratch.as_mut_ptr() as *mut T;

    // The merged output is written from the front of `v`. `dest` never catches up with the head
    // of the third run: what is left of the first two runs exactly fills the gap between them.
    //
    // Intermediate state of the process is tracked by `hole`. If `compare` panics, or once only
    // one of the first two runs is left, dropping `hole` copies what remains of them into `v`. So
    // `v` holds every object it initially held exactly once, no matter how the merge ends.
    //
    // SAFETY: `scratch` holds at least `mid2` elements and doesn't overlap `v`. All pointers
    // below stay within `v` or the first `mid2` slots of `scratch`. `T` is not zero sized, so
    // pointer equality tells whether a run is exhausted.
    unsafe {
        ptr::copy_nonoverlapping(v_ptr, buf, mid2);

        let mut hole = MergeHole {
            first: buf,
            first_end: buf.add(mid1),
            second: buf.add(mid1),
            second_end: buf.add(mid2),
            dest: v_ptr,
        };
        let mut third = v_ptr.add(mid2);
        let third_end = v_ptr.add(len);

        loop {
            let lane = mode.head();

            let src = match lane {
                Lane::First => &mut hole.first,
                Lane::Second => &mut hole.second,
                Lane::Third => &mut third,
            };
            ptr::copy_nonoverlapping(get_and_increment(src), get_and_increment(&mut hole.dest), 1);

            let exhausted = match lane {
                Lane::First => hole.first == hole.first_end,
                Lane::Second => hole.second == hole.second_end,
                Lane::Third => third == third_end,
            };

            if exhausted {
                mode = mode.exhausted();
                if mode.is_drain() {
                    break;
                }
                continue;
            }

            let runner_up = match mode.runner_up() {
                Some(runner_up) => runner_up,
                None => break,
            };

            let refilled = &*head_ptr(lane, &hole, third);
            let rank = Rank::of(
                compare(refilled, &*head_ptr(runner_up, &hole, third)),
                lane,
                runner_up,
            );

            mode = match mode.after_runner_up(rank) {
                Transition::Settled(next) => next,
                Transition::CompareLast(last) => {
                    let rank = Rank::of(
                        compare(refilled, &*head_ptr(last, &hole, third)),
                        lane,
                        last,
                    );
                    mode.after_last(rank)
                }
            };
        }

        // Dropping `hole` moves the rest of the first or second run into place. The rest of the
        // third run already is where it belongs.
        drop(hole);
    }
}

/// Ranks the heads of the non-empty runs. Lanes are inserted in lane order, an equal head stays
/// behind the heads of earlier lanes.
fn initial_mode<T, F>(v: &[T], mid1: usize, mid2: usize, compare: &mut F) -> Option<Mode>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let starts = [0, mid1, mid2];
    let ends = [mid1, mid2, v.len()];
    let lanes = [Lane::First, Lane::Second, Lane::Third];

    let mut order = [Lane::First; 3];
    let mut count = 0;

    for (i, &lane) in lanes.iter().enumerate() {
        if starts[i] == ends[i] {
            continue;
        }

        let head = &v[starts[i]];
        let mut pos = count;
        while pos > 0 {
            let other = order[pos - 1];
            let other_head = &v[starts[other as usize]];
            if Rank::of(compare(head, other_head), lane, other) == Rank::Behind {
                break;
            }
            order[pos] = other;
            pos -= 1;
        }
        order[pos] = lane;
        count += 1;
    }

    Mode::from_lanes(&order[..count])
}

fn head_ptr<T>(lane: Lane, hole: &MergeHole<T>, third: *mut T) -> *const T {
    match lane {
        Lane::First => hole.first,
        Lane::Second => hole.second,
        Lane::Third => third,
    }
}

unsafe fn get_and_increment<T>(ptr: &mut *mut T) -> *mut T {
    let old = *ptr;
    *ptr = ptr.add(1);
    old
}

// When dropped, copies `first..first_end` followed by `second..second_end` into `dest..`.
struct MergeHole<T> {
    first: *mut T,
    first_end: *mut T,
    second: *mut T,
    second_end: *mut T,
    dest: *mut T,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: `T` is not a zero-sized type. Both ranges lie in the scratch buffer and `dest`
        // has room for exactly both of them before the unconsumed part of the third run.
        unsafe {
            let first_len = self.first_end.offset_from(self.first) as usize;
            ptr::copy_nonoverlapping(self.first, self.dest, first_len);

            let second_len = self.second_end.offset_from(self.second) as usize;
            ptr::copy_nonoverlapping(self.second, self.dest.add(first_len), second_len);
        }
    }
}
