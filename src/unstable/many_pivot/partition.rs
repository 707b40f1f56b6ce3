use std::cmp::Ordering;

/// Three way partition of `v` around `pivot`.
///
/// Returns `(lt, gt)` such that `v[..lt] < pivot`, `v[lt..gt] == pivot` and `v[gt..] > pivot`.
/// `pivot` must not alias an element of `v`, the candidates are owned clones so it never does.
///
/// Elements equal to the pivot are parked at both ends while scanning and swapped into the middle
/// afterwards, so they are compared exactly once.
pub(crate) fn partition_three_way<T, F>(v: &mut [T], pivot: &T, compare: &mut F) -> (usize, usize)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();

    // +-------------+-------------+---------+-------------+-------------+
    // | == pivot    | < pivot     |    ?    | > pivot     | == pivot    |
    // +-------------+-------------+---------+-------------+-------------+
    // ^             ^             ^         ^             ^             ^
    // 0         eq_left         left      right       eq_right         len
    let mut eq_left = 0;
    let mut left = 0;
    let mut right = len;
    let mut eq_right = len;

    loop {
        while left < right {
            match compare(&v[left], pivot) {
                Ordering::Less => {}
                Ordering::Equal => {
                    v.swap(eq_left, left);
                    eq_left += 1;
                }
                Ordering::Greater => break,
            }
            left += 1;
        }

        if left == right {
            break;
        }

        // v[left] > pivot. Every element is compared once, even if the comparison is inconsistent.
        while left + 1 < right {
            match compare(&v[right - 1], pivot) {
                Ordering::Greater => {}
                Ordering::Equal => {
                    eq_right -= 1;
                    v.swap(right - 1, eq_right);
                }
                Ordering::Less => break,
            }
            right -= 1;
        }

        if left + 1 == right {
            right = left;
            break;
        }

        // v[left] > pivot and v[right - 1] < pivot.
        v.swap(left, right - 1);
        left += 1;
        right -= 1;
    }

    let lt = left - eq_left;
    let gt = right + (len - eq_right);

    // Move the parked equal elements next to each other. Only the shorter of the two blocks on
    // each side needs to move.
    let (head, _) = v.split_at_mut(left);
    swap_blocks(head, eq_left);

    let (_, tail) = v.split_at_mut(right);
    let greater_len = eq_right - right;
    swap_blocks(tail, greater_len);

    (lt, gt)
}

/// Exchanges the block `v[..mid]` with `v[mid..]` as far as order within each block doesn't
/// matter: afterwards `v[..len - mid]` holds the elements of the second block and `v[len - mid..]`
/// those of the first.
fn swap_blocks<T>(v: &mut [T], mid: usize) {
    let len = v.len();
    let count = mid.min(len - mid);

    let (front, back) = v.split_at_mut(len - count);
    front[..count].swap_with_slice(back);
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn check_postcondition(v: &[i32], pivot: i32, lt: usize, gt: usize) {
        assert!(lt <= gt && gt <= v.len());
        assert!(v[..lt].iter().all(|&x| x < pivot), "{v:?} lt: {lt}");
        assert!(v[lt..gt].iter().all(|&x| x == pivot), "{v:?} {lt}..{gt}");
        assert!(v[gt..].iter().all(|&x| x > pivot), "{v:?} gt: {gt}");
    }

    #[test]
    fn meeting_on_equal_element() {
        let mut v = [3, 5, 7];
        let (lt, gt) = partition_three_way(&mut v, &5, &mut i32::cmp);

        assert_eq!((lt, gt), (1, 2));
        assert_eq!(v, [3, 5, 7]);
    }

    #[test]
    fn equal_blocks_at_both_ends() {
        let mut v = [5, 5, 9, 1, 5, 8, 2, 5, 5, 5];
        let (lt, gt) = partition_three_way(&mut v, &5, &mut i32::cmp);

        check_postcondition(&v, 5, lt, gt);
        assert_eq!((lt, gt), (2, 8));
    }

    #[test]
    fn pivot_absent() {
        let mut v = [9, 1, 8, 2, 7, 3];
        let (lt, gt) = partition_three_way(&mut v, &5, &mut i32::cmp);

        check_postcondition(&v, 5, lt, gt);
        assert_eq!(lt, gt);
    }

    #[test]
    fn all_equal_and_empty() {
        let mut v = [4; 17];
        assert_eq!(partition_three_way(&mut v, &4, &mut i32::cmp), (0, 17));

        let mut empty: [i32; 0] = [];
        assert_eq!(partition_three_way(&mut empty, &4, &mut i32::cmp), (0, 0));
    }

    #[test]
    fn swap_blocks_moves_shorter_side() {
        let mut v = [0, 0, 1, 1, 1, 1, 1];
        swap_blocks(&mut v, 2);
        assert_eq!(v, [1, 1, 1, 1, 1, 0, 0]);

        let mut v = [0, 0, 0, 0, 1];
        swap_blocks(&mut v, 4);
        assert_eq!(v, [1, 0, 0, 0, 0]);

        let mut v = [0, 0];
        swap_blocks(&mut v, 2);
        assert_eq!(v, [0, 0]);
    }

    proptest! {
        #[test]
        fn partition_postcondition(
            mut v in proptest::collection::vec(0i32..12, 0..200),
            pivot in 0i32..12,
        ) {
            let mut expected = v.clone();
            expected.sort_unstable();

            let (lt, gt) = partition_three_way(&mut v, &pivot, &mut i32::cmp);
            check_postcondition(&v, pivot, lt, gt);

            v.sort_unstable();
            prop_assert_eq!(v, expected);
        }
    }
}
