//! Merging by rotations, without any scratch space.
//!
//! Each element of the shorter run is rotated into place at once, so the cost is linear when
//! the shorter run has no more than about `sqrt(n)` elements.

use super::{gallop_prefix, gallop_suffix};

/// Merge the sorted runs `slice[..mid]` and `slice[mid..]` by rotating the elements of the
/// shorter run into place
pub fn merge<T, F: FnMut(&T, &T) -> bool>(slice: &mut [T], mid: usize, is_less: &mut F) {
    let len = slice.len();
    assert!(mid <= len, "Split point needs to be in bounds");

    if mid <= len - mid {
        let (mut start, mut mid) = (0, mid);

        while start < mid && mid < len {
            // Right elements strictly less than the left head move in front of it
            let count = gallop_prefix(&slice[mid..], |x| is_less(x, &slice[start]));

            if count > 0 {
                slice[start..mid + count].rotate_left(mid - start);
            }

            start += count + 1;
            mid += count;
        }
    } else {
        let (mut end, mut mid) = (len, mid);

        while 0 < mid && mid < end {
            // Left elements strictly greater than the last right element move behind it
            let count = gallop_suffix(&slice[..mid], |x| is_less(&slice[end - 1], x));

            if count > 0 {
                slice[mid - count..end].rotate_right(end - mid);
            }

            end -= count + 1;
            mid -= count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng as _;

    #[test]
    fn short_left_run() {
        let mut values = [3, 7, 0, 1, 2, 3, 4, 5, 6, 8, 9];
        merge(&mut values, 2, &mut |a, b| a < b);
        assert_eq!(values, [0, 1, 2, 3, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn short_right_run() {
        let mut values = [0, 1, 2, 3, 4, 5, 6, 8, 9, 3, 7];
        merge(&mut values, 9, &mut |a, b| a < b);
        assert_eq!(values, [0, 1, 2, 3, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn random_stable() {
        let mut rng = crate::test::test_rng();

        for run in 0..100 {
            let mut elements: Box<[_]> = crate::test::IndexedOrdered::map_iter(
                (0..300).map(|_| rng.random_range(0..20)),
            )
            .collect();
            let split = match run % 3 {
                0 => rng.random_range(0..=20),
                1 => rng.random_range(280..=300),
                _ => rng.random_range(0..=300),
            };
            elements[..split].sort();
            elements[split..].sort();

            merge(&mut elements, split, &mut |a, b| a < b);

            assert!(
                crate::test::IndexedOrdered::is_stable_sorted(&elements),
                "Run {run} with split {split} was not stable sorted"
            );
        }
    }
}
