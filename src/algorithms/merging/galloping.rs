//! A galloping merge parking the shorter run in a [`Scratch`]

use super::{Scratch, gallop_prefix, gallop_suffix};

/// Merge the sorted runs `slice[..mid]` and `slice[mid..]`, using `scratch` to park the shorter
/// run.
///
/// Elements are only ever swapped, so `scratch` has to hold at least as many elements as the
/// shorter run and is restored to its original order afterwards. After `threshold` consecutive
/// wins of one run, the number of further elements it wins is searched with [`gallop_prefix`]
/// or [`gallop_suffix`] and they are moved as a batch.
pub fn merge<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    scratch: &mut Scratch<'_, T>,
    threshold: usize,
    is_less: &mut F,
) {
    let len = slice.len();
    assert!(mid <= len, "Split point needs to be in bounds");

    if mid == 0 || mid == len || !is_less(&slice[mid], &slice[mid - 1]) {
        return;
    }

    assert!(
        mid.min(len - mid) <= scratch.len(),
        "Scratch space needs to fit the shorter run"
    );

    let threshold = threshold.max(1);

    if mid <= len - mid {
        merge_low(slice, mid, scratch, threshold, is_less);
    } else {
        merge_high(slice, mid, scratch, threshold, is_less);
    }

    scratch.restore();
}

/// Merge front to back with the left run parked
fn merge_low<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    scratch: &mut Scratch<'_, T>,
    threshold: usize,
    is_less: &mut F,
) {
    let len = slice.len();
    scratch.park(&mut slice[..mid]);

    // The displaced elements always occupy `slice[out..right]`
    let (mut left, mut right, mut out) = (0, mid, 0);
    let (mut left_wins, mut right_wins) = (0, 0);

    while left < mid && right < len {
        if is_less(&slice[right], &scratch.slots[left]) {
            slice.swap(out, right);
            scratch.transit.rotate_left(1);
            out += 1;
            right += 1;

            left_wins = 0;
            right_wins += 1;

            if right_wins >= threshold {
                let count = gallop_prefix(&slice[right..], |x| is_less(x, &scratch.slots[left]));

                for _ in 0..count {
                    slice.swap(out, right);
                    out += 1;
                    right += 1;
                }
                let displaced = scratch.transit.len();
                scratch.transit.rotate_left(count % displaced);

                right_wins = 0;
            }
        } else {
            scratch.settle_front(left, &mut slice[out]);
            out += 1;
            left += 1;

            right_wins = 0;
            left_wins += 1;

            if left_wins >= threshold {
                let count =
                    gallop_prefix(&scratch.slots[left..mid], |x| !is_less(&slice[right], x));

                for _ in 0..count {
                    scratch.settle_front(left, &mut slice[out]);
                    out += 1;
                    left += 1;
                }

                left_wins = 0;
            }
        }
    }

    while left < mid {
        scratch.settle_front(left, &mut slice[out]);
        out += 1;
        left += 1;
    }
}

/// Merge back to front with the right run parked
fn merge_high<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    scratch: &mut Scratch<'_, T>,
    threshold: usize,
    is_less: &mut F,
) {
    let len = slice.len();
    scratch.park(&mut slice[mid..]);

    // The displaced elements always occupy `slice[left..out]`
    let (mut left, mut right, mut out) = (mid, len - mid, len);
    let (mut left_wins, mut right_wins) = (0, 0);

    while left > 0 && right > 0 {
        if is_less(&scratch.slots[right - 1], &slice[left - 1]) {
            slice.swap(out - 1, left - 1);
            scratch.transit.rotate_right(1);
            out -= 1;
            left -= 1;

            right_wins = 0;
            left_wins += 1;

            if left_wins >= threshold {
                let count =
                    gallop_suffix(&slice[..left], |x| is_less(&scratch.slots[right - 1], x));

                for _ in 0..count {
                    slice.swap(out - 1, left - 1);
                    out -= 1;
                    left -= 1;
                }
                let displaced = scratch.transit.len();
                scratch.transit.rotate_right(count % displaced);

                left_wins = 0;
            }
        } else {
            scratch.settle_back(right - 1, &mut slice[out - 1]);
            out -= 1;
            right -= 1;

            left_wins = 0;
            right_wins += 1;

            if right_wins >= threshold {
                let count =
                    gallop_suffix(&scratch.slots[..right], |x| !is_less(x, &slice[left - 1]));

                for _ in 0..count {
                    scratch.settle_back(right - 1, &mut slice[out - 1]);
                    out -= 1;
                    right -= 1;
                }

                right_wins = 0;
            }
        }
    }

    while right > 0 {
        scratch.settle_back(right - 1, &mut slice[out - 1]);
        out -= 1;
        right -= 1;
    }
}
