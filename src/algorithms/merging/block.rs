//! Block merging of two runs consisting of whole blocks

use super::{Scratch, galloping};

/// Merge the sorted runs `slice[..mid]` and `slice[mid..]`, both made of blocks of `block_len`
/// elements.
///
/// The blocks are selection sorted by their first element, left blocks first among equal
/// heads. Afterwards neighbouring blocks stemming from different runs are merged pairwise
/// through `scratch`, which needs to hold at least `block_len` elements.
pub fn merge_blocks<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    block_len: usize,
    scratch: &mut Scratch<'_, T>,
    threshold: usize,
    is_less: &mut F,
) {
    assert!(block_len > 0 && block_len <= scratch.len());
    assert!(
        mid % block_len == 0 && slice.len() % block_len == 0,
        "Runs need to consist of whole blocks"
    );

    let left_blocks = mid / block_len;

    let origins = sort_blocks(slice, block_len, is_less);

    let mut fragment_start = 0;
    let mut fragment_left = origins[0] < left_blocks;

    for (block, &origin) in origins.iter().enumerate().skip(1) {
        let block_start = block * block_len;
        let block_end = block_start + block_len;
        let block_left = origin < left_blocks;

        if block_left == fragment_left {
            // Nothing from the other run fits before the next block, the fragment is in place
            fragment_start = block_start;
            continue;
        }

        let (remaining, remaining_is_fragment) = merge_fragment(
            &mut slice[fragment_start..block_end],
            block_start - fragment_start,
            fragment_left,
            scratch,
            threshold,
            is_less,
        );

        fragment_start = block_end - remaining;
        if !remaining_is_fragment {
            fragment_left = block_left;
        }
    }
}

/// Selection sort the blocks by `(head, original position)` and return the original position
/// of each block
fn sort_blocks<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    block_len: usize,
    is_less: &mut F,
) -> Vec<usize> {
    let block_count = slice.len() / block_len;
    let mut origins: Vec<usize> = (0..block_count).collect();

    for block in 0..block_count {
        let mut min = block;

        for candidate in block + 1..block_count {
            let candidate_head = &slice[candidate * block_len];
            let min_head = &slice[min * block_len];

            if is_less(candidate_head, min_head)
                || (!is_less(min_head, candidate_head) && origins[candidate] < origins[min])
            {
                min = candidate;
            }
        }

        if min != block {
            let (head, tail) = slice.split_at_mut(min * block_len);
            head[block * block_len..(block + 1) * block_len]
                .swap_with_slice(&mut tail[..block_len]);
            origins.swap(block, min);
        }
    }

    origins
}

/// Merge the fragment `slice[..mid]` with the block `slice[mid..]`.
///
/// Returns the length of the tail that may still interleave with later blocks and whether it
/// stems from the fragment.
fn merge_fragment<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    fragment_left: bool,
    scratch: &mut Scratch<'_, T>,
    threshold: usize,
    is_less: &mut F,
) -> (usize, bool) {
    if fragment_left {
        merge_pair(slice, mid, scratch, threshold, is_less)
    } else {
        // Elements of the left run have to win ties, the fragment acts as left run here
        merge_pair(slice, mid, scratch, threshold, &mut |a: &T, b: &T| {
            !is_less(b, a)
        })
    }
}

/// Merge `slice[..mid]` with `slice[mid..]`, returning the length of the merged tail that
/// follows the last element of the other run and whether it stems from `slice[..mid]`
fn merge_pair<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    scratch: &mut Scratch<'_, T>,
    threshold: usize,
    is_less: &mut F,
) -> (usize, bool) {
    let len = slice.len();
    let (left, right) = slice.split_at(mid);
    let (left_last, right_last) = (&left[mid - 1], &right[len - mid - 1]);

    let (remaining, from_left) = if is_less(right_last, left_last) {
        let count = mid - left.partition_point(|x| !is_less(right_last, x));
        (count, true)
    } else {
        let count = right.len() - right.partition_point(|y| is_less(y, left_last));
        (count, false)
    };

    galloping::merge(slice, mid, scratch, threshold, is_less);

    // Inconsistent orders must not leave an empty tail
    (remaining.max(1), from_left)
}
