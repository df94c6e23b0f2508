//! In-place merging of two adjacent sorted runs.
//!
//! [`merge`] needs no buffer proportional to the input. It borrows about `sqrt(n)` elements
//! of the left run as scratch space, sorts the remaining blocks of both runs by their first
//! element and merges neighbouring blocks pairwise, parking elements in the scratch space
//! with [`galloping::merge`]. The borrowed elements are merged back by rotation at the end.

pub mod block;
pub mod galloping;
pub mod rotation;

use std::collections::VecDeque;

use super::insertionsort::insertion_sort_from;

/// Regions splitting into fewer blocks than this are merged with insertion sort
pub const MIN_BLOCKS: usize = 5;

/// Merge the sorted runs `slice[..mid]` and `slice[mid..]` in place.
///
/// The merge is stable: of two equal elements the one from the left run ends up first.
/// `threshold` is the number of consecutive wins of one run after which the pairwise merges
/// switch to galloping, zero is treated as one.
pub fn merge<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    threshold: usize,
    is_less: &mut F,
) {
    assert!(mid <= slice.len(), "Split point needs to be in bounds");

    if mid == 0 || mid == slice.len() || !is_less(&slice[mid], &slice[mid - 1]) {
        return;
    }

    // Elements of the left run not greater than the first right element and elements of the
    // right run not less than the last left element are already in place
    let start = slice[..mid].partition_point(|x| !is_less(&slice[mid], x));
    let end = mid + slice[mid..].partition_point(|x| is_less(x, &slice[mid - 1]));
    if start == mid || end == mid {
        return;
    }

    #[cfg(feature = "counters")]
    crate::counters::MERGE_SLICE_COUNTER.increase((end - start) as u64);

    merge_trimmed(&mut slice[start..end], mid - start, threshold.max(1), is_less);
}

/// Merge two non-empty runs whose ends are known to be out of order
fn merge_trimmed<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    mid: usize,
    threshold: usize,
    is_less: &mut F,
) {
    let len = slice.len();
    let block_len = len.isqrt();
    let block_count = len.div_ceil(block_len);

    if block_count < MIN_BLOCKS {
        insertion_sort_from(slice, mid, is_less);
        return;
    }

    if mid <= block_len || len - mid <= block_len {
        rotation::merge(slice, mid, is_less);
        return;
    }

    // The scratch space is chosen so that the rest of the left run is a whole number of blocks
    let scratch_len = block_len + (mid - block_len) % block_len;
    let left_len = mid - scratch_len;

    let (parked, rest) = slice.split_at_mut(scratch_len);
    let mut scratch = Scratch::new(parked);

    let tail_len = (rest.len() - left_len) % block_len;
    let body_len = rest.len() - tail_len;

    if left_len > 0 {
        block::merge_blocks(
            &mut rest[..body_len],
            left_len,
            block_len,
            &mut scratch,
            threshold,
            is_less,
        );
    }
    galloping::merge(rest, body_len, &mut scratch, threshold, is_less);

    rotation::merge(slice, scratch_len, is_less);
}

/// Elements of the slice temporarily used as scratch space.
///
/// Merging swaps run elements into the slots, which sends the original occupants travelling
/// through the merged region. Their way is tracked so [`Scratch::restore`] can put them back
/// into their original order.
#[derive(Debug)]
pub struct Scratch<'a, T> {
    slots: &'a mut [T],
    /// `origins[slot]` is the original slot of the element currently in `slot`
    origins: Vec<usize>,
    /// Original slots of the displaced elements inside the merged region, in positional order
    transit: VecDeque<usize>,
}

impl<'a, T> Scratch<'a, T> {
    /// Use `slots` as scratch space
    pub fn new(slots: &'a mut [T]) -> Self {
        let len = slots.len();

        Self {
            slots,
            origins: (0..len).collect(),
            transit: VecDeque::with_capacity(len),
        }
    }

    /// The number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Swap `slice` into the first slots and start tracking the displaced elements
    fn park(&mut self, slice: &mut [T]) {
        #[cfg(feature = "counters")]
        crate::counters::MERGE_SCRATCH_COUNTER.increase(slice.len() as u64);

        slice.swap_with_slice(&mut self.slots[..slice.len()]);
        self.transit.clear();
        self.transit.extend(0..slice.len());
    }

    /// Swap the run element in `slot` with `target`, the first displaced element in transit
    fn settle_front(&mut self, slot: usize, target: &mut T) {
        std::mem::swap(&mut self.slots[slot], target);
        self.origins[slot] = self
            .transit
            .pop_front()
            .expect("Every parked run element has a displaced counterpart");
    }

    /// Swap the run element in `slot` with `target`, the last displaced element in transit
    fn settle_back(&mut self, slot: usize, target: &mut T) {
        std::mem::swap(&mut self.slots[slot], target);
        self.origins[slot] = self
            .transit
            .pop_back()
            .expect("Every parked run element has a displaced counterpart");
    }

    /// Put every element back into its original slot
    pub fn restore(&mut self) {
        for slot in 0..self.slots.len() {
            while self.origins[slot] != slot {
                let target = self.origins[slot];
                self.slots.swap(slot, target);
                self.origins.swap(slot, target);
            }
        }
    }
}

/// Returns the length of the prefix of `slice` satisfying `pred`.
///
/// `pred` has to hold for a prefix of `slice` only. Probes indices `0, 1, 3, 7, ..` before
/// binary searching the last interval, so a short prefix costs few comparisons.
pub fn gallop_prefix<T>(slice: &[T], mut pred: impl FnMut(&T) -> bool) -> usize {
    let mut low = 0;
    let mut offset = 1;

    while offset <= slice.len() && pred(&slice[offset - 1]) {
        low = offset;
        offset *= 2;
    }

    let high = (offset - 1).min(slice.len());
    low + slice[low..high].partition_point(pred)
}

/// Returns the length of the suffix of `slice` satisfying `pred`, see [`gallop_prefix`]
pub fn gallop_suffix<T>(slice: &[T], mut pred: impl FnMut(&T) -> bool) -> usize {
    let len = slice.len();
    let mut low = 0;
    let mut offset = 1;

    while offset <= len && pred(&slice[len - offset]) {
        low = offset;
        offset *= 2;
    }

    let high = (offset - 1).min(len);
    high - slice[len - high..len - low].partition_point(|x| !pred(x))
}
