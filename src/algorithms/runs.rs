//! Detection and normalization of natural runs

use super::insertionsort::insertion_sort_from;

/// A run occupying `slice[start..end]`, sorted in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
}

impl Run {
    /// The number of elements in the run
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the run is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The interval covered by the run
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Absorb the run `next` directly following `self`
    pub fn join(&mut self, next: Run) {
        assert!(self.end == next.start, "Only adjacent runs can be joined");

        self.end = next.end;
    }
}

/// Build the run starting at `start` and return it.
///
/// The natural run is either weakly ascending or strictly descending, the latter is reversed.
/// A natural run ending before `min_end` is extended up to `min_end` with insertion sort.
pub fn build_run<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    start: usize,
    min_end: usize,
    is_less: &mut F,
) -> Run {
    assert!(start < slice.len(), "Run has to start in bounds");

    let min_end = min_end.clamp(start + 1, slice.len());
    let (natural_len, decreasing) = natural_run(&slice[start..], is_less);
    let mut end = start + natural_len;

    if decreasing {
        slice[start..end].reverse();
    }

    if end < min_end {
        insertion_sort_from(&mut slice[start..min_end], natural_len, is_less);
        end = min_end;
    }

    Run { start, end }
}

/// Returns the length of the longest prefix of `slice` that is weakly increasing or strictly
/// decreasing, and whether it is decreasing
fn natural_run<T, F: FnMut(&T, &T) -> bool>(slice: &[T], is_less: &mut F) -> (usize, bool) {
    if slice.len() < 2 {
        return (slice.len(), false);
    }

    let decreasing = is_less(&slice[1], &slice[0]);
    let mut end = 2;

    if decreasing {
        while end < slice.len() && is_less(&slice[end], &slice[end - 1]) {
            end += 1;
        }
    } else {
        while end < slice.len() && !is_less(&slice[end], &slice[end - 1]) {
            end += 1;
        }
    }

    (end, decreasing)
}
