//! Insertion sort used for extending short runs and for merging tiny regions

/// Sort `slice` using insertion sort, assuming that `slice[..offset]` is already in order.
///
/// Elements are moved by adjacent swaps only and an element is never moved past an equal one,
/// so the sort is stable.
pub fn insertion_sort_from<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    offset: usize,
    is_less: &mut F,
) {
    assert!(
        offset <= slice.len(),
        "Offset needs to be in bounds"
    );

    for i in offset.max(1)..slice.len() {
        for j in (0..i).rev() {
            if is_less(&slice[j + 1], &slice[j]) {
                slice.swap(j + 1, j);
            } else {
                break;
            }
        }
    }
}
