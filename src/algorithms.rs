//! The sorting algorithm and its building blocks

pub mod insertionsort;
pub mod merging;
pub mod policy;
pub mod runs;
pub mod timsort;

/// A sorting algorithm working on `&mut [T]`
pub trait Sort {
    /// Whether equal elements keep their relative order
    const IS_STABLE: bool;

    /// Sort `slice` in ascending order
    fn sort<T: Ord>(slice: &mut [T]);
}

/// The stable sort of the rust std library, used as a baseline
#[derive(Debug, Clone, Copy)]
pub struct StdSort;

impl Sort for StdSort {
    const IS_STABLE: bool = true;

    fn sort<T: Ord>(slice: &mut [T]) {
        slice.sort();
    }
}
