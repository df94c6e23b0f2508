//! An adaptive, stable timsort that merges runs in place.
//!
//! Instead of allocating a buffer as large as the input, every merge borrows
//! roughly `sqrt(n)` elements of the slice itself as scratch space. How runs
//! are found and merged is controlled by a [`algorithms::policy::MergePolicy`].

pub mod algorithms;
pub mod counters;

#[cfg(test)]
mod test;

pub use algorithms::Sort;
pub use algorithms::policy::{
    ClassicPolicy, DefaultPolicy, EagerPolicy, InvertedPolicy, MergeChoice, MergePolicy,
    PopCountPolicy,
};
pub use algorithms::timsort::{TimSort, sort, sort_by, sort_by_with_policy, sort_with_policy};
