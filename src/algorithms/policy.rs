//! Merge policies deciding how runs are built and collapsed.
//!
//! A policy answers four questions, all as pure functions of run lengths:
//! how long a run has to be at least, whether two pending runs should be
//! merged, which pair of the top three pending runs should be merged, and
//! after how many consecutive wins a merge starts galloping.

/// The verdict of [`MergePolicy::what_merge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeChoice {
    /// Leave the stack as it is
    NoMerge,
    /// Merge the topmost run with the one below it
    MergeTopTwo,
    /// Merge the second and third run from the top
    MergeBottomTwo,
}

/// Decisions driving run construction and the collapse of the run stack.
///
/// In the queries below `len_x` is the length of the topmost run, `len_y` the
/// one below it and `len_z` the third from the top.
pub trait MergePolicy {
    /// Minimum length of a run for a slice of length `len`.
    ///
    /// The result is clamped into `1..=len` by the caller.
    fn min_run(&self, len: usize) -> usize;

    /// Whether the only two pending runs should be merged now
    fn need_merge(&self, len_x: usize, len_y: usize) -> bool;

    /// Which two of the top three pending runs should be merged, if any
    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice;

    /// Consecutive wins of one side after which merging switches to galloping.
    ///
    /// A threshold of zero is treated as one.
    fn galloping_threshold(&self) -> usize;
}

impl<P: MergePolicy + ?Sized> MergePolicy for &P {
    fn min_run(&self, len: usize) -> usize {
        (**self).min_run(len)
    }

    fn need_merge(&self, len_x: usize, len_y: usize) -> bool {
        (**self).need_merge(len_x, len_y)
    }

    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice {
        (**self).what_merge(len_x, len_y, len_z)
    }

    fn galloping_threshold(&self) -> usize {
        (**self).galloping_threshold()
    }
}

impl<P: MergePolicy + ?Sized> MergePolicy for Box<P> {
    fn min_run(&self, len: usize) -> usize {
        (**self).min_run(len)
    }

    fn need_merge(&self, len_x: usize, len_y: usize) -> bool {
        (**self).need_merge(len_x, len_y)
    }

    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice {
        (**self).what_merge(len_x, len_y, len_z)
    }

    fn galloping_threshold(&self) -> usize {
        (**self).galloping_threshold()
    }
}

/// The default `min_run` of [`DefaultPolicy`]
pub const DEFAULT_MIN_RUN: usize = 48;
/// The default galloping threshold of [`DefaultPolicy`]
pub const DEFAULT_GALLOPING_THRESHOLD: usize = 7;

/// The policy used by [`crate::sort`] and [`crate::sort_by`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl MergePolicy for DefaultPolicy {
    fn min_run(&self, _len: usize) -> usize {
        DEFAULT_MIN_RUN
    }

    fn need_merge(&self, len_x: usize, len_y: usize) -> bool {
        len_x >= len_y
    }

    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice {
        if len_x < len_y && len_x + len_y < len_z {
            MergeChoice::NoMerge
        } else if len_x < len_z {
            MergeChoice::MergeTopTwo
        } else {
            MergeChoice::MergeBottomTwo
        }
    }

    fn galloping_threshold(&self) -> usize {
        DEFAULT_GALLOPING_THRESHOLD
    }
}

/// `MIN_MERGE` of the classic timsort
pub const CLASSIC_MIN_MERGE: usize = 64;

/// The rules of the classic timsort: runs between `MIN_MERGE / 2` and
/// `MIN_MERGE` elements and the invariants `z > y + x` and `y > x`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicPolicy;

impl MergePolicy for ClassicPolicy {
    fn min_run(&self, mut len: usize) -> usize {
        // Keep the six most significant bits, add one if any of the shifted out bits is set
        let mut r = 0;
        while len >= CLASSIC_MIN_MERGE {
            r |= len & 1;
            len >>= 1;
        }
        len + r
    }

    fn need_merge(&self, len_x: usize, len_y: usize) -> bool {
        len_y <= len_x
    }

    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice {
        if len_z <= len_y + len_x {
            if len_z < len_x {
                MergeChoice::MergeBottomTwo
            } else {
                MergeChoice::MergeTopTwo
            }
        } else if len_y <= len_x {
            MergeChoice::MergeTopTwo
        } else {
            MergeChoice::NoMerge
        }
    }

    fn galloping_threshold(&self) -> usize {
        DEFAULT_GALLOPING_THRESHOLD
    }
}

/// Short runs derived from the bit pattern of the length and a high galloping threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct PopCountPolicy;

impl MergePolicy for PopCountPolicy {
    fn min_run(&self, len: usize) -> usize {
        (len & 0x1F) + len.count_ones() as usize
    }

    fn need_merge(&self, len_x: usize, len_y: usize) -> bool {
        len_x > len_y
    }

    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice {
        if len_x <= len_y && len_x + len_y <= len_z {
            MergeChoice::NoMerge
        } else if len_x < len_z {
            MergeChoice::MergeTopTwo
        } else {
            MergeChoice::MergeBottomTwo
        }
    }

    fn galloping_threshold(&self) -> usize {
        32
    }
}

/// Merges early and gallops immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct EagerPolicy;

impl MergePolicy for EagerPolicy {
    fn min_run(&self, len: usize) -> usize {
        (len & 0xF) + 2 * len.count_ones() as usize
    }

    fn need_merge(&self, len_x: usize, len_y: usize) -> bool {
        len_x + 2 > len_y
    }

    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice {
        if len_x <= len_y + 4 && len_x + len_y <= len_z + 8 {
            MergeChoice::NoMerge
        } else if len_x < len_z {
            MergeChoice::MergeTopTwo
        } else {
            MergeChoice::MergeBottomTwo
        }
    }

    fn galloping_threshold(&self) -> usize {
        1
    }
}

/// A deliberately bad policy with every comparison inverted.
///
/// Sorting stays correct, only the cost suffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvertedPolicy;

impl MergePolicy for InvertedPolicy {
    fn min_run(&self, len: usize) -> usize {
        PopCountPolicy.min_run(len)
    }

    fn need_merge(&self, len_x: usize, len_y: usize) -> bool {
        len_x < len_y
    }

    fn what_merge(&self, len_x: usize, len_y: usize, len_z: usize) -> MergeChoice {
        if len_x > len_y && len_x + len_y > len_z {
            MergeChoice::NoMerge
        } else if len_x > len_z {
            MergeChoice::MergeTopTwo
        } else {
            MergeChoice::MergeBottomTwo
        }
    }

    fn galloping_threshold(&self) -> usize {
        1
    }
}
