//! The timsort implementation

use super::merging;
use super::policy::{DefaultPolicy, MergeChoice, MergePolicy};
use super::runs::{Run, build_run};

/// The in-place timsort [`super::Sort`], parameterized by its [`MergePolicy`]
pub struct TimSort<P: MergePolicy + Default = DefaultPolicy>(std::marker::PhantomData<P>);

impl<P: MergePolicy + Default> super::Sort for TimSort<P> {
    const IS_STABLE: bool = true;

    fn sort<T: Ord>(slice: &mut [T]) {
        sort_with_policy(slice, &P::default());
    }
}

/// Sort `slice` with the [`DefaultPolicy`]
pub fn sort<T: Ord>(slice: &mut [T]) {
    sort_by_with_policy(slice, |a: &T, b: &T| a.lt(b), &DefaultPolicy);
}

/// Sort `slice` by `is_less` with the [`DefaultPolicy`]
pub fn sort_by<T, F: FnMut(&T, &T) -> bool>(slice: &mut [T], is_less: F) {
    sort_by_with_policy(slice, is_less, &DefaultPolicy);
}

/// Sort `slice` with the given `policy`
pub fn sort_with_policy<T: Ord, P: MergePolicy + ?Sized>(slice: &mut [T], policy: &P) {
    sort_by_with_policy(slice, |a: &T, b: &T| a.lt(b), policy);
}

/// Sort `slice` by `is_less` with the given `policy`.
///
/// `is_less` has to be a strict weak order for the result to be sorted. Otherwise the order of
/// the result is unspecified, but it is still a permutation of the input.
pub fn sort_by_with_policy<T, F: FnMut(&T, &T) -> bool, P: MergePolicy + ?Sized>(
    slice: &mut [T],
    mut is_less: F,
    policy: &P,
) {
    #[cfg(feature = "counters")]
    let mut is_less = |a: &T, b: &T| {
        crate::counters::COMPARISON_COUNTER.increase(1);
        is_less(a, b)
    };

    timsort(slice, &mut is_less, policy);
}

/// Actual timsort implementation
fn timsort<T, F: FnMut(&T, &T) -> bool, P: MergePolicy + ?Sized>(
    slice: &mut [T],
    is_less: &mut F,
    policy: &P,
) {
    let len = slice.len();
    if len < 2 {
        return;
    }

    let min_run = policy.min_run(len).clamp(1, len);
    let threshold = policy.galloping_threshold().max(1);

    let mut pending_runs: Vec<Run> = vec![];
    let mut start = 0;

    while start < len {
        let run = build_run(slice, start, start + min_run, is_less);
        start = run.end;

        pending_runs.push(run);
        merge_collapse(slice, &mut pending_runs, policy, threshold, is_less);
    }

    assert!(start == len);
    merge_force_collapse(slice, &mut pending_runs, threshold, is_less);
    assert!(pending_runs.len() == 1 && pending_runs[0].range() == (0..len));
}

/// Merge pending runs as long as the policy asks for it
fn merge_collapse<T, F: FnMut(&T, &T) -> bool, P: MergePolicy + ?Sized>(
    slice: &mut [T],
    pending_runs: &mut Vec<Run>,
    policy: &P,
    threshold: usize,
    is_less: &mut F,
) {
    // Every merge removes a run, so this terminates whatever the policy answers
    loop {
        let n = pending_runs.len();

        let index = match n {
            0 | 1 => break,
            2 if policy.need_merge(pending_runs[1].len(), pending_runs[0].len()) => 0,
            2 => break,
            _ => match policy.what_merge(
                pending_runs[n - 1].len(),
                pending_runs[n - 2].len(),
                pending_runs[n - 3].len(),
            ) {
                MergeChoice::NoMerge => break,
                MergeChoice::MergeTopTwo => n - 2,
                MergeChoice::MergeBottomTwo => n - 3,
            },
        };

        merge_at(slice, pending_runs, index, threshold, is_less);
    }
}

/// Merge the topmost runs until a single run is left
fn merge_force_collapse<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    pending_runs: &mut Vec<Run>,
    threshold: usize,
    is_less: &mut F,
) {
    while pending_runs.len() > 1 {
        let index = pending_runs.len() - 2;
        merge_at(slice, pending_runs, index, threshold, is_less);
    }
}

/// Merge the run at `index` with the run following it
fn merge_at<T, F: FnMut(&T, &T) -> bool>(
    slice: &mut [T],
    pending_runs: &mut Vec<Run>,
    index: usize,
    threshold: usize,
    is_less: &mut F,
) {
    let stack_size = pending_runs.len();
    assert!(stack_size >= 2);
    assert!(index == stack_size - 2 || index == stack_size - 3);

    let right = pending_runs.remove(index + 1);
    let left = &mut pending_runs[index];

    merging::merge(
        &mut slice[left.start..right.end],
        left.len(),
        threshold,
        is_less,
    );

    left.join(right);
}
