#![forbid(unsafe_code)]

//! Reorder primitives used by drop targets.
//!
//! Every index argument is a *desired* position and is clamped into range
//! rather than rejected. Drop-target hit testing is approximate, so these
//! operators never panic on an out-of-range index.
//!
//! # Invariants
//!
//! 1. [`move_within`] yields a permutation of its input with one element
//!    relocated, and never leaves a transient hole in the slice.
//! 2. [`transfer_between`] conserves the total element count across both
//!    sequences; the moved element lives in exactly one of them afterward.
//! 3. [`copy_between`] never touches the source.
//! 4. An empty source is always a no-op.

use crate::geometry::clamp;

/// What a reorder operator did, with the indices after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Nothing changed (empty source, or source equals destination).
    Unchanged,
    /// One element was relocated, transferred, or copied.
    Moved { from: usize, to: usize },
}

impl ReorderOutcome {
    /// Whether any sequence was mutated.
    #[inline]
    #[must_use]
    pub const fn is_moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Move the element at `from` to `to` within one sequence.
///
/// Both indices are clamped to `[0, len - 1]`. Elements between the two
/// positions shift by one slot toward `from`.
///
/// ```
/// use dragline_core::reorder::move_within;
///
/// let mut items = vec!['a', 'b', 'c', 'd'];
/// move_within(&mut items, 0, 2);
/// assert_eq!(items, ['b', 'c', 'a', 'd']);
/// ```
pub fn move_within<T>(items: &mut [T], from: usize, to: usize) -> ReorderOutcome {
    let Some(last) = items.len().checked_sub(1) else {
        return ReorderOutcome::Unchanged;
    };
    let from = clamp(from, 0, last);
    let to = clamp(to, 0, last);

    if from == to {
        return ReorderOutcome::Unchanged;
    }

    // Rotating the covered window shifts every element by one slot while the
    // slice stays fully populated.
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
    ReorderOutcome::Moved { from, to }
}

/// Remove the element at `from` in `source` and insert it at `to` in `target`.
///
/// `from` is clamped to `[0, source.len() - 1]`; `to` is clamped to
/// `[0, target.len()]` so that inserting at the end is allowed.
///
/// ```
/// use dragline_core::reorder::transfer_between;
///
/// let mut source = vec!['a', 'b', 'c'];
/// let mut target = Vec::new();
/// transfer_between(&mut source, &mut target, 1, 0);
/// assert_eq!(source, ['a', 'c']);
/// assert_eq!(target, ['b']);
/// ```
pub fn transfer_between<T>(
    source: &mut Vec<T>,
    target: &mut Vec<T>,
    from: usize,
    to: usize,
) -> ReorderOutcome {
    let Some(last) = source.len().checked_sub(1) else {
        return ReorderOutcome::Unchanged;
    };
    let from = clamp(from, 0, last);
    let to = clamp(to, 0, target.len());

    let item = source.remove(from);
    target.insert(to, item);
    ReorderOutcome::Moved { from, to }
}

/// Insert a copy of the element at `from` in `source` at `to` in `target`.
///
/// `to` is clamped to `[0, target.len()]`. `from` is clamped to
/// `[0, source.len() - 1]` as well, so an out-of-range source index copies
/// the last element instead of reading past the end.
pub fn copy_between<T: Clone>(
    source: &[T],
    target: &mut Vec<T>,
    from: usize,
    to: usize,
) -> ReorderOutcome {
    let Some(last) = source.len().checked_sub(1) else {
        return ReorderOutcome::Unchanged;
    };
    let from = clamp(from, 0, last);
    let to = clamp(to, 0, target.len());

    target.insert(to, source[from].clone());
    ReorderOutcome::Moved { from, to }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- move_within ---

    #[test]
    fn move_forward() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        let outcome = move_within(&mut items, 0, 2);
        assert_eq!(items, ['b', 'c', 'a', 'd']);
        assert_eq!(outcome, ReorderOutcome::Moved { from: 0, to: 2 });
    }

    #[test]
    fn move_backward() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_within(&mut items, 3, 1);
        assert_eq!(items, ['a', 'd', 'b', 'c']);
    }

    #[test]
    fn move_to_same_index_is_noop() {
        let mut items = vec![1, 2, 3];
        assert_eq!(move_within(&mut items, 1, 1), ReorderOutcome::Unchanged);
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn move_clamps_destination() {
        let mut items = vec![1, 2, 3];
        let outcome = move_within(&mut items, 0, 99);
        assert_eq!(items, [2, 3, 1]);
        assert_eq!(outcome, ReorderOutcome::Moved { from: 0, to: 2 });
    }

    #[test]
    fn move_clamps_source() {
        let mut items = vec![1, 2, 3];
        move_within(&mut items, 50, 0);
        assert_eq!(items, [3, 1, 2]);
    }

    #[test]
    fn move_both_out_of_range_collapses_to_noop() {
        let mut items = vec![1, 2, 3];
        assert_eq!(move_within(&mut items, 10, 20), ReorderOutcome::Unchanged);
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn move_on_empty_is_noop() {
        let mut items: Vec<u8> = Vec::new();
        assert_eq!(move_within(&mut items, 0, 3), ReorderOutcome::Unchanged);
        assert!(items.is_empty());
    }

    // --- transfer_between ---

    #[test]
    fn transfer_into_empty_target() {
        let mut source = vec!['a', 'b', 'c'];
        let mut target = Vec::new();
        let outcome = transfer_between(&mut source, &mut target, 1, 0);
        assert_eq!(source, ['a', 'c']);
        assert_eq!(target, ['b']);
        assert_eq!(outcome, ReorderOutcome::Moved { from: 1, to: 0 });
    }

    #[test]
    fn transfer_appends_when_destination_past_end() {
        let mut source = vec![1, 2];
        let mut target = vec![10, 20];
        let outcome = transfer_between(&mut source, &mut target, 0, 100);
        assert_eq!(source, [2]);
        assert_eq!(target, [10, 20, 1]);
        assert_eq!(outcome, ReorderOutcome::Moved { from: 0, to: 2 });
    }

    #[test]
    fn transfer_clamps_source_index() {
        let mut source = vec![1, 2, 3];
        let mut target = vec![];
        transfer_between(&mut source, &mut target, 7, 0);
        assert_eq!(source, [1, 2]);
        assert_eq!(target, [3]);
    }

    #[test]
    fn transfer_from_empty_source_is_noop() {
        let mut source: Vec<i32> = Vec::new();
        let mut target = vec![1];
        assert_eq!(
            transfer_between(&mut source, &mut target, 0, 0),
            ReorderOutcome::Unchanged
        );
        assert!(source.is_empty());
        assert_eq!(target, [1]);
    }

    // --- copy_between ---

    #[test]
    fn copy_leaves_source_untouched() {
        let source = vec!["x", "y", "z"];
        let mut target = vec!["a"];
        let outcome = copy_between(&source, &mut target, 2, 0);
        assert_eq!(source, ["x", "y", "z"]);
        assert_eq!(target, ["z", "a"]);
        assert_eq!(outcome, ReorderOutcome::Moved { from: 2, to: 0 });
    }

    #[test]
    fn copy_clamps_destination() {
        let source = vec![5];
        let mut target = vec![1, 2];
        copy_between(&source, &mut target, 0, 9);
        assert_eq!(target, [1, 2, 5]);
    }

    #[test]
    fn copy_out_of_range_source_copies_last() {
        let source = vec![1, 2, 3];
        let mut target = Vec::new();
        let outcome = copy_between(&source, &mut target, 40, 0);
        assert_eq!(target, [3]);
        assert_eq!(outcome, ReorderOutcome::Moved { from: 2, to: 0 });
    }

    #[test]
    fn copy_from_empty_source_is_noop() {
        let source: Vec<i32> = Vec::new();
        let mut target = vec![1];
        assert_eq!(
            copy_between(&source, &mut target, 0, 0),
            ReorderOutcome::Unchanged
        );
        assert_eq!(target, [1]);
    }

    #[test]
    fn outcome_reports_mutation() {
        assert!(ReorderOutcome::Moved { from: 0, to: 1 }.is_moved());
        assert!(!ReorderOutcome::Unchanged.is_moved());
    }
}
