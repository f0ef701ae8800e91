//! Property-based invariant tests for the reorder primitives and `clamp`.
//!
//! 1. `clamp` always lands in range and is the identity inside it
//! 2. `move_within` yields a permutation with exactly one element relocated
//! 3. `move_within(seq, i, i)` is a no-op
//! 4. `transfer_between` conserves the total element count
//! 5. `copy_between` never alters the source
//! 6. No panics on arbitrary indices

use dragline_core::geometry::clamp;
use dragline_core::reorder::{ReorderOutcome, copy_between, move_within, transfer_between};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Distinct values so that positions can be identified after a reorder.
fn distinct_vec(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    (0..=max_len).prop_map(|len| (0..len as u32).collect())
}

fn index() -> impl Strategy<Value = usize> {
    0usize..64
}

// ═══════════════════════════════════════════════════════════════════════
// 1. clamp
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_result_in_range(v in -1000i64..1000, a in -500i64..500, b in -500i64..500) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let out = clamp(v, min, max);
        prop_assert!(out >= min && out <= max);
    }

    #[test]
    fn clamp_identity_inside_range(min in -500i64..0, max in 0i64..500, t in 0.0f64..=1.0) {
        let v = min + ((max - min) as f64 * t) as i64;
        prop_assert_eq!(clamp(v, min, max), v);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2-3. move_within
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn move_within_is_single_relocation(items in distinct_vec(32), from in index(), to in index()) {
        let original = items.clone();
        let mut moved = items;
        let outcome = move_within(&mut moved, from, to);

        let mut sorted = moved.clone();
        sorted.sort_unstable();
        prop_assert_eq!(&sorted, &original);

        match outcome {
            ReorderOutcome::Unchanged => prop_assert_eq!(&moved, &original),
            ReorderOutcome::Moved { from: clamped_from, to: clamped_to } => {
                let last = original.len() - 1;
                prop_assert_eq!(clamped_from, from.min(last));
                prop_assert_eq!(clamped_to, to.min(last));
                prop_assert_eq!(moved[clamped_to], original[clamped_from]);

                let mut expected = original.clone();
                let item = expected.remove(clamped_from);
                expected.insert(clamped_to, item);
                prop_assert_eq!(&moved, &expected);
            }
        }
    }

    #[test]
    fn move_within_same_index_noop(items in distinct_vec(32), i in index()) {
        let original = items.clone();
        let mut moved = items;
        prop_assert_eq!(move_within(&mut moved, i, i), ReorderOutcome::Unchanged);
        prop_assert_eq!(moved, original);
    }

    #[test]
    fn move_within_clamps_out_of_range(
        items in distinct_vec(16),
        from in 0usize..200,
        to in 0usize..200,
    ) {
        prop_assume!(!items.is_empty());
        let last = items.len() - 1;
        let mut clamped = items.clone();
        let mut raw = items;
        move_within(&mut clamped, from.min(last), to.min(last));
        move_within(&mut raw, from, to);
        prop_assert_eq!(raw, clamped);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. transfer_between
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn transfer_conserves_count(
        source in distinct_vec(16),
        target_len in 0usize..16,
        from in index(),
        to in index(),
    ) {
        let mut source = source;
        let mut target: Vec<u32> = (1000..1000 + target_len as u32).collect();
        let before_source = source.clone();
        let total = source.len() + target.len();

        let outcome = transfer_between(&mut source, &mut target, from, to);
        prop_assert_eq!(source.len() + target.len(), total);

        match outcome {
            ReorderOutcome::Unchanged => {
                prop_assert!(before_source.is_empty());
                prop_assert_eq!(target.len(), target_len);
            }
            ReorderOutcome::Moved { from, to } => {
                let item = before_source[from];
                prop_assert_eq!(target[to], item);
                prop_assert!(!source.contains(&item));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. copy_between
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn copy_keeps_source_and_grows_target(
        source in distinct_vec(16),
        target_len in 0usize..16,
        from in 0usize..16,
        to in index(),
    ) {
        prop_assume!(from < source.len());
        let mut target: Vec<u32> = (1000..1000 + target_len as u32).collect();
        let before = source.clone();

        let outcome = copy_between(&source, &mut target, from, to);
        prop_assert_eq!(&source, &before);
        prop_assert_eq!(target.len(), target_len + 1);
        prop_assert_eq!(outcome, ReorderOutcome::Moved { from, to: to.min(target_len) });
        prop_assert_eq!(target[to.min(target_len)], source[from]);
    }
}
