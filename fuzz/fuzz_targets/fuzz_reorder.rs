#![no_main]

use arbitrary::Arbitrary;
use dragline_core::reorder::{copy_between, move_within, transfer_between};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Move { from: usize, to: usize },
    Transfer { from: usize, to: usize, reverse: bool },
    Copy { from: usize, to: usize, reverse: bool },
}

#[derive(Debug, Arbitrary)]
struct Input {
    left: Vec<u16>,
    right: Vec<u16>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let Input {
        mut left,
        mut right,
        ops,
    } = input;

    for op in ops.into_iter().take(256) {
        let total = left.len() + right.len();
        match op {
            Op::Move { from, to } => {
                let before = left.len();
                move_within(&mut left, from, to);
                assert_eq!(left.len(), before, "move_within changed length");
            }
            Op::Transfer { from, to, reverse } => {
                let (source, target) = if reverse {
                    (&mut right, &mut left)
                } else {
                    (&mut left, &mut right)
                };
                transfer_between(source, target, from, to);
                assert_eq!(left.len() + right.len(), total, "transfer lost items");
            }
            Op::Copy { from, to, reverse } => {
                let (source, target) = if reverse {
                    (&right, &mut left)
                } else {
                    (&left, &mut right)
                };
                let snapshot = source.clone();
                let copied = copy_between(source, target, from, to).is_moved();
                assert_eq!(source, &snapshot, "copy mutated its source");
                let grew = left.len() + right.len() - total;
                assert_eq!(grew, usize::from(copied), "copy inserted wrong count");
            }
        }
        // Keep inputs bounded across long op sequences.
        left.truncate(512);
        right.truncate(512);
    }
});
