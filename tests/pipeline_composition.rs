//! End-to-end behaviour of composed pipelines

mod common;

use common::recorder::Recorder;
use common::to_digits;
use contraflow::{identity, Identity, Receiver, Stage, Trigger};
use proptest::prelude::*;

#[test]
fn test_transform_order() {
    let recorder = Recorder::<i32>::new();
    let mut entry = Identity::<i32>::new()
        .map(|v| v * v)
        .sink(recorder.callback());

    for v in [3, -1, 4, 1, -5] {
        entry.push(v);
    }

    assert_eq!(recorder.values(), vec![9, 1, 16, 1, 25]);
}

#[test]
fn test_expansion_order_and_cardinality() {
    let recorder = Recorder::<char>::new();
    let mut entry = Identity::<u8>::new()
        .flat_map(|v| match v {
            1 => vec!['a', 'b'],
            2 => vec![],
            _ => vec!['c'],
        })
        .sink(recorder.callback());

    entry.push(1);
    entry.push(2);
    entry.push(3);

    assert_eq!(recorder.values(), vec!['a', 'b', 'c']);
}

#[test]
fn test_fan_out_duplication() {
    let first = Recorder::<&'static str>::new();
    let second = Recorder::<&'static str>::new();
    let mut entry = Identity::<&str>::new()
        .branch()
        .attach((first.sink(), second.sink()));

    entry.push("x");
    assert_eq!(first.values(), vec!["x"]);
    assert_eq!(second.values(), vec!["x"]);

    entry.push("y");
    assert_eq!(first.values(), vec!["x", "y"]);
    assert_eq!(second.values(), vec!["x", "y"]);
}

#[test]
fn test_buffer_accumulate_then_flush() {
    let recorder = Recorder::<u32>::new();
    let (mut push, mut signal) = Identity::<u32>::new()
        .buffer_for_signal()
        .sink(recorder.callback());

    push.push(1);
    push.push(2);
    push.push(3);
    assert!(recorder.is_empty());

    signal.signal();
    assert_eq!(recorder.values(), vec![1, 2, 3]);

    signal.signal();
    assert_eq!(recorder.values(), vec![1, 2, 3]);
}

#[test]
fn test_buffer_interleaving() {
    let recorder = Recorder::<u32>::new();
    let (mut push, mut signal) = Identity::<u32>::new()
        .buffer_for_signal()
        .sink(recorder.callback());

    push.push(1);
    signal.signal();
    assert_eq!(recorder.values(), vec![1]);

    push.push(2);
    push.push(3);
    signal.signal();
    assert_eq!(recorder.values(), vec![1, 2, 3]);
}

#[test]
fn test_composition_matches_declaration_order() {
    let first = Recorder::<u32>::new();
    let second = Recorder::<u32>::new();
    let mut entry = Identity::<u32>::new()
        .map(|v| v * 2)
        .flat_map(to_digits)
        .branch()
        .attach((first.sink(), second.sink()));

    entry.push(12);

    assert_eq!(first.values(), vec![2, 4]);
    assert_eq!(second.values(), vec![2, 4]);
}

#[test]
fn test_branches_with_separate_tails() {
    let digits = Recorder::<u32>::new();
    let totals = Recorder::<u32>::new();
    let mut entry = identity::<u32>()
        .branch()
        .flat_map(to_digits)
        .attach((digits.sink(), totals.sink()));

    entry.push(305);

    assert_eq!(digits.values(), vec![3, 0, 5]);
    assert_eq!(totals.values(), vec![305]);
}

#[test]
fn test_nested_branches_reach_three_sinks() {
    let a = Recorder::<char>::new();
    let b = Recorder::<char>::new();
    let c = Recorder::<char>::new();
    let mut entry = identity::<char>()
        .branch()
        .branch()
        .attach((a.sink(), b.sink(), c.sink()));

    entry.push('q');

    assert_eq!(a.values(), vec!['q']);
    assert_eq!(b.values(), vec!['q']);
    assert_eq!(c.values(), vec!['q']);
}

#[test]
fn test_buffer_before_branch_flushes_both_sides() {
    let first = Recorder::<u32>::new();
    let second = Recorder::<u32>::new();
    let (mut push, mut signal) = identity::<u32>()
        .buffer_for_signal()
        .branch()
        .attach((first.sink(), second.sink()));

    push.push(8);
    assert!(first.is_empty() && second.is_empty());

    signal.signal();
    assert_eq!(first.values(), vec![8]);
    assert_eq!(second.values(), vec![8]);
}

#[test]
fn test_branch_before_buffer_gates_only_first_side() {
    let gated = Recorder::<u32>::new();
    let direct = Recorder::<u32>::new();
    let (mut push, mut signal) = identity::<u32>()
        .branch()
        .buffer_for_signal()
        .attach((gated.sink(), direct.sink()));

    push.push(5);
    assert!(gated.is_empty());
    assert_eq!(direct.values(), vec![5]);

    signal.signal();
    assert_eq!(gated.values(), vec![5]);
}

#[test]
fn test_duplicate_buffer_then_deliver_to_one_callback() {
    let recorder = Recorder::<u32>::new();
    let (mut push, mut signal) = identity::<u32>()
        .map(|v| v * 2)
        .branch()
        .buffer_for_signal()
        .sink(recorder.callback());

    push.push(1);
    push.push(2);
    assert!(recorder.is_empty());

    signal.signal();
    assert_eq!(recorder.values(), vec![2, 2, 4, 4]);

    signal.signal();
    assert_eq!(recorder.values(), vec![2, 2, 4, 4]);
}

#[test]
fn test_branch_ahead_of_chained_buffers_keeps_both_signals() {
    let recorder = Recorder::<u32>::new();
    let (mut push, mut near_sink, mut near_source) = identity::<u32>()
        .branch()
        .buffer_for_signal()
        .map(|v| v + 1)
        .buffer_for_signal()
        .sink(recorder.callback());

    push.push(1);
    near_source.signal();
    assert!(recorder.is_empty());

    near_sink.signal();
    assert_eq!(recorder.values(), vec![2, 2]);
}

#[test]
fn test_branch_into_sink_borrowing_local_state() {
    let mut seen = Vec::new();
    {
        let mut entry = identity::<char>().branch().sink(|c| seen.push(c));
        entry.push('z');
    }
    assert_eq!(seen, vec!['z', 'z']);
}

proptest! {
    #[test]
    fn test_map_is_one_for_one(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let recorder = Recorder::<i32>::new();
        let mut entry = Identity::<i32>::new()
            .map(|v| v.wrapping_mul(3))
            .sink(recorder.callback());

        for &v in &values {
            entry.push(v);
        }

        let expected: Vec<i32> = values.iter().map(|v| v.wrapping_mul(3)).collect();
        prop_assert_eq!(recorder.values(), expected);
    }

    #[test]
    fn test_flat_map_concatenates_in_order(
        batches in prop::collection::vec(prop::collection::vec(any::<u16>(), 0..8), 0..32)
    ) {
        let recorder = Recorder::<u16>::new();
        let mut entry = Identity::<Vec<u16>>::new()
            .flat_map(|batch| batch)
            .sink(recorder.callback());

        for batch in batches.clone() {
            entry.push(batch);
        }

        let expected: Vec<u16> = batches.into_iter().flatten().collect();
        prop_assert_eq!(recorder.values(), expected);
    }

    #[test]
    fn test_buffer_delivers_exactly_what_preceded_each_signal(
        ops in prop::collection::vec(prop::option::of(any::<u8>()), 0..64)
    ) {
        // `Some(v)` pushes v, `None` fires the signal.
        let recorder = Recorder::<u8>::new();
        let (mut push, mut signal) = Identity::<u8>::new()
            .buffer_for_signal()
            .sink(recorder.callback());

        let mut delivered = Vec::new();
        let mut pending = Vec::new();
        for op in ops {
            match op {
                Some(v) => {
                    push.push(v);
                    pending.push(v);
                }
                None => {
                    signal.signal();
                    delivered.append(&mut pending);
                }
            }
            prop_assert_eq!(recorder.values(), delivered.clone());
        }
    }
}
