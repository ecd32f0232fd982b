mod common;

use std::collections::HashMap;

use common::{file_name, files};
use photoloop::Error;
use photoloop::sequence::PlaybackQueue;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn take_names(q: &mut PlaybackQueue, n: usize) -> Vec<String> {
    (0..n).map(|_| file_name(q.advance().path())).collect()
}

#[test]
fn unshuffled_queue_cycles_in_scan_order() {
    let names = ["a.png", "b.jpg", "c.gif"];
    let mut q = PlaybackQueue::build(files(&names), false).unwrap();

    let seen = take_names(&mut q, 10);
    for (i, name) in seen.iter().enumerate() {
        assert_eq!(name, names[i % names.len()]);
    }
}

#[test]
fn shuffled_lap_is_a_permutation_repeated_forever() {
    let names = ["a.png", "b.png", "c.png", "d.png", "e.png"];
    let mut q = PlaybackQueue::build(files(&names), true).unwrap();

    let first = take_names(&mut q, names.len());
    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(sorted, names);

    for _ in 0..3 {
        assert_eq!(take_names(&mut q, names.len()), first);
    }
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let names = ["a.png", "b.png", "c.png", "d.png", "e.png", "f.png"];
    let a = PlaybackQueue::build_with_rng(files(&names), true, &mut StdRng::seed_from_u64(42))
        .unwrap();
    let b = PlaybackQueue::build_with_rng(files(&names), true, &mut StdRng::seed_from_u64(42))
        .unwrap();
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn shuffle_is_roughly_uniform_over_permutations() {
    let names = ["a.png", "b.png", "c.png"];
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut counts: HashMap<Vec<String>, u32> = HashMap::new();

    for _ in 0..6000 {
        let mut q = PlaybackQueue::build_with_rng(files(&names), true, &mut rng).unwrap();
        *counts.entry(take_names(&mut q, 3)).or_default() += 1;
    }

    assert_eq!(counts.len(), 6, "every ordering should appear: {counts:?}");
    for (order, n) in &counts {
        assert!((850..=1150).contains(n), "{order:?} appeared {n} times");
    }
}

#[test]
fn empty_list_is_rejected() {
    let err = PlaybackQueue::build(Vec::new(), false).unwrap_err();
    assert!(matches!(err, Error::EmptyCollection));
}

#[test]
fn single_item_repeats() {
    let mut q = PlaybackQueue::build(files(&["only.bmp"]), true).unwrap();
    assert_eq!(q.len(), 1);
    assert!(!q.is_empty());
    assert_eq!(take_names(&mut q, 4), ["only.bmp"; 4]);
    assert_eq!(q.lap(), 3);
    assert_eq!(q.cursor(), 0);
}
