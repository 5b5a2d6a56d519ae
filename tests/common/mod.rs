#![allow(dead_code)]

use itertools::Itertools;
use llrb::*;
use rand::{self, Rng};
use std::collections::BTreeSet;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { key: i32 },
    Delete { key: i32 },
    Search { key: i32 },
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Inserted(bool),
    Deleted(bool),
    Found(bool),
}

pub fn random_round_action(rng: &mut rand::prelude::ThreadRng, max_key: i32) -> RoundAction {
    use RoundAction::*;
    let key = rng.gen_range(0..=max_key);
    match rng.gen_range(0..3) {
        0 => Insert { key },
        1 => Delete { key },
        2 => Search { key },
        _ => panic!(),
    }
}

pub fn run_round<O: Observer<i32>>(action: &RoundAction, tree: &mut LLRBTree<i32, O>) -> RoundResult {
    match *action {
        RoundAction::Insert { key } => RoundResult::Inserted(tree.insert(key)),
        RoundAction::Delete { key } => RoundResult::Deleted(tree.delete(&key)),
        RoundAction::Search { key } => RoundResult::Found(tree.search(&key)),
    }
}

/// Runs the same round against a `BTreeSet`, which serves as the reference.
pub fn run_reference_round(action: &RoundAction, set: &mut BTreeSet<i32>) -> RoundResult {
    match *action {
        RoundAction::Insert { key } => RoundResult::Inserted(set.insert(key)),
        RoundAction::Delete { key } => RoundResult::Deleted(set.remove(&key)),
        RoundAction::Search { key } => RoundResult::Found(set.contains(&key)),
    }
}

/// Collects the keys of the tree by an in-order traversal of its nodes.
pub fn keys<K: Clone>(tree: &BasicTree<K>) -> Vec<K> {
    fn walk<K: Clone>(tree: &BasicTree<K>, out: &mut Vec<K>) {
        if let Some(node) = tree.node() {
            walk(node.left(), out);
            out.push(node.key().clone());
            walk(node.right(), out);
        }
    }
    let mut out = vec![];
    walk(tree, &mut out);
    out
}

/// Returns the black height of every root-to-missing-son path.
pub fn black_heights<K>(tree: &BasicTree<K>) -> Vec<usize> {
    fn walk<K>(tree: &BasicTree<K>, blacks: usize, out: &mut Vec<usize>) {
        match tree.node() {
            None => out.push(blacks),
            Some(node) => {
                let blacks = blacks + if node.is_red() { 0 } else { 1 };
                walk(node.left(), blacks, out);
                walk(node.right(), blacks, out);
            }
        }
    }
    let mut out = vec![];
    walk(tree, 0, &mut out);
    out
}

/// Every node whose right link is red.
pub fn right_leaning_reds<K: Clone>(tree: &BasicTree<K>) -> Vec<K> {
    fn walk<K: Clone>(tree: &BasicTree<K>, out: &mut Vec<K>) {
        if let Some(node) = tree.node() {
            if node.right().is_red() {
                out.push(node.key().clone());
            }
            walk(node.left(), out);
            walk(node.right(), out);
        }
    }
    let mut out = vec![];
    walk(tree, &mut out);
    out
}

/// Every red node with a red left son.
pub fn double_reds<K: Clone>(tree: &BasicTree<K>) -> Vec<K> {
    fn walk<K: Clone>(tree: &BasicTree<K>, out: &mut Vec<K>) {
        if let Some(node) = tree.node() {
            if node.is_red() && node.left().is_red() {
                out.push(node.key().clone());
            }
            walk(node.left(), out);
            walk(node.right(), out);
        }
    }
    let mut out = vec![];
    walk(tree, &mut out);
    out
}

/// Checks every structural property of the tree through its public view,
/// independently of `LLRBTree::assert_correctness`.
pub fn check_invariants<O: Observer<i32>>(tree: &LLRBTree<i32, O>) {
    let inner = tree.inner();
    let keys = keys(inner);
    assert!(
        keys.iter().tuple_windows().all(|(a, b)| a < b),
        "keys out of order: {:?}",
        keys
    );
    assert_eq!(keys.len(), tree.len());
    assert!(!inner.is_red(), "red root");
    assert!(right_leaning_reds(inner).is_empty());
    assert!(double_reds(inner).is_empty());
    assert!(
        black_heights(inner).iter().all_equal(),
        "black heights differ"
    );
    tree.assert_correctness();
}

const MAX_KEY: i32 = 300;

/// Runs random rounds against a tree and a `BTreeSet`, and checks that they agree.
pub fn check_consistency(num_rounds: u32) {
    let mut rng = rand::thread_rng();
    let mut tree: LLRBTree<i32> = LLRBTree::new();
    let mut set = BTreeSet::new();

    for _ in 0..num_rounds {
        let action = random_round_action(&mut rng, MAX_KEY);
        let res1 = run_round(&action, &mut tree);
        let res2 = run_reference_round(&action, &mut set);
        assert_eq!(res1, res2, "after {:?}", action);
        assert_eq!(tree.len(), set.len());
        check_invariants(&tree);
    }
    assert_eq!(keys(tree.inner()), set.into_iter().collect::<Vec<_>>());
}

/// Deletes each key of a fixed tree in turn, checking the remaining keys.
pub fn check_delete(size: i32) {
    let arr: Vec<_> = (0..size).collect();
    for i in 0..arr.len() {
        let mut tree: LLRBTree<i32> = arr.iter().cloned().collect();
        assert!(tree.delete(&arr[i]));
        check_invariants(&tree);
        assert_eq!(
            keys(tree.inner()),
            arr[..i]
                .iter()
                .chain(arr[i + 1..].iter())
                .cloned()
                .collect::<Vec<_>>()
        );
    }
}
