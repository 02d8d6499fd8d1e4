use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use rbmultimap::Tree;

/// Keys and values come from tiny alphabets so duplicates are common.
#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Delete(u8, u8),
}

impl Op {
    fn key(k: u8) -> String {
        format!("k{}", k % 12)
    }

    fn value(v: u8) -> String {
        format!("v{}", v % 4)
    }
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        let (k, v) = (u8::arbitrary(g), u8::arbitrary(g));
        // Inserts outnumber deletes so the tree actually grows.
        if u8::arbitrary(g) % 3 == 0 {
            Op::Delete(k, v)
        } else {
            Op::Insert(k, v)
        }
    }
}

type Model = BTreeMap<String, Vec<String>>;

fn apply(tree: &mut Tree, model: &mut Model, op: &Op) -> usize {
    match op {
        Op::Insert(k, v) => {
            tree.insert(Op::key(*k), Op::value(*v));
            model.entry(Op::key(*k)).or_default().push(Op::value(*v));
            0
        }
        Op::Delete(k, v) => {
            let (key, value) = (Op::key(*k), Op::value(*v));
            let removed = tree.delete(&key, &value);
            if let Some(values) = model.get_mut(&key) {
                values.retain(|x| *x != value);
                if values.is_empty() {
                    model.remove(&key);
                }
            }
            removed
        }
    }
}

#[quickcheck]
fn invariants_hold_after_every_op(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut model = Model::new();
    ops.iter().all(|op| {
        apply(&mut tree, &mut model, op);
        tree.validate().is_ok()
    })
}

#[quickcheck]
fn find_matches_model(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut model = Model::new();
    for op in ops.iter() {
        apply(&mut tree, &mut model, op);
    }
    (0..12u8).all(|k| {
        let key = Op::key(k);
        let expected: Vec<&str> = model
            .get(&key)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default();
        tree.find(&key) == expected
    })
}

#[quickcheck]
fn delete_counts_match_model(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut model = Model::new();
    ops.iter().all(|op| {
        let expected = match op {
            Op::Insert(..) => 0,
            Op::Delete(k, v) => model
                .get(&Op::key(*k))
                .map_or(0, |values| values.iter().filter(|x| **x == Op::value(*v)).count()),
        };
        apply(&mut tree, &mut model, op) == expected
    })
}

#[quickcheck]
fn in_order_keys_never_decrease(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut model = Model::new();
    for op in ops.iter() {
        apply(&mut tree, &mut model, op);
    }
    let keys: Vec<&str> = tree.keys().collect();
    keys.windows(2).all(|pair| pair[0] <= pair[1])
        && keys.len() == model.values().map(Vec::len).sum::<usize>()
}

#[test]
fn random_round_trip_empties_tree() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    for round in 0..8 {
        let n = rng.random_range(1..2000);
        let mut entries: Vec<(String, String)> = (0..n)
            .map(|i| {
                let key = rng.random_range(0..n / 4 + 1);
                (format!("{key:05}"), format!("{round}-{i}"))
            })
            .collect();

        let mut tree = Tree::new();
        for (k, v) in entries.iter() {
            tree.insert(k.as_str(), v.as_str());
        }
        assert_eq!(n, tree.len());
        assert!(tree.validate().is_ok());

        entries.shuffle(&mut rng);
        for (i, (k, v)) in entries.iter().enumerate() {
            assert_eq!(1, tree.delete(k, v));
            assert!(!tree.find(k).contains(&v.as_str()));
            if i % 64 == 0 {
                assert!(tree.validate().is_ok());
            }
        }
        assert!(tree.is_empty());
        assert_eq!(Ok(0), tree.validate());
        assert_eq!(0, tree.height());
    }
}

#[test]
fn height_stays_logarithmic() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut tree = Tree::new();
    for n in 1..=4096usize {
        let key: u32 = rng.random();
        tree.insert(format!("{key:010}"), "v");
        if n.is_power_of_two() {
            let bound = 2.0 * ((n + 1) as f64).log2();
            assert!(tree.height() as f64 <= bound, "n={n} height={}", tree.height());
        }
    }
    assert!(tree.validate().is_ok());
}

#[test]
fn delete_keeps_other_values() {
    let mut tree = Tree::new();
    for i in 0..300 {
        tree.insert(format!("{}", i % 7), format!("{}", i % 5));
    }
    assert_eq!(Vec::<&str>::new(), tree.find("7"));
    let before: Vec<String> = tree.find("3").into_iter().map(str::to_string).collect();
    tree.delete("3", "0");
    let after: Vec<String> = tree.find("3").into_iter().map(str::to_string).collect();
    let expected: Vec<String> = before.into_iter().filter(|v| v != "0").collect();
    assert_eq!(expected, after);
    assert!(tree.validate().is_ok());
}
