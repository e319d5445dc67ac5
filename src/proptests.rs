use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_tree<V>(t: &RadixTree<V>) {
    let issues = t.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {:?}", issues);
}

/// Longest stored key that is a prefix of `query` and lands on a node
/// boundary, computed from the model plus the set of boundary keys.
fn model_prefix_match<'a>(
    boundaries: &'a BTreeMap<Vec<u8>, Option<u64>>,
    query: &[u8],
) -> Option<&'a Option<u64>> {
    if query.is_empty() {
        return None;
    }
    (0..=query.len())
        .rev()
        .find_map(|n| boundaries.get(&query[..n]))
}

/// Every key at which the tree currently has a node boundary, with its value.
fn boundaries<V: Copy>(t: &RadixTree<V>) -> BTreeMap<Vec<u8>, Option<V>> {
    fn walk<V: Copy>(node: &Node<V>, key: &mut Vec<u8>, out: &mut BTreeMap<Vec<u8>, Option<V>>) {
        let mark = key.len();
        key.extend_from_slice(node.label());
        out.insert(key.clone(), node.value().copied());
        for child in node.children() {
            walk(child, key, out);
        }
        key.truncate(mark);
    }

    let mut out = BTreeMap::new();
    if !t.root().is_untouched() {
        walk(t.root(), &mut Vec::new(), &mut out);
    }
    out
}

#[derive(Clone, Debug)]
enum Op<V> {
    Insert(Vec<u8>, V),
    Touch(Vec<u8>),
    Get(Vec<u8>),
    Prefix(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A narrow alphabet makes shared prefixes and splits common; 0x00 and 0xff
    // cover the extremes of child ordering.
    prop::collection::vec(prop_oneof![Just(0u8), Just(0xffu8), b'a'..=b'd'], 0..=12)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op<u64>>> {
    let key = key_strategy();
    let op = prop_oneof![
        45 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        10 => key.clone().prop_map(Op::Touch),
        25 => key.clone().prop_map(Op::Get),
        20 => key.clone().prop_map(Op::Prefix),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_u64(ops in ops_strategy()) {
        let mut t: RadixTree<u64> = RadixTree::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(&key, value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Touch(key) => {
                    prop_assert_eq!(t.insert(&key, None), None);
                    prop_assert!(t.match_key(&key).full().is_some() || key.is_empty());
                }
                Op::Get(key) => {
                    let got_t = t.match_value(&key).copied();
                    let got_m = m.get(key.as_slice()).copied();
                    prop_assert_eq!(got_t, got_m);
                }
                Op::Prefix(key) => {
                    let bounds = boundaries(&t);
                    let expected = model_prefix_match(&bounds, &key).copied().flatten();
                    prop_assert_eq!(t.prefix_match_value(&key).copied(), expected);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(Vec<u8>, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);

        // Stored keys are always node boundaries.
        let bounds = boundaries(&t);
        for (k, v) in &m {
            prop_assert_eq!(bounds.get(k), Some(&Some(*v)));
        }
    }

    #[test]
    fn prop_non_interference(
        keys in prop::collection::btree_set(key_strategy(), 1..40),
        extra in key_strategy()
    ) {
        let mut t: RadixTree<u64> = RadixTree::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }
        let before: Vec<Option<u64>> = keys.iter().map(|k| t.match_value(k).copied()).collect();

        t.insert(&extra, u64::MAX);

        for (k, old) in keys.iter().zip(before) {
            let now = t.match_value(k).copied();
            if *k == extra {
                prop_assert_eq!(now, Some(u64::MAX));
            } else {
                prop_assert_eq!(now, old);
            }
        }
        validate_tree(&t);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"b".to_vec(),
        b"aa".to_vec(),
        b"ab".to_vec(),
        b"ba".to_vec(),
    ];

    let mut first: Option<Vec<(Vec<u8>, u64)>> = None;
    for_each_permutation(&keys, |perm| {
        let mut t: RadixTree<u64> = RadixTree::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for k in perm {
            // Value derived from the key so every order stores the same map.
            let v = k.iter().map(|&b| b as u64).sum::<u64>() + k.len() as u64;
            assert_eq!(t.insert(&k, v), m.insert(k, v));
        }

        validate_tree(&t);
        let mut got = Vec::new();
        t.visit(|k, v| got.push((k.to_vec(), *v)));
        let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(got, expected);

        let reference = first.get_or_insert_with(|| got.clone());
        assert_eq!(reference, &got);
    });
}
