//! Property-based testing for primitive maps and sets
//!
//! Every container is driven with random operation sequences and compared
//! against a std collection acting as the model.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use primkit::prelude::*;
use primkit::tree_map::{Balance, TreeMap};
use primkit::{Avl, RedBlack};

// =============================================================================
// PROPERTY TEST GENERATORS
// =============================================================================

/// Generate sequences of map operations
#[derive(Debug, Clone)]
pub enum MapOp {
    Insert(i32, i32),
    Remove(i32),
    Get(i32),
    Compute(i32, i32),
    Clear,
}

/// Keys come from a narrow range so that removals and overwrites are common,
/// and the zero key shows up regularly
fn map_ops_strategy() -> impl Strategy<Value = Vec<MapOp>> {
    let key = -64i32..64;
    prop::collection::vec(
        prop_oneof![
            8 => (key.clone(), any::<i32>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
            4 => key.clone().prop_map(MapOp::Remove),
            2 => key.clone().prop_map(MapOp::Get),
            2 => (key.clone(), -3i32..3).prop_map(|(k, d)| MapOp::Compute(k, d)),
            1 => Just(MapOp::Clear),
        ],
        0..600,
    )
}

/// Apply one operation to a map and to its model, checking the results agree
fn apply<M: PrimitiveMap<i32, i32>>(map: &mut M, model: &mut BTreeMap<i32, i32>, op: &MapOp) {
    match *op {
        MapOp::Insert(k, v) => {
            assert_eq!(map.insert(k, v), model.insert(k, v));
        }
        MapOp::Remove(k) => {
            assert_eq!(map.remove_opt(k), model.remove(&k));
        }
        MapOp::Get(k) => {
            assert_eq!(map.get_opt(k), model.get(&k).copied());
            assert_eq!(map.get(k), model.get(&k).copied().unwrap_or(0));
        }
        MapOp::Compute(k, d) => {
            // A result of 0 (the default return value) removes the key
            let current = model.get(&k).copied().unwrap_or(0);
            let expected = current.wrapping_add(d);
            assert_eq!(map.compute(k, |_, v| v.wrapping_add(d)), expected);
            if expected == 0 {
                model.remove(&k);
            } else {
                model.insert(k, expected);
            }
        }
        MapOp::Clear => {
            map.clear();
            model.clear();
        }
    }
    assert_eq!(map.len(), model.len());
}

fn tree_model_check<B: Balance>(ops: &[MapOp]) {
    let mut map = TreeMap::<i32, i32, B>::new();
    let mut model = BTreeMap::new();
    for op in ops {
        apply(&mut map, &mut model, op);
    }
    assert_eq!(map.iter().collect::<Vec<_>>(), model.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>());
}

// =============================================================================
// HASH MAP PROPERTY TESTS
// =============================================================================

proptest! {
    #[test]
    fn prop_hash_map_matches_model(ops in map_ops_strategy()) {
        let mut map = PrimHashMap::<i32, i32>::new();
        let mut model = BTreeMap::new();
        for op in &ops {
            apply(&mut map, &mut model, op);
        }
        let mut entries: Vec<(i32, i32)> = map.iter().collect();
        entries.sort_unstable();
        prop_assert_eq!(entries, model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_hash_map_capacity_never_overflows(
        keys in prop::collection::vec(any::<u64>(), 0..2000)
    ) {
        let mut map = PrimHashMap::<u64, u64>::new();
        let mut model = HashMap::new();
        for &k in &keys {
            map.put(k, k ^ 0x55);
            model.insert(k, k ^ 0x55);
            prop_assert!(map.len() <= map.capacity());
        }
        for (&k, &v) in &model {
            prop_assert_eq!(map.get(k), v);
        }
        for &k in &keys {
            map.remove(k);
        }
        prop_assert!(map.is_empty());
        prop_assert!(map.iter().next().is_none());
    }

    #[test]
    fn prop_linked_map_keeps_insertion_order(ops in map_ops_strategy()) {
        let mut map = LinkedPrimHashMap::<i32, i32>::new();
        let mut model = BTreeMap::new();
        let mut order: Vec<i32> = Vec::new();
        for op in &ops {
            let before = model.contains_key(&op_key(op));
            apply(&mut map, &mut model, op);
            let after = model.contains_key(&op_key(op));
            match op {
                MapOp::Clear => order.clear(),
                _ if before && !after => order.retain(|&k| k != op_key(op)),
                _ if !before && after => order.push(op_key(op)),
                _ => {}
            }
        }
        prop_assert_eq!(map.keys().collect::<Vec<_>>(), order.clone());
        prop_assert_eq!(map.first_key(), order.first().copied());
        prop_assert_eq!(map.last_key(), order.last().copied());
    }

    #[test]
    fn prop_hash_cursor_visits_each_key_once(
        keys in prop::collection::btree_set(any::<i16>(), 0..500),
        modulus in 2i16..5
    ) {
        let mut map: PrimHashMap<i16, i16> = keys.iter().map(|&k| (k, k)).collect();
        let mut cursor = map.cursor();
        let mut seen = BTreeSet::new();
        while let Some((k, _)) = cursor.next(&map).unwrap() {
            prop_assert!(seen.insert(k), "key {} visited twice", k);
            if k % modulus == 0 {
                cursor.remove(&mut map).unwrap();
            }
        }
        prop_assert_eq!(seen, keys.clone());
        for &k in &keys {
            prop_assert_eq!(map.contains_key(k), k % modulus != 0);
        }
    }
}

fn op_key(op: &MapOp) -> i32 {
    match *op {
        MapOp::Insert(k, _) | MapOp::Remove(k) | MapOp::Get(k) | MapOp::Compute(k, _) => k,
        MapOp::Clear => i32::MIN,
    }
}

// =============================================================================
// TREE MAP PROPERTY TESTS
// =============================================================================

proptest! {
    #[test]
    fn prop_avl_matches_model(ops in map_ops_strategy()) {
        tree_model_check::<Avl>(&ops);
    }

    #[test]
    fn prop_rb_matches_model(ops in map_ops_strategy()) {
        tree_model_check::<RedBlack>(&ops);
    }

    #[test]
    fn prop_tree_heights_stay_logarithmic(
        keys in prop::collection::vec(any::<i32>(), 1..3000)
    ) {
        let avl: AvlTreeMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
        let rb: RbTreeMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
        let n = avl.len() as f64;
        prop_assert!(avl.height() as f64 <= 1.44 * (n + 2.0).log2());
        prop_assert!(rb.height() as f64 <= 2.0 * (n + 1.0).log2());
    }

    #[test]
    fn prop_navigation_matches_model(
        keys in prop::collection::btree_set(-1000i32..1000, 0..200),
        probe in -1100i32..1100
    ) {
        let map: RbTreeMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
        let below = keys.range(..probe).next_back().copied();
        let at_or_below = keys.range(..=probe).next_back().copied();
        let at_or_above = keys.range(probe..).next().copied();
        let above = keys.range(probe + 1..).next().copied();
        prop_assert_eq!(map.lower_key(probe), below.unwrap_or(i32::MIN));
        prop_assert_eq!(map.floor_key(probe), at_or_below.unwrap_or(i32::MIN));
        prop_assert_eq!(map.ceiling_key(probe), at_or_above.unwrap_or(i32::MAX));
        prop_assert_eq!(map.higher_key(probe), above.unwrap_or(i32::MAX));
    }

    #[test]
    fn prop_sub_map_matches_range(
        keys in prop::collection::btree_set(-500i32..500, 0..200),
        a in -600i32..600,
        b in -600i32..600,
        lo_inclusive in any::<bool>(),
        hi_inclusive in any::<bool>()
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let map: AvlTreeMap<i32, i32> = keys.iter().map(|&k| (k, -k)).collect();
        let view = map.sub_map(lo, lo_inclusive, hi, hi_inclusive).unwrap();
        let expected: Vec<i32> = keys
            .iter()
            .copied()
            .filter(|&k| (k > lo || (lo_inclusive && k == lo)) && (k < hi || (hi_inclusive && k == hi)))
            .collect();
        prop_assert_eq!(view.keys().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(view.len(), expected.len());
        prop_assert_eq!(view.first_key(), expected.first().copied());
        prop_assert_eq!(view.last_key(), expected.last().copied());
        let reversed: Vec<i32> = expected.iter().rev().copied().collect();
        prop_assert_eq!(view.descending_map().keys().collect::<Vec<_>>(), reversed);
    }

    #[test]
    fn prop_tree_set_matches_model(
        adds in prop::collection::vec(-100i64..100, 0..300),
        removes in prop::collection::vec(-100i64..100, 0..300)
    ) {
        let mut set = AvlTreeSet::<i64>::new();
        let mut model = BTreeSet::new();
        for &k in &adds {
            prop_assert_eq!(set.add(k), model.insert(k));
        }
        for &k in &removes {
            prop_assert_eq!(set.remove(k), model.remove(&k));
        }
        prop_assert_eq!(set.iter().collect::<Vec<_>>(), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(set.first(), model.first().copied());
        prop_assert_eq!(set.last(), model.last().copied());
    }
}
