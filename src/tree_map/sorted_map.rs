//! Balanced binary search tree map
//!
//! [`TreeMap`] is generic over its [`Balance`] rule and its [`KeyOrder`];
//! [`AvlTreeMap`] and [`RbTreeMap`] fix the rule. Both share descent,
//! navigation, deletion and range views, and differ only in how they restore
//! balance after a node is linked or unlinked.
//!
//! # Examples
//!
//! ```rust
//! use primkit::tree_map::AvlTreeMap;
//! use primkit::traits::{NavigableMap, PrimitiveMap};
//!
//! let mut map = AvlTreeMap::<i32, i32>::new();
//! for k in [5, 3, 8, 1, 4] {
//!     map.put(k, k * 10);
//! }
//! assert_eq!(map.first_key(), Some(1));
//! assert_eq!(map.last_key(), Some(8));
//! assert_eq!(map.floor_key(6), 5);
//! assert_eq!(map.ceiling_key(6), 8);
//! // Misses return the sentinels
//! assert_eq!(map.higher_key(8), i32::MAX);
//! ```

use crate::error::{check_parallel_arrays, Result};
use crate::primitive::Primitive;
use crate::traits::{DefaultReturnValue, NavigableMap, PrimitiveMap};
use crate::tree_map::avl::Avl;
use crate::tree_map::iter::{FastEntries, Iter, Keys, TreeCursor, Values};
use crate::tree_map::node::{Arena, Balance, NIL};
use crate::tree_map::order::{KeyOrder, NaturalOrder};
use crate::tree_map::red_black::RedBlack;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Sorted map over primitive keys, balanced by `B` and ordered by `C`
#[derive(Clone)]
pub struct TreeMap<K, V, B, C = NaturalOrder> {
    pub(crate) tree: Arena<K, V>,
    order: C,
    pub(crate) default_value: V,
    pub(crate) default_min: K,
    pub(crate) default_max: K,
    mod_count: u64,
    balance: PhantomData<B>,
}

/// AVL-balanced tree map
pub type AvlTreeMap<K, V, C = NaturalOrder> = TreeMap<K, V, Avl, C>;

/// Red/black-balanced tree map
pub type RbTreeMap<K, V, C = NaturalOrder> = TreeMap<K, V, RedBlack, C>;

impl<K, V, B, C> TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K> + Default,
{
    /// Create an empty map ordered by `C::default()`
    pub fn new() -> Self {
        Self::with_order(C::default())
    }

    /// Build a map from parallel key/value arrays
    ///
    /// Later duplicates overwrite earlier ones.
    pub fn from_arrays(keys: &[K], values: &[V]) -> Result<Self> {
        check_parallel_arrays(keys.len(), values.len())?;
        let mut map = Self::new();
        for (&k, &v) in keys.iter().zip(values) {
            map.insert_entry(k, v);
        }
        Ok(map)
    }

    /// Copy every mapping of another primitive map
    pub fn from_map<M>(other: &M) -> Self
    where
        V: Primitive,
        M: PrimitiveMap<K, V> + ?Sized,
    {
        let mut map = Self::new();
        other.for_each(|k, v| {
            map.insert_entry(k, v);
        });
        map
    }
}

impl<K, V, B, C> TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K>,
{
    /// Create an empty map with a custom key order
    pub fn with_order(order: C) -> Self {
        Self {
            tree: Arena::new(),
            order,
            default_value: V::default(),
            default_min: K::MIN_VALUE,
            default_max: K::MAX_VALUE,
            mod_count: 0,
            balance: PhantomData,
        }
    }

    /// Number of mappings
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check whether the map is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// The key order in use
    pub fn order(&self) -> &C {
        &self.order
    }

    /// Count of structural modifications so far
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Height of the tree in nodes (0 when empty)
    pub fn height(&self) -> usize {
        self.tree.height_of(self.tree.root)
    }

    /// Replace the key returned by `lower_key` / `floor_key` misses
    pub fn set_default_min_value(&mut self, key: K) {
        self.default_min = key;
    }

    /// Replace the key returned by `ceiling_key` / `higher_key` misses
    pub fn set_default_max_value(&mut self, key: K) {
        self.default_max = key;
    }

    #[inline]
    pub(crate) fn compare(&self, a: K, b: K) -> Ordering {
        self.order.compare(a, b)
    }

    /// Node holding `key`
    pub(crate) fn find(&self, key: K) -> u32 {
        let mut n = self.tree.root;
        while n != NIL {
            match self.compare(key, self.tree.key(n)) {
                Ordering::Less => n = self.tree.left(n),
                Ordering::Greater => n = self.tree.right(n),
                Ordering::Equal => return n,
            }
        }
        NIL
    }

    /// Least node above `key` (or equal to it when `inclusive`)
    pub(crate) fn ceiling_node(&self, key: K, inclusive: bool) -> u32 {
        let mut n = self.tree.root;
        let mut best = NIL;
        while n != NIL {
            match self.compare(self.tree.key(n), key) {
                Ordering::Less => n = self.tree.right(n),
                Ordering::Equal if inclusive => return n,
                Ordering::Equal => n = self.tree.right(n),
                Ordering::Greater => {
                    best = n;
                    n = self.tree.left(n);
                }
            }
        }
        best
    }

    /// Greatest node below `key` (or equal to it when `inclusive`)
    pub(crate) fn floor_node(&self, key: K, inclusive: bool) -> u32 {
        let mut n = self.tree.root;
        let mut best = NIL;
        while n != NIL {
            match self.compare(self.tree.key(n), key) {
                Ordering::Greater => n = self.tree.left(n),
                Ordering::Equal if inclusive => return n,
                Ordering::Equal => n = self.tree.left(n),
                Ordering::Less => {
                    best = n;
                    n = self.tree.right(n);
                }
            }
        }
        best
    }

    pub(crate) fn insert_entry(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = NIL;
        let mut n = self.tree.root;
        let mut went_left = false;
        while n != NIL {
            parent = n;
            match self.compare(key, self.tree.key(n)) {
                Ordering::Less => {
                    went_left = true;
                    n = self.tree.left(n);
                }
                Ordering::Greater => {
                    went_left = false;
                    n = self.tree.right(n);
                }
                Ordering::Equal => {
                    return Some(std::mem::replace(self.tree.value_mut(n), value));
                }
            }
        }
        let node = self.tree.alloc(key, value, parent, B::NEW_NODE_TAG);
        if parent == NIL {
            self.tree.root = node;
        } else if went_left {
            self.tree.set_left(parent, node);
        } else {
            self.tree.set_right(parent, node);
        }
        B::after_insert(&mut self.tree, node);
        self.mod_count += 1;
        None
    }

    /// Unlink node `n`, returning the entry it held
    ///
    /// A node with two children takes over its in-order successor's entry and
    /// the successor's node is unlinked instead.
    pub(crate) fn remove_node(&mut self, n: u32) -> (K, V) {
        let entry = self.tree.entry(n);
        let target = if self.tree.left(n) != NIL && self.tree.right(n) != NIL {
            let successor = self.tree.successor(n);
            let (k, v) = self.tree.entry(successor);
            self.tree.set_entry(n, k, v);
            successor
        } else {
            n
        };
        B::unlink(&mut self.tree, target);
        self.tree.release(target);
        self.mod_count += 1;
        entry
    }

    pub(crate) fn remove_key(&mut self, key: K) -> Option<V> {
        let n = self.find(key);
        (n != NIL).then(|| self.remove_node(n).1)
    }

    pub(crate) fn clear_all(&mut self) {
        if !self.is_empty() {
            self.tree.clear();
            self.mod_count += 1;
        }
    }

    /// Iterate over `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::between(&self.tree, self.tree.first(), self.tree.last(), false)
    }

    /// Iterate over keys in ascending order
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Iterate over values in ascending key order
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Iterate over keys in descending order
    pub fn descending_keys(&self) -> std::iter::Rev<Keys<'_, K, V>> {
        self.keys().rev()
    }

    /// Lending iterator over reusable mutable entries, in key order
    pub fn fast_entries(&mut self) -> FastEntries<'_, K, V> {
        FastEntries::new(&mut self.tree)
    }

    /// Open a detached cursor positioned before the smallest key
    pub fn cursor(&self) -> TreeCursor {
        TreeCursor::new(self.tree.first(), self.mod_count)
    }

    /// Remove and return the smallest mapping
    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        let n = self.tree.first();
        (n != NIL).then(|| self.remove_node(n))
    }

    /// Remove and return the largest mapping
    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        let n = self.tree.last();
        (n != NIL).then(|| self.remove_node(n))
    }

    /// Check ordering, parent links, size and balance of the whole tree
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut count = 0;
        let mut prev: Option<K> = None;
        let mut n = self.tree.first();
        while n != NIL {
            let key = self.tree.key(n);
            if let Some(p) = prev {
                assert_eq!(self.compare(p, key), Ordering::Less, "keys out of order");
            }
            for child in [self.tree.left(n), self.tree.right(n)] {
                if child != NIL {
                    assert_eq!(self.tree.parent(child), n, "broken parent link");
                }
            }
            prev = Some(key);
            count += 1;
            n = self.tree.successor(n);
        }
        assert_eq!(count, self.len());
        assert_eq!(self.tree.parent(self.tree.root), NIL);
        if let Err(violation) = B::check(&self.tree) {
            panic!("{}", violation);
        }
    }
}

impl<K, V, B, C> DefaultReturnValue<V> for TreeMap<K, V, B, C>
where
    V: Primitive,
{
    fn default_return_value(&self) -> V {
        self.default_value
    }

    fn set_default_return_value(&mut self, value: V) {
        self.default_value = value;
    }
}

impl<K, V, B, C> PrimitiveMap<K, V> for TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    #[inline]
    fn len(&self) -> usize {
        self.tree.len()
    }

    fn get_opt(&self, key: K) -> Option<V> {
        let n = self.find(key);
        (n != NIL).then(|| self.tree.value(n))
    }

    fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let n = self.find(key);
        if n == NIL {
            return None;
        }
        Some(self.tree.value_mut(n))
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_entry(key, value)
    }

    fn remove_opt(&mut self, key: K) -> Option<V> {
        self.remove_key(key)
    }

    fn clear(&mut self) {
        self.clear_all();
    }

    fn for_each<F: FnMut(K, V)>(&self, mut f: F) {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }

    fn retain<F: FnMut(K, V) -> bool>(&mut self, mut f: F) {
        let doomed: Vec<K> = self
            .iter()
            .filter(|&(k, v)| !f(k, v))
            .map(|(k, _)| k)
            .collect();
        for key in doomed {
            self.remove_key(key);
        }
    }
}

impl<K, V, B, C> NavigableMap<K, V> for TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    fn default_min_value(&self) -> K {
        self.default_min
    }

    fn default_max_value(&self) -> K {
        self.default_max
    }

    fn first_entry(&self) -> Option<(K, V)> {
        let n = self.tree.first();
        (n != NIL).then(|| self.tree.entry(n))
    }

    fn last_entry(&self) -> Option<(K, V)> {
        let n = self.tree.last();
        (n != NIL).then(|| self.tree.entry(n))
    }

    fn lower_entry(&self, key: K) -> Option<(K, V)> {
        let n = self.floor_node(key, false);
        (n != NIL).then(|| self.tree.entry(n))
    }

    fn floor_entry(&self, key: K) -> Option<(K, V)> {
        let n = self.floor_node(key, true);
        (n != NIL).then(|| self.tree.entry(n))
    }

    fn ceiling_entry(&self, key: K) -> Option<(K, V)> {
        let n = self.ceiling_node(key, true);
        (n != NIL).then(|| self.tree.entry(n))
    }

    fn higher_entry(&self, key: K) -> Option<(K, V)> {
        let n = self.ceiling_node(key, false);
        (n != NIL).then(|| self.tree.entry(n))
    }
}

impl<K, V, B, C> Default for TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, B, C> fmt::Debug for TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default + fmt::Debug,
    B: Balance,
    C: KeyOrder<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal when they hold the same mappings in the same order
impl<K, V, B, B2, C> PartialEq<TreeMap<K, V, B2, C>> for TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Primitive,
    B: Balance,
    B2: Balance,
    C: KeyOrder<K>,
{
    fn eq(&self, other: &TreeMap<K, V, B2, C>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((k1, v1), (k2, v2))| k1.bit_eq(k2) && v1.bit_eq(v2))
    }
}

impl<K, V, B, C> FromIterator<(K, V)> for TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, B, C> Extend<(K, V)> for TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert_entry(k, v);
        }
    }
}

impl<'a, K, V, B, C> IntoIterator for &'a TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K>,
{
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrimError;
    use crate::traits::NumericMap;

    fn build<B: Balance>(keys: &[i32]) -> TreeMap<i32, i32, B> {
        let mut map = TreeMap::new();
        for &k in keys {
            map.put(k, k * 10);
        }
        map
    }

    fn navigation_scenario<B: Balance>() {
        let map = build::<B>(&[5, 3, 8, 1, 4]);
        map.check_invariants();
        assert_eq!(map.first_key(), Some(1));
        assert_eq!(map.last_key(), Some(8));
        assert_eq!(map.floor_key(6), 5);
        assert_eq!(map.ceiling_key(6), 8);
        assert_eq!(map.lower_key(5), 4);
        assert_eq!(map.higher_key(5), 8);
        assert_eq!(map.floor_key(5), 5);
        assert_eq!(map.ceiling_key(5), 5);
        assert_eq!(map.lower_key(1), i32::MIN);
        assert_eq!(map.higher_key(8), i32::MAX);
        assert_eq!(map.floor_entry(2), Some((1, 10)));
        assert_eq!(map.ceiling_entry(9), None);
    }

    #[test]
    fn test_avl_navigation() {
        navigation_scenario::<Avl>();
    }

    #[test]
    fn test_rb_navigation() {
        navigation_scenario::<RedBlack>();
    }

    fn churn<B: Balance>() {
        let mut map = TreeMap::<i64, i64, B>::new();
        // Deterministic pseudo-random permutation of 0..5000
        let keys: Vec<i64> = (0..5000).map(|i| (i * 2927) % 5000).collect();
        for &k in &keys {
            assert_eq!(map.insert(k, k), None);
        }
        map.check_invariants();
        assert_eq!(map.len(), 5000);
        for &k in keys.iter().step_by(2) {
            assert_eq!(map.remove_opt(k), Some(k));
        }
        map.check_invariants();
        assert_eq!(map.len(), 2500);
        for &k in keys.iter().skip(1).step_by(2) {
            assert_eq!(map.get(k), k);
        }
        let mut prev = i64::MIN;
        for k in map.keys() {
            assert!(k > prev);
            prev = k;
        }
    }

    #[test]
    fn test_avl_churn_keeps_invariants() {
        churn::<Avl>();
    }

    #[test]
    fn test_rb_churn_keeps_invariants() {
        churn::<RedBlack>();
    }

    #[test]
    fn test_balanced_heights() {
        let avl: AvlTreeMap<u32, u32> = (0..1023).map(|k| (k, k)).collect();
        let rb: RbTreeMap<u32, u32> = (0..1023).map(|k| (k, k)).collect();
        // Sequential inserts are the degenerate case for an unbalanced tree
        assert!(avl.height() <= 15);
        assert!(rb.height() <= 20);
        avl.check_invariants();
        rb.check_invariants();
    }

    #[test]
    fn test_empty_navigation() {
        let mut map = RbTreeMap::<i32, i32>::new();
        assert_eq!(map.first_key(), None);
        assert_eq!(map.last_entry(), None);
        assert_eq!(map.floor_key(3), i32::MIN);
        assert_eq!(map.ceiling_key(3), i32::MAX);
        assert_eq!(map.poll_first_entry(), None);
        map.set_default_min_value(-1);
        map.set_default_max_value(100);
        assert_eq!(map.lower_key(3), -1);
        assert_eq!(map.higher_key(3), 100);
    }

    #[test]
    fn test_poll_entries() {
        let mut map = build::<Avl>(&[2, 9, 4, 7]);
        assert_eq!(map.poll_first_entry(), Some((2, 20)));
        assert_eq!(map.poll_last_entry(), Some((9, 90)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![4, 7]);
        map.check_invariants();
    }

    #[test]
    fn test_default_return_value_and_numeric_ops() {
        let mut map = AvlTreeMap::<i32, f64>::new();
        map.set_default_return_value(f64::NAN);
        assert!(map.get(1).is_nan());
        assert!(map.put(1, 1.5).is_nan());
        assert_eq!(map.add_to(1, 1.0), 1.5);
        assert_eq!(map.get(1), 2.5);
        // A NaN result equals the default bit for bit and removes the key
        assert_eq!(map.compute(1, |_, _| f64::NAN).to_bits(), f64::NAN.to_bits());
        assert!(!map.contains_key(1));
    }

    #[test]
    fn test_custom_order() {
        let mut map = RbTreeMap::<i32, i32, _>::with_order(|a: i32, b: i32| b.cmp(&a));
        for k in 0..10 {
            map.put(k, k);
        }
        assert_eq!(map.keys().collect::<Vec<_>>(), (0..10).rev().collect::<Vec<_>>());
        assert_eq!(map.first_key(), Some(9));
        // Under the reversed order "lower" means numerically higher
        assert_eq!(map.lower_key(5), 6);
        map.check_invariants();
    }

    #[test]
    fn test_from_arrays_and_equality() {
        let a = AvlTreeMap::<i32, i32>::from_arrays(&[1, 2, 2], &[10, 20, 30]).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.get(2), 30);
        let b = RbTreeMap::<i32, i32>::from_map(&a);
        assert!(a == b);
        assert_eq!(format!("{:?}", a), "{1: 10, 2: 30}");
        assert_eq!(
            AvlTreeMap::<i32, i32>::from_arrays(&[1], &[]).unwrap_err(),
            PrimError::length_mismatch(1, 0)
        );
    }

    #[test]
    fn test_iteration_both_ways() {
        let map = build::<RedBlack>(&[3, 1, 2]);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(1, 10), (2, 20), (3, 30)]);
        assert_eq!(map.descending_keys().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(map.values().rev().collect::<Vec<_>>(), vec![30, 20, 10]);
        let mut iter = map.keys();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_fast_entries() {
        let mut map = build::<Avl>(&[1, 2, 3]);
        let mut entries = map.fast_entries();
        while let Some(mut e) = entries.next_entry() {
            let doubled = e.value() * 2;
            e.set_value(doubled);
        }
        assert_eq!(map.values().collect::<Vec<_>>(), vec![20, 40, 60]);
    }

    fn cursor_removal<B: Balance>() {
        let mut map = TreeMap::<i32, i32, B>::new();
        for k in 0..200 {
            map.put((k * 37) % 200, k);
        }
        let mut cursor = map.cursor();
        let mut seen = Vec::new();
        while let Some((k, _)) = cursor.next(&map).unwrap() {
            seen.push(k);
            if k % 3 == 0 {
                cursor.remove(&mut map).unwrap();
            }
        }
        assert_eq!(seen, (0..200).collect::<Vec<_>>());
        assert!(map.keys().all(|k| k % 3 != 0));
        map.check_invariants();
    }

    #[test]
    fn test_cursor_removal_avl() {
        cursor_removal::<Avl>();
    }

    #[test]
    fn test_cursor_removal_rb() {
        cursor_removal::<RedBlack>();
    }

    #[test]
    fn test_cursor_fails_fast() {
        let mut map = build::<Avl>(&[1, 2, 3]);
        let mut cursor = map.cursor();
        assert!(cursor.remove(&mut map).is_err());
        cursor.next(&map).unwrap();
        map.put(10, 1);
        assert!(matches!(
            cursor.next(&map),
            Err(PrimError::ConcurrentModification { .. })
        ));
    }

    #[test]
    fn test_retain_and_clear() {
        let mut map = build::<RedBlack>(&(0..100).collect::<Vec<_>>());
        map.retain(|k, _| k % 10 == 0);
        assert_eq!(map.len(), 10);
        map.check_invariants();
        let before = map.mod_count();
        map.clear();
        assert!(map.is_empty());
        assert!(map.mod_count() > before);
        assert_eq!(map.height(), 0);
    }
}
