//! Sorted sets backed by a tree map with unit values

use crate::error::Result;
use crate::primitive::Primitive;
use crate::traits::PrimitiveSet;
use crate::tree_map::avl::Avl;
use crate::tree_map::iter::{Keys, TreeCursor};
use crate::tree_map::node::{Balance, NIL};
use crate::tree_map::order::{KeyOrder, NaturalOrder};
use crate::tree_map::red_black::RedBlack;
use crate::tree_map::sorted_map::TreeMap;
use crate::tree_map::sub_map::Window;
use std::fmt;

/// Sorted set of primitive keys
///
/// Navigation returns `Option<K>`: a set has no natural sentinel to fall
/// back on.
#[derive(Clone)]
pub struct TreeSet<K, B, C = NaturalOrder> {
    pub(crate) map: TreeMap<K, (), B, C>,
}

/// AVL-balanced tree set
pub type AvlTreeSet<K, C = NaturalOrder> = TreeSet<K, Avl, C>;

/// Red/black-balanced tree set
pub type RbTreeSet<K, C = NaturalOrder> = TreeSet<K, RedBlack, C>;

impl<K, B, C> TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K> + Default,
{
    /// Create an empty set
    pub fn new() -> Self {
        Self { map: TreeMap::new() }
    }

    /// Build a set from a slice of keys
    pub fn from_slice(keys: &[K]) -> Self {
        keys.iter().copied().collect()
    }
}

impl<K, B, C> TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    /// Create an empty set with a custom key order
    pub fn with_order(order: C) -> Self {
        Self {
            map: TreeMap::with_order(order),
        }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Count of structural modifications so far
    pub fn mod_count(&self) -> u64 {
        self.map.mod_count()
    }

    fn key_at(&self, n: u32) -> Option<K> {
        (n != NIL).then(|| self.map.tree.key(n))
    }

    /// Smallest key
    pub fn first(&self) -> Option<K> {
        self.key_at(self.map.tree.first())
    }

    /// Largest key
    pub fn last(&self) -> Option<K> {
        self.key_at(self.map.tree.last())
    }

    /// Remove and return the smallest key
    pub fn poll_first(&mut self) -> Option<K> {
        self.map.poll_first_entry().map(|(k, _)| k)
    }

    /// Remove and return the largest key
    pub fn poll_last(&mut self) -> Option<K> {
        self.map.poll_last_entry().map(|(k, _)| k)
    }

    /// Greatest key strictly below `key`
    pub fn lower(&self, key: K) -> Option<K> {
        self.key_at(self.map.floor_node(key, false))
    }

    /// Greatest key at or below `key`
    pub fn floor(&self, key: K) -> Option<K> {
        self.key_at(self.map.floor_node(key, true))
    }

    /// Least key at or above `key`
    pub fn ceiling(&self, key: K) -> Option<K> {
        self.key_at(self.map.ceiling_node(key, true))
    }

    /// Least key strictly above `key`
    pub fn higher(&self, key: K) -> Option<K> {
        self.key_at(self.map.ceiling_node(key, false))
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.map.keys()
    }

    /// Iterate in descending order
    pub fn descending_iter(&self) -> std::iter::Rev<Keys<'_, K, ()>> {
        self.map.descending_keys()
    }

    /// Iterate over the keys from `from` to `to`
    ///
    /// Fails with `InvalidRange` when `from` comes after `to`.
    pub fn sub_set(&self, from: K, from_inclusive: bool, to: K, to_inclusive: bool) -> Result<Keys<'_, K, ()>> {
        let window = Window::full().sub_window(&self.map, from, from_inclusive, to, to_inclusive)?;
        Ok(Keys::new(window.iter(&self.map)))
    }

    /// Iterate over the keys below `to` (or up to it when `inclusive`)
    pub fn head_set(&self, to: K, inclusive: bool) -> Keys<'_, K, ()> {
        Keys::new(Window::head_of_full(to, inclusive).iter(&self.map))
    }

    /// Iterate over the keys above `from` (or from it on when `inclusive`)
    pub fn tail_set(&self, from: K, inclusive: bool) -> Keys<'_, K, ()> {
        Keys::new(Window::tail_of_full(from, inclusive).iter(&self.map))
    }

    /// Open a detached cursor positioned before the smallest key
    pub fn cursor(&self) -> TreeCursor {
        self.map.cursor()
    }

    /// Keep only the keys for which `f` returns true
    pub fn retain<F: FnMut(K) -> bool>(&mut self, mut f: F) {
        let doomed: Vec<K> = self.iter().filter(|&k| !f(k)).collect();
        for key in doomed {
            self.map.remove_key(key);
        }
    }
}

impl<K, B, C> PrimitiveSet<K> for TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    fn len(&self) -> usize {
        self.map.len()
    }

    fn add(&mut self, key: K) -> bool {
        self.map.insert_entry(key, ()).is_none()
    }

    fn contains(&self, key: K) -> bool {
        self.map.find(key) != NIL
    }

    fn remove(&mut self, key: K) -> bool {
        self.map.remove_key(key).is_some()
    }

    fn clear(&mut self) {
        self.map.clear_all();
    }

    fn for_each<F: FnMut(K)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl<K, B, C> Default for TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, B, C> fmt::Debug for TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, B, B2, C> PartialEq<TreeSet<K, B2, C>> for TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    B2: Balance,
    C: KeyOrder<K>,
{
    fn eq(&self, other: &TreeSet<K, B2, C>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.bit_eq(b))
    }
}

impl<K, B, C> FromIterator<K> for TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, B, C> Extend<K> for TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.map.insert_entry(key, ());
        }
    }
}

impl<'a, K, B, C> IntoIterator for &'a TreeSet<K, B, C>
where
    K: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    type Item = K;
    type IntoIter = Keys<'a, K, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrimError;

    #[test]
    fn test_basic_membership() {
        let mut set = AvlTreeSet::<i64>::new();
        assert!(set.add(5));
        assert!(set.add(1));
        assert!(!set.add(5));
        assert!(set.contains(1));
        assert!(!set.contains(2));
        assert!(set.remove(1));
        assert!(!set.remove(1));
        assert_eq!(set.len(), 1);
        assert!(set.add_all(&[7, 5, 3]));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 5, 7]);
    }

    #[test]
    fn test_navigation_returns_options() {
        let set = RbTreeSet::<i32>::from_slice(&[10, 20, 30]);
        assert_eq!(set.first(), Some(10));
        assert_eq!(set.last(), Some(30));
        assert_eq!(set.lower(10), None);
        assert_eq!(set.floor(15), Some(10));
        assert_eq!(set.ceiling(15), Some(20));
        assert_eq!(set.higher(30), None);
        assert_eq!(set.higher(20), Some(30));

        let empty = RbTreeSet::<i32>::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.floor(1), None);
    }

    #[test]
    fn test_poll_both_ends() {
        let mut set = AvlTreeSet::<u16>::from_slice(&[4, 2, 9]);
        assert_eq!(set.poll_first(), Some(2));
        assert_eq!(set.poll_last(), Some(9));
        assert_eq!(set.poll_last(), Some(4));
        assert_eq!(set.poll_first(), None);
    }

    #[test]
    fn test_range_iterators() {
        let set: AvlTreeSet<i32> = (0..10).collect();
        assert_eq!(set.sub_set(2, true, 5, false).unwrap().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(set.head_set(3, true).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(set.tail_set(7, false).collect::<Vec<_>>(), vec![8, 9]);
        assert_eq!(set.descending_iter().take(2).collect::<Vec<_>>(), vec![9, 8]);
        assert!(matches!(
            set.sub_set(5, true, 2, true),
            Err(PrimError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_cursor_over_set() {
        let mut set: RbTreeSet<i32> = (0..50).collect();
        let mut cursor = set.cursor();
        while let Some(k) = cursor.next_key(&set).unwrap() {
            if k % 2 == 1 {
                cursor.remove_key(&mut set).unwrap();
            }
        }
        assert_eq!(set.len(), 25);
        assert!(set.iter().all(|k| k % 2 == 0));
        set.map.check_invariants();

        let mut stale = set.cursor();
        set.add(100);
        assert!(stale.next_key(&set).is_err());
    }

    #[test]
    fn test_float_keys_use_total_order() {
        let set = AvlTreeSet::<f64>::from_slice(&[1.0, f64::NAN, -0.0, 0.0, f64::NEG_INFINITY]);
        assert_eq!(set.len(), 5);
        let keys: Vec<u64> = set.iter().map(f64::to_bits).collect();
        let expected: Vec<u64> = [f64::NEG_INFINITY, -0.0, 0.0, 1.0, f64::NAN]
            .iter()
            .map(|k| k.to_bits())
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_equality_and_debug() {
        let a = AvlTreeSet::<i8>::from_slice(&[3, 1, 2]);
        let b = RbTreeSet::<i8>::from_slice(&[1, 2, 3]);
        assert!(a == b);
        assert_eq!(format!("{:?}", a), "{1, 2, 3}");
        let mut c = a.clone();
        c.retain(|k| k != 2);
        assert!(c != a);
    }
}
