//! Open-addressing hash sets over primitive keys
//!
//! The same table as the maps with a zero-sized value array.

use crate::config::{Config, HashMapConfig};
use crate::error::Result;
use crate::hash_map::iter::{HashCursor, Iter, Keys};
use crate::hash_map::linked_hash_map::{InsertionOrder, LinkedCursor};
use crate::hash_map::strategy::{BitHashStrategy, HashStrategy};
use crate::hash_map::table::{RawTable, SlotOrder, Unordered, DEFAULT_LOAD_FACTOR, NIL};
use crate::primitive::Primitive;
use crate::traits::PrimitiveSet;
use std::fmt;

/// Open-addressing hash set, generic over its hash strategy and slot order
#[derive(Clone)]
pub struct OpenHashSet<K, S = BitHashStrategy, L = Unordered> {
    pub(crate) table: RawTable<K, (), S, L>,
}

/// Unordered hash set
pub type PrimHashSet<K, S = BitHashStrategy> = OpenHashSet<K, S, Unordered>;

/// Hash set iterating in insertion order, with O(1) reordering
pub type LinkedPrimHashSet<K, S = BitHashStrategy> = OpenHashSet<K, S, InsertionOrder>;

/// Iterator over the keys of a hash set
pub type SetIter<'a, K, S, L> = Keys<'a, K, (), S, L>;

impl<K, S, L> OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K> + Default,
    L: SlotOrder,
{
    /// Create an empty set sized for the default number of keys
    pub fn new() -> Self {
        Self::with_strategy(S::default())
    }

    /// Create an empty set able to hold `expected` keys without resizing
    pub fn with_capacity(expected: usize) -> Result<Self> {
        Self::with_capacity_and_load_factor(expected, DEFAULT_LOAD_FACTOR)
    }

    /// Create an empty set with an explicit load factor in `(0, 1]`
    pub fn with_capacity_and_load_factor(expected: usize, load_factor: f32) -> Result<Self> {
        Ok(Self {
            table: RawTable::new(expected, load_factor, S::default())?,
        })
    }

    /// Create an empty set from a validated configuration
    pub fn with_config(config: &HashMapConfig) -> Result<Self> {
        config.validate()?;
        Self::with_capacity_and_load_factor(config.initial_capacity, config.load_factor)
    }

    /// Build a set from a slice of keys
    pub fn from_slice(keys: &[K]) -> Result<Self> {
        let mut set = Self::with_capacity(keys.len())?;
        set.add_all(keys);
        Ok(set)
    }
}

impl<K, S, L> OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    /// Create an empty set with a custom hash strategy
    pub fn with_strategy(strategy: S) -> Self {
        Self { table: RawTable::with_defaults(strategy) }
    }

    /// Number of keys
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check whether the set is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Size of the probed region of the backing table
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Count of structural modifications so far
    pub fn mod_count(&self) -> u64 {
        self.table.mod_count()
    }

    /// Grow ahead of inserting up to `capacity` keys in total
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<()> {
        self.table.ensure_capacity(capacity)
    }

    /// Shrink the backing table to the smallest size holding the current keys
    pub fn trim(&mut self) -> bool {
        self.table.trim(0)
    }

    /// Shrink the backing table, keeping room for at least `expected` keys
    pub fn trim_to(&mut self, expected: usize) -> bool {
        self.table.trim(expected)
    }

    /// Iterate over keys
    pub fn iter(&self) -> SetIter<'_, K, S, L> {
        Keys::new(Iter::new(&self.table))
    }

    /// Keep only the keys for which `f` returns true
    pub fn retain<F: FnMut(K) -> bool>(&mut self, mut f: F) {
        let doomed: Vec<K> = self.iter().filter(|&k| !f(k)).collect();
        for key in doomed {
            self.table.remove(key);
        }
    }
}

impl<K, S, L> PrimitiveSet<K> for OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }

    fn add(&mut self, key: K) -> bool {
        self.table.insert(key, ()).is_none()
    }

    #[inline]
    fn contains(&self, key: K) -> bool {
        self.table.find(key).is_some()
    }

    fn remove(&mut self, key: K) -> bool {
        self.table.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.table.clear();
    }

    fn for_each<F: FnMut(K)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl<K, S> PrimHashSet<K, S>
where
    K: Primitive,
    S: HashStrategy<K>,
{
    /// Open a detached cursor positioned before the first key
    pub fn cursor(&self) -> HashCursor<K> {
        HashCursor::new(&self.table)
    }
}

impl<K: Primitive> HashCursor<K> {
    /// Advance and return the next key of `set`
    pub fn next_key<S: HashStrategy<K>>(&mut self, set: &PrimHashSet<K, S>) -> Result<Option<K>> {
        let table = &set.table;
        Ok(self.advance(table)?.map(|pos| table.key_at(pos)))
    }

    /// Remove the key returned by the last call to [`HashCursor::next_key`]
    pub fn remove_key<S: HashStrategy<K>>(&mut self, set: &mut PrimHashSet<K, S>) -> Result<()> {
        self.remove_current(&mut set.table)
    }
}

impl<K, S> LinkedPrimHashSet<K, S>
where
    K: Primitive,
    S: HashStrategy<K>,
{
    fn add_and_move(&mut self, key: K, front: bool) -> bool {
        match self.table.find(key) {
            Some(pos) => {
                if front {
                    self.table.move_to_front(pos);
                } else {
                    self.table.move_to_back(pos);
                }
                false
            }
            None => {
                self.table.insert_new(key, (), front);
                true
            }
        }
    }

    /// Add `key` (if absent) and make it the first key; returns true if it was new
    pub fn add_and_move_to_first(&mut self, key: K) -> bool {
        self.add_and_move(key, true)
    }

    /// Add `key` (if absent) and make it the last key; returns true if it was new
    pub fn add_and_move_to_last(&mut self, key: K) -> bool {
        self.add_and_move(key, false)
    }

    /// Make `key` the first key; returns whether it was present
    pub fn move_to_first(&mut self, key: K) -> bool {
        self.table
            .find(key)
            .map(|pos| self.table.move_to_front(pos))
            .is_some()
    }

    /// Make `key` the last key; returns whether it was present
    pub fn move_to_last(&mut self, key: K) -> bool {
        self.table
            .find(key)
            .map(|pos| self.table.move_to_back(pos))
            .is_some()
    }

    /// First key in iteration order
    pub fn first(&self) -> Option<K> {
        let pos = self.table.first_pos();
        (pos != NIL).then(|| self.table.key_at(pos))
    }

    /// Last key in iteration order
    pub fn last(&self) -> Option<K> {
        let pos = self.table.last_pos();
        (pos != NIL).then(|| self.table.key_at(pos))
    }

    fn poll_at(&mut self, pos: usize) -> Option<K> {
        if pos == NIL {
            return None;
        }
        let key = self.table.key_at(pos);
        self.table.remove_slot(pos);
        Some(key)
    }

    /// Remove and return the first key
    pub fn poll_first(&mut self) -> Option<K> {
        self.poll_at(self.table.first_pos())
    }

    /// Remove and return the last key
    pub fn poll_last(&mut self) -> Option<K> {
        self.poll_at(self.table.last_pos())
    }

    /// Open a detached bidirectional cursor positioned before the first key
    pub fn cursor(&self) -> LinkedCursor<K> {
        LinkedCursor::new(&self.table)
    }

    /// Open a detached cursor positioned just after `key`
    pub fn cursor_at(&self, key: K) -> Result<LinkedCursor<K>> {
        LinkedCursor::starting_at(&self.table, key)
    }
}

impl<K, S, L> Default for OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K> + Default,
    L: SlotOrder,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S, L> fmt::Debug for OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, S, L, L2> PartialEq<OpenHashSet<K, S, L2>> for OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
    L2: SlotOrder,
{
    fn eq(&self, other: &OpenHashSet<K, S, L2>) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K, S, L> FromIterator<K> for OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K> + Default,
    L: SlotOrder,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, S, L> Extend<K> for OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.table.insert(key, ());
        }
    }
}

impl<'a, K, S, L> IntoIterator for &'a OpenHashSet<K, S, L>
where
    K: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    type Item = K;
    type IntoIter = SetIter<'a, K, S, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrimError;

    #[test]
    fn test_basic_set_operations() {
        let mut set = PrimHashSet::<i64>::new();
        assert!(set.add(0));
        assert!(set.add(5));
        assert!(!set.add(5));
        assert!(set.contains(0));
        assert_eq!(set.len(), 2);
        assert!(set.remove(0));
        assert!(!set.remove(0));
        assert!(set.add_all(&[5, 6, 7]));
        assert!(!set.add_all(&[5, 6]));
        assert_eq!(set.len(), 3);
        set.retain(|k| k != 6);
        assert!(!set.contains(6));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_from_slice_and_equality() {
        let a = PrimHashSet::<u16>::from_slice(&[1, 2, 3, 3]).unwrap();
        let b: LinkedPrimHashSet<u16> = [3, 2, 1].into_iter().collect();
        assert_eq!(a.len(), 3);
        assert!(a == b);
        assert_eq!(format!("{:?}", b), "{3, 2, 1}");
    }

    #[test]
    fn test_linked_set_order() {
        let mut set: LinkedPrimHashSet<i32> = [1, 2, 3].into_iter().collect();
        assert!(set.move_to_first(3));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert!(!set.add_and_move_to_last(3));
        assert!(set.add_and_move_to_first(0));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(set.move_to_last(0));
        assert!(!set.move_to_last(9));
        assert_eq!(set.first(), Some(1));
        assert_eq!(set.last(), Some(0));
        assert_eq!(set.poll_first(), Some(1));
        assert_eq!(set.poll_last(), Some(0));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_set_cursors() {
        let mut set: PrimHashSet<i32> = (1..=20).collect();
        let mut cursor = set.cursor();
        let mut visited = 0;
        while let Some(k) = cursor.next_key(&set).unwrap() {
            visited += 1;
            if k % 2 == 0 {
                cursor.remove_key(&mut set).unwrap();
            }
        }
        assert_eq!(visited, 20);
        assert_eq!(set.len(), 10);

        let mut linked: LinkedPrimHashSet<i32> = (1..=5).collect();
        let mut cursor = linked.cursor_at(3).unwrap();
        assert_eq!(cursor.previous_key(&linked).unwrap(), Some(3));
        cursor.remove_key(&mut linked).unwrap();
        assert_eq!(cursor.next_key(&linked).unwrap(), Some(4));
        linked.add(10);
        assert!(matches!(
            cursor.next_key(&linked),
            Err(PrimError::ConcurrentModification { .. })
        ));
    }
}
