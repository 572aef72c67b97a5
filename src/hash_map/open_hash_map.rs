//! Open-addressing hash map over primitive keys and values
//!
//! [`OpenHashMap`] is the single generic engine behind [`PrimHashMap`] and
//! [`LinkedPrimHashMap`]. Keys and values are stored inline in flat arrays,
//! so no entry ever allocates.
//!
//! # Examples
//!
//! ```rust
//! use primkit::hash_map::PrimHashMap;
//! use primkit::traits::{DefaultReturnValue, PrimitiveMap};
//!
//! let mut map = PrimHashMap::<i32, i64>::new();
//! map.set_default_return_value(-1);
//! assert_eq!(map.get(42), -1);
//! assert_eq!(map.put(42, 7), -1);
//! assert_eq!(map.get(42), 7);
//! assert_eq!(map.remove(42), 7);
//! assert_eq!(map.get(42), -1);
//! ```

use crate::config::{Config, HashMapConfig};
use crate::error::{check_parallel_arrays, Result};
use crate::hash_map::iter::{FastEntries, HashCursor, Iter, IterMut, Keys, Values};
use crate::hash_map::linked_hash_map::InsertionOrder;
use crate::hash_map::strategy::{BitHashStrategy, HashStrategy};
use crate::hash_map::table::{RawTable, SlotOrder, Unordered, DEFAULT_LOAD_FACTOR};
use crate::primitive::Primitive;
use crate::traits::{DefaultReturnValue, PrimitiveMap};
use std::fmt;

/// Open-addressing hash map, generic over its hash strategy and slot order
///
/// Use the aliases [`PrimHashMap`] (unordered) and [`LinkedPrimHashMap`]
/// (insertion ordered) rather than naming `L` directly.
#[derive(Clone)]
pub struct OpenHashMap<K, V, S = BitHashStrategy, L = Unordered> {
    pub(crate) table: RawTable<K, V, S, L>,
    default_value: V,
}

/// Unordered hash map
pub type PrimHashMap<K, V, S = BitHashStrategy> = OpenHashMap<K, V, S, Unordered>;

/// Hash map iterating in insertion order, with O(1) reordering
pub type LinkedPrimHashMap<K, V, S = BitHashStrategy> = OpenHashMap<K, V, S, InsertionOrder>;

impl<K, V, S, L> OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K> + Default,
    L: SlotOrder,
{
    /// Create an empty map sized for the default number of entries
    pub fn new() -> Self {
        Self::with_strategy(S::default())
    }

    /// Create an empty map able to hold `expected` entries without resizing
    pub fn with_capacity(expected: usize) -> Result<Self> {
        Self::with_capacity_and_load_factor(expected, DEFAULT_LOAD_FACTOR)
    }

    /// Create an empty map with an explicit load factor in `(0, 1]`
    pub fn with_capacity_and_load_factor(expected: usize, load_factor: f32) -> Result<Self> {
        Self::with_capacity_load_factor_and_strategy(expected, load_factor, S::default())
    }

    /// Create an empty map from a validated configuration
    pub fn with_config(config: &HashMapConfig) -> Result<Self> {
        config.validate()?;
        Self::with_capacity_and_load_factor(config.initial_capacity, config.load_factor)
    }

    /// Build a map from parallel key/value arrays
    ///
    /// Later duplicates overwrite earlier ones.
    pub fn from_arrays(keys: &[K], values: &[V]) -> Result<Self> {
        check_parallel_arrays(keys.len(), values.len())?;
        let mut map = Self::with_capacity(keys.len())?;
        for (&k, &v) in keys.iter().zip(values) {
            map.table.insert(k, v);
        }
        Ok(map)
    }

    /// Copy every mapping of another primitive map
    pub fn from_map<M: PrimitiveMap<K, V> + ?Sized>(other: &M) -> Self {
        let mut map = Self::new();
        // Pre-sizing only fails for sizes no existing map can have
        let _ = map.table.ensure_capacity(other.len());
        other.for_each(|k, v| {
            map.table.insert(k, v);
        });
        map
    }
}

impl<K, V, S, L> OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    /// Create an empty map with a custom hash strategy
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            table: RawTable::with_defaults(strategy),
            default_value: V::ZERO,
        }
    }

    /// Create an empty pre-sized map with a custom hash strategy
    pub fn with_capacity_and_strategy(expected: usize, strategy: S) -> Result<Self> {
        Self::with_capacity_load_factor_and_strategy(expected, DEFAULT_LOAD_FACTOR, strategy)
    }

    /// Create an empty map with every construction parameter explicit
    pub fn with_capacity_load_factor_and_strategy(
        expected: usize,
        load_factor: f32,
        strategy: S,
    ) -> Result<Self> {
        Ok(Self {
            table: RawTable::new(expected, load_factor, strategy)?,
            default_value: V::ZERO,
        })
    }

    /// Number of mappings
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check whether the map is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Size of the probed region of the backing table
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Load factor fixed at construction
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// The hash strategy in use
    pub fn strategy(&self) -> &S {
        self.table.strategy()
    }

    /// Count of structural modifications so far
    pub fn mod_count(&self) -> u64 {
        self.table.mod_count()
    }

    /// Grow ahead of inserting up to `capacity` entries in total
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<()> {
        self.table.ensure_capacity(capacity)
    }

    /// Shrink the backing table to the smallest size holding the current entries
    pub fn trim(&mut self) -> bool {
        self.table.trim(0)
    }

    /// Shrink the backing table, keeping room for at least `expected` entries
    pub fn trim_to(&mut self, expected: usize) -> bool {
        self.table.trim(expected)
    }

    /// Iterate over `(key, value)` pairs
    pub fn iter(&self) -> Iter<'_, K, V, S, L> {
        Iter::new(&self.table)
    }

    /// Iterate over keys
    pub fn keys(&self) -> Keys<'_, K, V, S, L> {
        Keys::new(self.iter())
    }

    /// Iterate over values
    pub fn values(&self) -> Values<'_, K, V, S, L> {
        Values::new(self.iter())
    }

    /// Iterate over `(key, &mut value)` pairs in slot order
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.table.len();
        let (keys, values, contains_null_key) = self.table.slots_mut();
        IterMut::new(keys, values, contains_null_key, len)
    }

    /// Mutable references to every value, in slot order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Lending iterator over reusable mutable entries, in iteration order
    pub fn fast_entries(&mut self) -> FastEntries<'_, K, V, S, L> {
        FastEntries::new(&mut self.table)
    }
}

impl<K, V, S> OpenHashMap<K, V, S, Unordered>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
{
    /// Open a detached cursor positioned before the first entry
    pub fn cursor(&self) -> HashCursor<K> {
        HashCursor::new(&self.table)
    }
}

impl<K: Primitive> HashCursor<K> {
    /// Advance and return the next entry
    ///
    /// Fails with `ConcurrentModification` when `map` was structurally
    /// modified other than through this cursor.
    #[allow(clippy::should_implement_trait)]
    pub fn next<V, S>(&mut self, map: &PrimHashMap<K, V, S>) -> Result<Option<(K, V)>>
    where
        V: Primitive,
        S: HashStrategy<K>,
    {
        let table = &map.table;
        Ok(self
            .advance(table)?
            .map(|pos| (table.key_at(pos), table.value_at(pos))))
    }

    /// Remove the entry returned by the last call to [`HashCursor::next`]
    ///
    /// Fails with `IllegalState` when there is no such entry, including a
    /// second `remove` without an intervening `next`.
    pub fn remove<V, S>(&mut self, map: &mut PrimHashMap<K, V, S>) -> Result<V>
    where
        V: Primitive,
        S: HashStrategy<K>,
    {
        self.remove_current(&mut map.table)
    }
}

impl<K, V, S, L> DefaultReturnValue<V> for OpenHashMap<K, V, S, L>
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

impl<K, V, S, L> PrimitiveMap<K, V> for OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    fn get_opt(&self, key: K) -> Option<V> {
        self.table.find(key).map(|pos| self.table.value_at(pos))
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let pos = self.table.find(key)?;
        Some(self.table.value_mut(pos))
    }

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key, value)
    }

    #[inline]
    fn remove_opt(&mut self, key: K) -> Option<V> {
        self.table.remove(key)
    }

    fn clear(&mut self) {
        self.table.clear();
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
            self.table.remove(key);
        }
    }

    fn contains_value(&self, value: V) -> bool {
        self.values().any(|v| v.bit_eq(value))
    }
}

impl<K, V, S, L> Default for OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K> + Default,
    L: SlotOrder,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S, L> fmt::Debug for OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal when they hold the same mappings, whatever their order
impl<K, V, S, L, L2> PartialEq<OpenHashMap<K, V, S, L2>> for OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
    L2: SlotOrder,
{
    fn eq(&self, other: &OpenHashMap<K, V, S, L2>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get_opt(k).is_some_and(|o| o.bit_eq(v)))
    }
}

impl<K, V, S, L> FromIterator<(K, V)> for OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K> + Default,
    L: SlotOrder,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S, L> Extend<(K, V)> for OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        // A failed pre-size only means the table grows step by step
        let _ = self.table.ensure_capacity(self.table.len() + lower);
        for (k, v) in iter {
            self.table.insert(k, v);
        }
    }
}

impl<'a, K, V, S, L> IntoIterator for &'a OpenHashMap<K, V, S, L>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V, S, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrimError;
    use crate::hash_map::strategy::FnHashStrategy;
    use crate::traits::NumericMap;
    use std::collections::HashSet;

    #[test]
    fn test_default_return_value_protocol() {
        let mut map = PrimHashMap::<i32, i32>::new();
        map.set_default_return_value(-1);
        assert_eq!(map.get(42), -1);
        assert_eq!(map.put(42, 7), -1);
        assert_eq!(map.get(42), 7);
        assert_eq!(map.remove(42), 7);
        assert_eq!(map.get(42), -1);
        assert_eq!(map.remove(42), -1);
    }

    #[test]
    fn test_zero_key_is_a_regular_key() {
        let mut map = PrimHashMap::<i64, i64>::new();
        assert!(!map.contains_key(0));
        map.put(0, 9);
        map.put(1, 10);
        assert!(map.contains_key(0));
        assert_eq!(map.get(0), 9);
        assert_eq!(map.len(), 2);
        let keys: HashSet<i64> = map.keys().collect();
        assert_eq!(keys, HashSet::from([0, 1]));
        assert_eq!(map.remove(0), 9);
        assert!(!map.contains_key(0));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_float_keys_use_bit_equality() {
        let mut map = PrimHashMap::<f64, f64>::new();
        map.put(f64::NAN, 1.0);
        map.put(-0.0, 2.0);
        map.put(0.0, 3.0);
        assert_eq!(map.get(f64::NAN), 1.0);
        assert_eq!(map.get(-0.0), 2.0);
        assert_eq!(map.get(0.0), 3.0);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_from_arrays() {
        let map = PrimHashMap::<i32, i32>::from_arrays(&[1, 2, 2], &[10, 20, 30]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(2), 30);
        assert_eq!(
            PrimHashMap::<i32, i32>::from_arrays(&[1, 2], &[1]).unwrap_err(),
            PrimError::length_mismatch(2, 1)
        );
    }

    #[test]
    fn test_invalid_construction() {
        assert!(PrimHashMap::<i32, i32>::with_capacity_and_load_factor(10, 0.0).is_err());
        assert!(PrimHashMap::<i32, i32>::with_capacity_and_load_factor(10, 1.1).is_err());
        assert!(PrimHashMap::<i32, i32>::with_capacity(usize::MAX / 4).is_err());
        assert!(PrimHashMap::<i32, i32>::with_capacity_and_load_factor(10, 1.0).is_ok());
    }

    #[test]
    fn test_full_load_factor_reserves_expected_entries() {
        let mut map = PrimHashMap::<i32, i32>::with_capacity_and_load_factor(64, 1.0).unwrap();
        let capacity = map.capacity();
        for k in 0..64 {
            map.put(k, k);
        }
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.len(), 64);
    }

    #[test]
    fn test_growth_and_trim() {
        let mut map = PrimHashMap::<u32, u32>::new();
        for k in 0..10_000 {
            map.put(k, k + 1);
        }
        assert_eq!(map.len(), 10_000);
        for k in 0..10_000 {
            assert_eq!(map.get(k), k + 1);
        }
        map.retain(|k, _| k < 10);
        assert_eq!(map.len(), 10);
        assert!(map.trim());
        assert!(map.capacity() <= 32);
        for k in 0..10 {
            assert_eq!(map.get(k), k + 1);
        }
        map.table.check_invariants();
    }

    #[test]
    fn test_compute_family() {
        let mut map = PrimHashMap::<i32, i32>::new();
        assert_eq!(map.compute(1, |_, v| v + 5), 5);
        assert_eq!(map.compute(1, |_, v| v * 2), 10);
        assert_eq!(map.compute(1, |_, _| 0), 0);
        assert!(!map.contains_key(1));

        assert_eq!(map.compute_if_absent(2, |k| k * 100), 200);
        assert_eq!(map.compute_if_absent(2, |_| 1), 200);
        assert_eq!(map.compute_if_absent(3, |_| 0), 0);
        assert!(!map.contains_key(3));

        assert_eq!(map.compute_if_present(4, |_, v| v + 1), 0);
        assert!(!map.contains_key(4));
        assert_eq!(map.compute_if_present(2, |_, v| v + 1), 201);
        assert_eq!(map.compute_if_present(2, |_, _| 0), 0);
        assert!(map.is_empty());

        assert_eq!(map.merge(5, 3, |a, b| a + b), 3);
        assert_eq!(map.merge(5, 4, |a, b| a + b), 7);
        assert_eq!(map.merge(5, 7, |a, b| a - b), 0);
        assert!(!map.contains_key(5));
    }

    #[test]
    fn test_compute_panic_leaves_map_unchanged() {
        let mut map = PrimHashMap::<i32, i32>::new();
        map.put(1, 1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            map.compute(2, |_, _| panic!("boom"));
        }));
        assert!(result.is_err());
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(2));
    }

    #[test]
    fn test_conditional_updates() {
        let mut map = PrimHashMap::<i32, i32>::new();
        assert_eq!(map.put_if_absent(1, 10), 0);
        assert_eq!(map.put_if_absent(1, 11), 10);
        assert!(!map.replace_if_value(1, 11, 12));
        assert!(map.replace_if_value(1, 10, 12));
        assert_eq!(map.replace(1, 13), 12);
        assert_eq!(map.replace(2, 13), 0);
        assert!(!map.contains_key(2));
        assert!(!map.remove_if_value(1, 12));
        assert!(map.remove_if_value(1, 13));
        assert!(map.is_empty());
        assert_eq!(map.get_or_default(1, 77), 77);
    }

    #[test]
    fn test_add_to_and_sub_from() {
        let mut map = PrimHashMap::<i32, i64>::new();
        assert_eq!(map.add_to(1, 5), 0);
        assert_eq!(map.add_to(1, 5), 5);
        assert_eq!(map.get(1), 10);
        assert_eq!(map.sub_from(1, 4), 10);
        assert_eq!(map.get(1), 6);
        assert_eq!(map.sub_from(1, 6), 6);
        assert!(!map.contains_key(1));
        assert_eq!(map.sub_from(9, 1), 0);
        assert!(!map.contains_key(9));
    }

    #[test]
    fn test_bulk_inserts() {
        let mut map = PrimHashMap::<i32, i32>::new();
        map.put_all_arrays(&[1, 2, 3], &[4, 5, 6]).unwrap();
        assert_eq!(map.len(), 3);
        map.put_all_slices(&[7, 8, 9, 10], &[1, 1, 1, 1], 1, 2).unwrap();
        assert!(map.contains_key(8) && map.contains_key(9));
        assert!(!map.contains_key(7) && !map.contains_key(10));
        assert!(map.put_all_slices(&[1, 2], &[1, 2], 1, 2).is_err());

        let mut other = PrimHashMap::<i32, i32>::new();
        other.put_all(&map);
        assert_eq!(other, map);
        let copy = PrimHashMap::<i32, i32>::from_map(&map);
        assert_eq!(copy, map);
    }

    #[test]
    fn test_iterators() {
        let map: PrimHashMap<i32, i32> = (0..100).map(|k| (k, k * 2)).collect();
        assert_eq!(map.iter().len(), 100);
        let forward: Vec<(i32, i32)> = map.iter().collect();
        let mut backward: Vec<(i32, i32)> = map.iter().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(map.keys().map(i64::from).sum::<i64>(), 4950);
        assert_eq!(map.values().map(i64::from).sum::<i64>(), 9900);
        // Zero key comes first
        assert_eq!(map.keys().next(), Some(0));
    }

    #[test]
    fn test_iter_mut_and_fast_entries() {
        let mut map: PrimHashMap<i32, i32> = (0..50).map(|k| (k, k)).collect();
        for (_, v) in map.iter_mut() {
            *v += 1;
        }
        for v in map.values_mut() {
            *v *= 2;
        }
        let mut entries = map.fast_entries();
        let mut seen = 0;
        while let Some(mut entry) = entries.next_entry() {
            assert_eq!(entry.value(), (entry.key() + 1) * 2);
            entry.set_value(entry.key());
            seen += 1;
        }
        assert_eq!(seen, 50);
        for k in 0..50 {
            assert_eq!(map.get(k), k);
        }
    }

    #[test]
    fn test_cursor_remove_visits_every_entry_once() {
        // Full-ish table with load factor 1.0 produces wrapped clusters
        let mut map = PrimHashMap::<i32, i32>::with_capacity_and_load_factor(63, 1.0).unwrap();
        for k in 0..63 {
            map.put(k * 64, k);
        }
        let mut cursor = map.cursor();
        let mut seen = HashSet::new();
        while let Some((k, _)) = cursor.next(&map).unwrap() {
            assert!(seen.insert(k), "key {} visited twice", k);
            if k % 128 == 0 {
                cursor.remove(&mut map).unwrap();
            }
        }
        assert_eq!(seen.len(), 63);
        assert!(map.iter().all(|(k, _)| k % 128 != 0));
        map.table.check_invariants();
    }

    #[test]
    fn test_cursor_fails_fast() {
        let mut map: PrimHashMap<i32, i32> = (1..10).map(|k| (k, k)).collect();
        let mut cursor = map.cursor();
        assert!(cursor.next(&map).unwrap().is_some());
        map.put(100, 1);
        assert!(matches!(
            cursor.next(&map),
            Err(PrimError::ConcurrentModification { .. })
        ));
    }

    #[test]
    fn test_cursor_remove_twice_is_illegal() {
        let mut map: PrimHashMap<i32, i32> = (1..10).map(|k| (k, k)).collect();
        let mut cursor = map.cursor();
        assert!(matches!(cursor.remove(&mut map), Err(PrimError::IllegalState { .. })));
        cursor.next(&map).unwrap();
        cursor.remove(&mut map).unwrap();
        assert!(matches!(cursor.remove(&mut map), Err(PrimError::IllegalState { .. })));
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn test_value_overwrite_is_not_structural() {
        let mut map: PrimHashMap<i32, i32> = (1..10).map(|k| (k, k)).collect();
        let mut cursor = map.cursor();
        cursor.next(&map).unwrap();
        map.put(1, 100);
        assert!(cursor.next(&map).is_ok());
    }

    #[test]
    fn test_custom_strategy() {
        let strategy = FnHashStrategy::new(
            |k: i32| k.unsigned_abs() as u64,
            |a: i32, b: i32| a.abs() == b.abs(),
        );
        let mut map = PrimHashMap::<i32, i32, _>::with_strategy(strategy);
        map.put(-3, 1);
        assert_eq!(map.put(3, 2), 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(-3), 2);
    }

    #[test]
    fn test_debug_and_equality() {
        let a: PrimHashMap<i32, i32> = [(1, 2)].into_iter().collect();
        let b: LinkedPrimHashMap<i32, i32> = [(1, 2)].into_iter().collect();
        assert_eq!(format!("{:?}", a), "{1: 2}");
        assert!(a == b);
        let c = a.clone();
        assert_eq!(a, c);
    }

    #[test]
    fn test_with_config() {
        let config = HashMapConfig { initial_capacity: 100, load_factor: 0.5 };
        let map = PrimHashMap::<i32, i32>::with_config(&config).unwrap();
        assert!(map.capacity() >= 200);
        assert_eq!(map.load_factor(), 0.5);
        let bad = HashMapConfig { initial_capacity: 1, load_factor: 2.0 };
        assert!(PrimHashMap::<i32, i32>::with_config(&bad).is_err());
    }
}
