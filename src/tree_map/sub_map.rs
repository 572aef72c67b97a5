//! Live range views over tree maps
//!
//! A view is a [`Window`] of key bounds plus a direction, applied to the
//! borrowed map on every call. Nothing is copied: inserts and removals made
//! through a [`SubMapMut`] land in the underlying tree, and a [`SubMap`]
//! always reflects the tree it borrows.
//!
//! Directional navigation is mirrored for descending views: `first` is the
//! greatest key in range, `lower` looks towards greater keys, and the miss
//! sentinels of `lower`/`floor` and `ceiling`/`higher` swap accordingly.

use crate::error::{PrimError, Result};
use crate::primitive::Primitive;
use crate::traits::NavigableMap;
use crate::tree_map::iter::{Iter, Keys, Values};
use crate::tree_map::node::{Balance, NIL};
use crate::tree_map::order::{KeyOrder, NaturalOrder};
use crate::tree_map::sorted_map::TreeMap;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

#[inline]
fn bound<K>(key: K, inclusive: bool) -> Bound<K> {
    if inclusive {
        Bound::Included(key)
    } else {
        Bound::Excluded(key)
    }
}

/// Key bounds and direction of a range view
#[derive(Debug, Clone, Copy)]
pub(crate) struct Window<K> {
    lo: Bound<K>,
    hi: Bound<K>,
    descending: bool,
}

impl<K: Primitive> Window<K> {
    pub(crate) fn full() -> Self {
        Self {
            lo: Bound::Unbounded,
            hi: Bound::Unbounded,
            descending: false,
        }
    }

    pub(crate) fn is_descending(&self) -> bool {
        self.descending
    }

    pub(crate) fn reversed(self) -> Self {
        Self {
            descending: !self.descending,
            ..self
        }
    }

    fn too_low<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> bool
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        match self.lo {
            Bound::Unbounded => false,
            Bound::Included(lo) => map.compare(key, lo) == Ordering::Less,
            Bound::Excluded(lo) => map.compare(key, lo) != Ordering::Greater,
        }
    }

    fn too_high<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> bool
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        match self.hi {
            Bound::Unbounded => false,
            Bound::Included(hi) => map.compare(key, hi) == Ordering::Greater,
            Bound::Excluded(hi) => map.compare(key, hi) != Ordering::Less,
        }
    }

    pub(crate) fn in_range<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> bool
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        !self.too_low(map, key) && !self.too_high(map, key)
    }

    /// Like `in_range`, but treating both bounds as inclusive
    fn in_closed_range<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> bool
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        let above_lo = match self.lo {
            Bound::Unbounded => true,
            Bound::Included(lo) | Bound::Excluded(lo) => map.compare(key, lo) != Ordering::Less,
        };
        let below_hi = match self.hi {
            Bound::Unbounded => true,
            Bound::Included(hi) | Bound::Excluded(hi) => map.compare(key, hi) != Ordering::Greater,
        };
        above_lo && below_hi
    }

    fn check_inside<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K, inclusive: bool) -> Result<()>
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        let inside = if inclusive {
            self.in_range(map, key)
        } else {
            self.in_closed_range(map, key)
        };
        if !inside {
            return Err(PrimError::invalid_range(format!(
                "bound {:?} lies outside the enclosing range",
                key
            )));
        }
        Ok(())
    }

    fn abs_lowest<V, B, C>(&self, map: &TreeMap<K, V, B, C>) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        let n = match self.lo {
            Bound::Unbounded => map.tree.first(),
            Bound::Included(lo) => map.ceiling_node(lo, true),
            Bound::Excluded(lo) => map.ceiling_node(lo, false),
        };
        if n == NIL || self.too_high(map, map.tree.key(n)) {
            NIL
        } else {
            n
        }
    }

    fn abs_highest<V, B, C>(&self, map: &TreeMap<K, V, B, C>) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        let n = match self.hi {
            Bound::Unbounded => map.tree.last(),
            Bound::Included(hi) => map.floor_node(hi, true),
            Bound::Excluded(hi) => map.floor_node(hi, false),
        };
        if n == NIL || self.too_low(map, map.tree.key(n)) {
            NIL
        } else {
            n
        }
    }

    fn abs_ceiling<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K, inclusive: bool) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.too_low(map, key) {
            return self.abs_lowest(map);
        }
        let n = map.ceiling_node(key, inclusive);
        if n == NIL || self.too_high(map, map.tree.key(n)) {
            NIL
        } else {
            n
        }
    }

    fn abs_floor<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K, inclusive: bool) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.too_high(map, key) {
            return self.abs_highest(map);
        }
        let n = map.floor_node(key, inclusive);
        if n == NIL || self.too_low(map, map.tree.key(n)) {
            NIL
        } else {
            n
        }
    }

    pub(crate) fn first<V, B, C>(&self, map: &TreeMap<K, V, B, C>) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.descending {
            self.abs_highest(map)
        } else {
            self.abs_lowest(map)
        }
    }

    pub(crate) fn last<V, B, C>(&self, map: &TreeMap<K, V, B, C>) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.descending {
            self.abs_lowest(map)
        } else {
            self.abs_highest(map)
        }
    }

    pub(crate) fn lower<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.descending {
            self.abs_ceiling(map, key, false)
        } else {
            self.abs_floor(map, key, false)
        }
    }

    pub(crate) fn floor<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.descending {
            self.abs_ceiling(map, key, true)
        } else {
            self.abs_floor(map, key, true)
        }
    }

    pub(crate) fn ceiling<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.descending {
            self.abs_floor(map, key, true)
        } else {
            self.abs_ceiling(map, key, true)
        }
    }

    pub(crate) fn higher<V, B, C>(&self, map: &TreeMap<K, V, B, C>, key: K) -> u32
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        if self.descending {
            self.abs_floor(map, key, false)
        } else {
            self.abs_ceiling(map, key, false)
        }
    }

    pub(crate) fn iter<'m, V, B, C>(&self, map: &'m TreeMap<K, V, B, C>) -> Iter<'m, K, V>
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        Iter::between(&map.tree, self.abs_lowest(map), self.abs_highest(map), self.descending)
    }

    /// Narrow to `[from, to]` given in this window's direction
    pub(crate) fn sub_window<V, B, C>(
        &self,
        map: &TreeMap<K, V, B, C>,
        from: K,
        from_inclusive: bool,
        to: K,
        to_inclusive: bool,
    ) -> Result<Self>
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        let (lo, lo_inclusive, hi, hi_inclusive) = if self.descending {
            (to, to_inclusive, from, from_inclusive)
        } else {
            (from, from_inclusive, to, to_inclusive)
        };
        if map.compare(lo, hi) == Ordering::Greater {
            return Err(PrimError::invalid_range(format!(
                "from key {:?} comes after to key {:?}",
                from, to
            )));
        }
        self.check_inside(map, lo, lo_inclusive)?;
        self.check_inside(map, hi, hi_inclusive)?;
        Ok(Self {
            lo: bound(lo, lo_inclusive),
            hi: bound(hi, hi_inclusive),
            descending: self.descending,
        })
    }

    /// Keep the part of this window before `to` (in this window's direction)
    pub(crate) fn head_window<V, B, C>(&self, map: &TreeMap<K, V, B, C>, to: K, inclusive: bool) -> Result<Self>
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        self.check_inside(map, to, inclusive)?;
        Ok(if self.descending {
            Self { lo: bound(to, inclusive), ..*self }
        } else {
            Self { hi: bound(to, inclusive), ..*self }
        })
    }

    /// Keep the part of this window from `from` on (in this window's direction)
    pub(crate) fn tail_window<V, B, C>(&self, map: &TreeMap<K, V, B, C>, from: K, inclusive: bool) -> Result<Self>
    where
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        self.check_inside(map, from, inclusive)?;
        Ok(if self.descending {
            Self { hi: bound(from, inclusive), ..*self }
        } else {
            Self { lo: bound(from, inclusive), ..*self }
        })
    }

    pub(crate) fn head_of_full(to: K, inclusive: bool) -> Self {
        Self { hi: bound(to, inclusive), ..Self::full() }
    }

    pub(crate) fn tail_of_full(from: K, inclusive: bool) -> Self {
        Self { lo: bound(from, inclusive), ..Self::full() }
    }
}

/// Read-only live view of a key range of a [`TreeMap`]
pub struct SubMap<'a, K, V, B, C = NaturalOrder> {
    map: &'a TreeMap<K, V, B, C>,
    window: Window<K>,
}

impl<K: Copy, V, B, C> Clone for SubMap<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            window: self.window,
        }
    }
}

impl<'a, K, V, B, C> SubMap<'a, K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K>,
{
    pub(crate) fn new(map: &'a TreeMap<K, V, B, C>, window: Window<K>) -> Self {
        Self { map, window }
    }

    /// Check whether this view iterates from greatest to least key
    pub fn is_descending(&self) -> bool {
        self.window.is_descending()
    }

    /// Check whether `key` falls inside the view's bounds
    pub fn in_range(&self, key: K) -> bool {
        self.window.in_range(self.map, key)
    }

    /// Number of mappings in range (walks the range)
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check whether no mapping falls in range
    pub fn is_empty(&self) -> bool {
        self.window.first(self.map) == NIL
    }

    /// Look up `key`, returning `None` when absent or out of range
    pub fn get_opt(&self, key: K) -> Option<V> {
        if !self.in_range(key) {
            return None;
        }
        let n = self.map.find(key);
        (n != NIL).then(|| self.map.tree.value(n))
    }

    /// Check whether `key` is mapped and in range
    pub fn contains_key(&self, key: K) -> bool {
        self.get_opt(key).is_some()
    }

    /// Iterate over the mappings in range, in view order
    pub fn iter(&self) -> Iter<'a, K, V> {
        self.window.iter(self.map)
    }

    /// Iterate over the keys in range, in view order
    pub fn keys(&self) -> Keys<'a, K, V> {
        Keys::new(self.iter())
    }

    /// Iterate over the values in range, in view order
    pub fn values(&self) -> Values<'a, K, V> {
        Values::new(self.iter())
    }

    /// Nested view over `from..to`, bounds given in this view's direction
    pub fn sub_map(&self, from: K, from_inclusive: bool, to: K, to_inclusive: bool) -> Result<Self> {
        let window = self
            .window
            .sub_window(self.map, from, from_inclusive, to, to_inclusive)?;
        Ok(Self::new(self.map, window))
    }

    /// Nested view over the keys before `to`
    pub fn head_map(&self, to: K, inclusive: bool) -> Result<Self> {
        let window = self.window.head_window(self.map, to, inclusive)?;
        Ok(Self::new(self.map, window))
    }

    /// Nested view over the keys from `from` on
    pub fn tail_map(&self, from: K, inclusive: bool) -> Result<Self> {
        let window = self.window.tail_window(self.map, from, inclusive)?;
        Ok(Self::new(self.map, window))
    }

    /// The same range traversed in the opposite direction
    pub fn descending_map(&self) -> Self {
        Self::new(self.map, self.window.reversed())
    }

    fn entry_at(&self, n: u32) -> Option<(K, V)> {
        (n != NIL).then(|| self.map.tree.entry(n))
    }
}

impl<K, V, B, C> SubMap<'_, K, V, B, C>
where
    K: Primitive,
    V: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    /// Look up `key`, returning the map's default return value when absent
    /// or out of range
    pub fn get(&self, key: K) -> V {
        self.get_opt(key).unwrap_or(self.map.default_value)
    }
}

impl<K, V, B, C> NavigableMap<K, V> for SubMap<'_, K, V, B, C>
where
    K: Primitive,
    V: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    fn default_min_value(&self) -> K {
        if self.is_descending() {
            self.map.default_max
        } else {
            self.map.default_min
        }
    }

    fn default_max_value(&self) -> K {
        if self.is_descending() {
            self.map.default_min
        } else {
            self.map.default_max
        }
    }

    fn first_entry(&self) -> Option<(K, V)> {
        self.entry_at(self.window.first(self.map))
    }

    fn last_entry(&self) -> Option<(K, V)> {
        self.entry_at(self.window.last(self.map))
    }

    fn lower_entry(&self, key: K) -> Option<(K, V)> {
        self.entry_at(self.window.lower(self.map, key))
    }

    fn floor_entry(&self, key: K) -> Option<(K, V)> {
        self.entry_at(self.window.floor(self.map, key))
    }

    fn ceiling_entry(&self, key: K) -> Option<(K, V)> {
        self.entry_at(self.window.ceiling(self.map, key))
    }

    fn higher_entry(&self, key: K) -> Option<(K, V)> {
        self.entry_at(self.window.higher(self.map, key))
    }
}

impl<K, V, B, C> fmt::Debug for SubMap<'_, K, V, B, C>
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

/// Mutable live view of a key range of a [`TreeMap`]
///
/// Writes outside the range are rejected with
/// [`PrimError::KeyOutOfRange`]; removals of out-of-range keys are no-ops.
pub struct SubMapMut<'a, K, V, B, C = NaturalOrder> {
    map: &'a mut TreeMap<K, V, B, C>,
    window: Window<K>,
}

impl<'a, K, V, B, C> SubMapMut<'a, K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K>,
{
    pub(crate) fn new(map: &'a mut TreeMap<K, V, B, C>, window: Window<K>) -> Self {
        Self { map, window }
    }

    /// Read-only view of the same range
    pub fn as_view(&self) -> SubMap<'_, K, V, B, C> {
        SubMap::new(self.map, self.window)
    }

    /// Check whether this view iterates from greatest to least key
    pub fn is_descending(&self) -> bool {
        self.window.is_descending()
    }

    /// Check whether `key` falls inside the view's bounds
    pub fn in_range(&self, key: K) -> bool {
        self.window.in_range(self.map, key)
    }

    /// Number of mappings in range (walks the range)
    pub fn len(&self) -> usize {
        self.as_view().len()
    }

    /// Check whether no mapping falls in range
    pub fn is_empty(&self) -> bool {
        self.as_view().is_empty()
    }

    /// Look up `key`, returning `None` when absent or out of range
    pub fn get_opt(&self, key: K) -> Option<V> {
        self.as_view().get_opt(key)
    }

    /// Check whether `key` is mapped and in range
    pub fn contains_key(&self, key: K) -> bool {
        self.get_opt(key).is_some()
    }

    /// Mutable access to the value of an in-range key
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        if !self.in_range(key) {
            return None;
        }
        let n = self.map.find(key);
        if n == NIL {
            return None;
        }
        Some(self.map.tree.value_mut(n))
    }

    /// Iterate over the mappings in range, in view order
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.window.iter(self.map)
    }

    /// Iterate over the keys in range, in view order
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Iterate over the values in range, in view order
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Insert or overwrite a mapping inside the range
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        if !self.in_range(key) {
            return Err(PrimError::key_out_of_range(format!(
                "key {:?} lies outside the view's range",
                key
            )));
        }
        Ok(self.map.insert_entry(key, value))
    }

    /// Remove an in-range key, returning its value
    pub fn remove_opt(&mut self, key: K) -> Option<V> {
        if !self.in_range(key) {
            return None;
        }
        self.map.remove_key(key)
    }

    /// Remove every mapping in range from the underlying map
    pub fn clear(&mut self) {
        while self.poll_first_entry().is_some() {}
    }

    /// Remove and return the first mapping in view order
    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        let n = self.window.first(self.map);
        (n != NIL).then(|| self.map.remove_node(n))
    }

    /// Remove and return the last mapping in view order
    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        let n = self.window.last(self.map);
        (n != NIL).then(|| self.map.remove_node(n))
    }

    /// Nested mutable view over `from..to`, bounds given in this view's direction
    pub fn sub_map_mut(
        &mut self,
        from: K,
        from_inclusive: bool,
        to: K,
        to_inclusive: bool,
    ) -> Result<SubMapMut<'_, K, V, B, C>> {
        let window = self
            .window
            .sub_window(self.map, from, from_inclusive, to, to_inclusive)?;
        Ok(SubMapMut::new(self.map, window))
    }

    /// Nested mutable view over the keys before `to`
    pub fn head_map_mut(&mut self, to: K, inclusive: bool) -> Result<SubMapMut<'_, K, V, B, C>> {
        let window = self.window.head_window(self.map, to, inclusive)?;
        Ok(SubMapMut::new(self.map, window))
    }

    /// Nested mutable view over the keys from `from` on
    pub fn tail_map_mut(&mut self, from: K, inclusive: bool) -> Result<SubMapMut<'_, K, V, B, C>> {
        let window = self.window.tail_window(self.map, from, inclusive)?;
        Ok(SubMapMut::new(self.map, window))
    }

    /// The same range traversed in the opposite direction
    pub fn descending_map_mut(&mut self) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(self.map, self.window.reversed())
    }
}

impl<K, V, B, C> SubMapMut<'_, K, V, B, C>
where
    K: Primitive,
    V: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    /// Insert or overwrite a mapping, returning the previous value or the
    /// map's default return value
    pub fn put(&mut self, key: K, value: V) -> Result<V> {
        let default = self.map.default_value;
        Ok(self.insert(key, value)?.unwrap_or(default))
    }

    /// Look up `key`, returning the default return value when absent or out of range
    pub fn get(&self, key: K) -> V {
        self.as_view().get(key)
    }

    /// Remove an in-range key, returning its value or the default return value
    pub fn remove(&mut self, key: K) -> V {
        let default = self.map.default_value;
        self.remove_opt(key).unwrap_or(default)
    }
}

impl<K, V, B, C> NavigableMap<K, V> for SubMapMut<'_, K, V, B, C>
where
    K: Primitive,
    V: Primitive,
    B: Balance,
    C: KeyOrder<K>,
{
    fn default_min_value(&self) -> K {
        self.as_view().default_min_value()
    }

    fn default_max_value(&self) -> K {
        self.as_view().default_max_value()
    }

    fn first_entry(&self) -> Option<(K, V)> {
        self.as_view().first_entry()
    }

    fn last_entry(&self) -> Option<(K, V)> {
        self.as_view().last_entry()
    }

    fn lower_entry(&self, key: K) -> Option<(K, V)> {
        self.as_view().lower_entry(key)
    }

    fn floor_entry(&self, key: K) -> Option<(K, V)> {
        self.as_view().floor_entry(key)
    }

    fn ceiling_entry(&self, key: K) -> Option<(K, V)> {
        self.as_view().ceiling_entry(key)
    }

    fn higher_entry(&self, key: K) -> Option<(K, V)> {
        self.as_view().higher_entry(key)
    }
}

impl<K, V, B, C> fmt::Debug for SubMapMut<'_, K, V, B, C>
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

impl<K, V, B, C> TreeMap<K, V, B, C>
where
    K: Primitive,
    V: Copy + Default,
    B: Balance,
    C: KeyOrder<K>,
{
    /// View of the keys from `from` to `to`
    ///
    /// Fails with [`PrimError::InvalidRange`] when `from` comes after `to`.
    pub fn sub_map(&self, from: K, from_inclusive: bool, to: K, to_inclusive: bool) -> Result<SubMap<'_, K, V, B, C>> {
        let window = Window::full().sub_window(self, from, from_inclusive, to, to_inclusive)?;
        Ok(SubMap::new(self, window))
    }

    /// View of the keys below `to` (or up to it when `inclusive`)
    pub fn head_map(&self, to: K, inclusive: bool) -> SubMap<'_, K, V, B, C> {
        SubMap::new(self, Window::head_of_full(to, inclusive))
    }

    /// View of the keys above `from` (or from it on when `inclusive`)
    pub fn tail_map(&self, from: K, inclusive: bool) -> SubMap<'_, K, V, B, C> {
        SubMap::new(self, Window::tail_of_full(from, inclusive))
    }

    /// View of the whole map in descending key order
    pub fn descending_map(&self) -> SubMap<'_, K, V, B, C> {
        SubMap::new(self, Window::full().reversed())
    }

    /// Mutable view of the keys from `from` to `to`
    pub fn sub_map_mut(
        &mut self,
        from: K,
        from_inclusive: bool,
        to: K,
        to_inclusive: bool,
    ) -> Result<SubMapMut<'_, K, V, B, C>> {
        let window = Window::full().sub_window(self, from, from_inclusive, to, to_inclusive)?;
        Ok(SubMapMut::new(self, window))
    }

    /// Mutable view of the keys below `to` (or up to it when `inclusive`)
    pub fn head_map_mut(&mut self, to: K, inclusive: bool) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(self, Window::head_of_full(to, inclusive))
    }

    /// Mutable view of the keys above `from` (or from it on when `inclusive`)
    pub fn tail_map_mut(&mut self, from: K, inclusive: bool) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(self, Window::tail_of_full(from, inclusive))
    }

    /// Mutable view of the whole map in descending key order
    pub fn descending_map_mut(&mut self) -> SubMapMut<'_, K, V, B, C> {
        SubMapMut::new(self, Window::full().reversed())
    }
}
