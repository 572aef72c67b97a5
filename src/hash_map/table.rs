//! Open-addressing storage engine
//!
//! Keys and values live in two flat arrays of `n + 1` slots where `n` is a
//! power of two. Slots `0..n` form the probed region: a slot whose key is the
//! raw zero value is free. The trailing slot `n` holds the key that the hash
//! strategy considers equal to zero, tracked by `contains_null_key`, so "slot
//! is empty" and "slot holds the zero key" never need to be told apart.
//!
//! Collisions are resolved by linear probing from `mix(hash(key)) & mask`.
//! Deletion uses backward shifting instead of tombstones: after a slot is
//! freed, later entries of the same cluster whose home slot does not lie
//! cyclically between the hole and their own position are moved back into the
//! hole, until a free slot ends the cluster.
//!
//! The table is parameterized over a [`SlotOrder`], which receives a callback
//! for every slot that is linked, unlinked or relocated. [`Unordered`] ignores
//! them; the linked map threads a doubly-linked list through the slots.

use crate::error::{PrimError, Result};
use crate::hash_map::strategy::{mix, HashStrategy};
use crate::primitive::Primitive;
use std::fmt;

/// Default number of expected entries
pub const DEFAULT_INITIAL_SIZE: usize = 16;
/// Default load factor
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;
/// Load factor trading memory for shorter probe sequences
pub const FAST_LOAD_FACTOR: f32 = 0.5;
/// Load factor for tables that are almost never full
pub const VERY_FAST_LOAD_FACTOR: f32 = 0.25;

/// Largest supported probed region
pub const MAX_TABLE_SIZE: usize = 1 << 30;

/// "No slot" marker used by cursors and slot orders
pub const NIL: usize = usize::MAX;

/// Validate a load factor
pub(crate) fn check_load_factor(load_factor: f32) -> Result<()> {
    if load_factor > 0.0 && load_factor <= 1.0 {
        Ok(())
    } else {
        Err(PrimError::invalid_argument(format!(
            "load factor must be in (0, 1], got {}",
            load_factor
        )))
    }
}

/// Size of the probed region for `expected` entries, failing for absurd sizes
pub(crate) fn table_size(expected: usize, load_factor: f32) -> Result<usize> {
    let wanted = (expected as f64 / load_factor as f64).ceil();
    if wanted > MAX_TABLE_SIZE as f64 {
        return Err(PrimError::invalid_argument(format!(
            "too large: {} expected entries with load factor {}",
            expected, load_factor
        )));
    }
    let mut n = (wanted as usize).max(2).next_power_of_two();
    // max_fill keeps one slot free, so a load factor near 1.0 needs one more doubling
    if max_fill(n, load_factor) < expected {
        n *= 2;
        if n > MAX_TABLE_SIZE {
            return Err(PrimError::invalid_argument(format!(
                "too large: {} expected entries with load factor {}",
                expected, load_factor
            )));
        }
    }
    Ok(n)
}

/// Size of the probed region when growing; panics like `Vec` on overflow
fn grow_size(expected: usize, load_factor: f32) -> usize {
    let wanted = (expected as f64 / load_factor as f64).ceil() as usize;
    wanted
        .max(2)
        .checked_next_power_of_two()
        .unwrap_or_else(|| panic!("capacity overflow"))
}

/// Maximum number of entries before a table of `n` slots grows
///
/// Always leaves at least one free slot so probing terminates.
fn max_fill(n: usize, load_factor: f32) -> usize {
    ((n as f64 * load_factor as f64).ceil() as usize).min(n - 1)
}

mod sealed {
    pub trait Sealed {}
}

/// Bookkeeping of slot order threaded through the table
///
/// Sealed: implemented by [`Unordered`] and
/// [`InsertionOrder`](crate::hash_map::InsertionOrder).
pub trait SlotOrder: Clone + fmt::Debug + sealed::Sealed {
    /// Whether iteration follows the links instead of scanning the arrays
    const ORDERED: bool;

    /// Fresh bookkeeping for a table of `slots` slots
    fn with_slots(slots: usize) -> Self;

    /// Forget every link
    fn clear(&mut self);

    /// Append `pos` at the back of the order
    fn push_back(&mut self, pos: usize);

    /// Prepend `pos` at the front of the order
    fn push_front(&mut self, pos: usize);

    /// Remove `pos` from the order
    fn unlink(&mut self, pos: usize);

    /// The entry in slot `from` moved to the free slot `to`
    fn relocate(&mut self, from: usize, to: usize);

    /// First slot in order, or [`NIL`]
    fn first(&self) -> usize;

    /// Last slot in order, or [`NIL`]
    fn last(&self) -> usize;

    /// Successor of `pos`, or [`NIL`]
    fn next(&self, pos: usize) -> usize;

    /// Predecessor of `pos`, or [`NIL`]
    fn prev(&self, pos: usize) -> usize;
}

impl sealed::Sealed for crate::hash_map::InsertionOrder {}

/// No ordering: iteration scans the slot arrays
#[derive(Debug, Clone, Copy, Default)]
pub struct Unordered;

impl sealed::Sealed for Unordered {}

impl SlotOrder for Unordered {
    const ORDERED: bool = false;

    #[inline]
    fn with_slots(_slots: usize) -> Self {
        Unordered
    }
    #[inline]
    fn clear(&mut self) {}
    #[inline]
    fn push_back(&mut self, _pos: usize) {}
    #[inline]
    fn push_front(&mut self, _pos: usize) {}
    #[inline]
    fn unlink(&mut self, _pos: usize) {}
    #[inline]
    fn relocate(&mut self, _from: usize, _to: usize) {}
    #[inline]
    fn first(&self) -> usize {
        NIL
    }
    #[inline]
    fn last(&self) -> usize {
        NIL
    }
    #[inline]
    fn next(&self, _pos: usize) -> usize {
        NIL
    }
    #[inline]
    fn prev(&self, _pos: usize) -> usize {
        NIL
    }
}

/// Open-addressing table shared by every hash map and set
#[derive(Clone)]
pub(crate) struct RawTable<K, V, S, L> {
    keys: Vec<K>,
    values: Vec<V>,
    links: L,
    strategy: S,
    /// Size of the probed region (power of two)
    n: usize,
    mask: usize,
    contains_null_key: bool,
    size: usize,
    max_fill: usize,
    /// Table size requested at construction; automatic shrinking stops here
    min_n: usize,
    load_factor: f32,
    mod_count: u64,
}

impl<K, V, S, L> RawTable<K, V, S, L>
where
    K: Primitive,
    V: Copy + Default,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    pub(crate) fn new(expected: usize, load_factor: f32, strategy: S) -> Result<Self> {
        check_load_factor(load_factor)?;
        let n = table_size(expected, load_factor)?;
        Ok(Self {
            keys: vec![K::ZERO; n + 1],
            values: vec![V::default(); n + 1],
            links: L::with_slots(n + 1),
            strategy,
            n,
            mask: n - 1,
            contains_null_key: false,
            size: 0,
            max_fill: max_fill(n, load_factor),
            min_n: n,
            load_factor,
            mod_count: 0,
        })
    }

    /// Infallible constructor for the default size and load factor
    pub(crate) fn with_defaults(strategy: S) -> Self {
        let n = (DEFAULT_INITIAL_SIZE as f64 / DEFAULT_LOAD_FACTOR as f64)
            .ceil() as usize;
        let n = n.next_power_of_two();
        Self {
            keys: vec![K::ZERO; n + 1],
            values: vec![V::default(); n + 1],
            links: L::with_slots(n + 1),
            strategy,
            n,
            mask: n - 1,
            contains_null_key: false,
            size: 0,
            max_fill: max_fill(n, DEFAULT_LOAD_FACTOR),
            min_n: n,
            load_factor: DEFAULT_LOAD_FACTOR,
            mod_count: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    /// Size of the probed region
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.n
    }

    #[inline]
    pub(crate) fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[inline]
    pub(crate) fn mod_count(&self) -> u64 {
        self.mod_count
    }

    #[inline]
    pub(crate) fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Index of the zero-key slot
    #[inline]
    pub(crate) fn null_slot(&self) -> usize {
        self.n
    }

    #[inline]
    pub(crate) fn key_at(&self, pos: usize) -> K {
        self.keys[pos]
    }

    #[inline]
    pub(crate) fn value_at(&self, pos: usize) -> V {
        self.values[pos]
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, pos: usize) -> &mut V {
        &mut self.values[pos]
    }

    /// Keys, values and occupancy view for slot-order mutable iteration
    pub(crate) fn slots_mut(&mut self) -> (&[K], &mut [V], bool) {
        (&self.keys, &mut self.values, self.contains_null_key)
    }

    #[inline]
    pub(crate) fn is_used(&self, pos: usize) -> bool {
        if pos == self.n {
            self.contains_null_key
        } else {
            !self.keys[pos].is_zero()
        }
    }

    #[inline]
    fn is_null_key(&self, key: K) -> bool {
        self.strategy.equals(key, K::ZERO)
    }

    #[inline]
    fn home_slot(&self, key: K) -> usize {
        (mix(self.strategy.hash(key)) as usize) & self.mask
    }

    /// Slot holding `key`
    pub(crate) fn find(&self, key: K) -> Option<usize> {
        if self.is_null_key(key) {
            return self.contains_null_key.then_some(self.n);
        }
        let mut pos = self.home_slot(key);
        loop {
            let curr = self.keys[pos];
            if curr.is_zero() {
                return None;
            }
            if self.strategy.equals(curr, key) {
                return Some(pos);
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Insert or overwrite; new keys go to the back of the slot order
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.find(key) {
            Some(pos) => Some(std::mem::replace(&mut self.values[pos], value)),
            None => {
                self.insert_new(key, value, false);
                None
            }
        }
    }

    /// Insert a key known to be absent
    pub(crate) fn insert_new(&mut self, key: K, value: V, front: bool) {
        let pos = if self.is_null_key(key) {
            self.contains_null_key = true;
            self.n
        } else {
            self.free_slot_for(key)
        };
        self.keys[pos] = key;
        self.values[pos] = value;
        if front {
            self.links.push_front(pos);
        } else {
            self.links.push_back(pos);
        }
        self.size += 1;
        self.mod_count += 1;
        if self.size > self.max_fill {
            self.rehash(grow_size(self.size + 1, self.load_factor));
        }
    }

    #[inline]
    fn free_slot_for(&self, key: K) -> usize {
        let mut pos = self.home_slot(key);
        while !self.keys[pos].is_zero() {
            pos = (pos + 1) & self.mask;
        }
        pos
    }

    /// Remove `key`, shrinking the table when it becomes sparse
    pub(crate) fn remove(&mut self, key: K) -> Option<V> {
        let pos = self.find(key)?;
        Some(self.remove_slot(pos))
    }

    /// Remove the entry in slot `pos`, shrinking the table when it becomes sparse
    pub(crate) fn remove_slot(&mut self, pos: usize) -> V {
        let value = self.remove_at(pos, None);
        self.shrink_if_sparse();
        value
    }

    /// Remove `key` without resizing, for cursors that hold slot positions
    pub(crate) fn remove_in_place(&mut self, key: K) -> Option<V> {
        let pos = self.find(key)?;
        Some(self.remove_at(pos, None))
    }

    /// Remove the entry in slot `pos`
    ///
    /// Entries that backward shifting moves from below `pos`'s cluster start
    /// (across the end of the table) are reported through `wrapped`.
    pub(crate) fn remove_at(&mut self, pos: usize, wrapped: Option<&mut Vec<K>>) -> V {
        let value = self.values[pos];
        self.links.unlink(pos);
        self.size -= 1;
        self.mod_count += 1;
        if pos == self.n {
            self.contains_null_key = false;
            self.keys[pos] = K::ZERO;
            self.values[pos] = V::default();
        } else {
            self.shift_keys(pos, wrapped);
        }
        value
    }

    fn shift_keys(&mut self, mut pos: usize, mut wrapped: Option<&mut Vec<K>>) {
        loop {
            let last = pos;
            pos = (last + 1) & self.mask;
            let curr = loop {
                let curr = self.keys[pos];
                if curr.is_zero() {
                    self.keys[last] = K::ZERO;
                    self.values[last] = V::default();
                    return;
                }
                let slot = self.home_slot(curr);
                // The entry may fill the hole unless its home lies in (last, pos]
                let movable = if last <= pos {
                    last >= slot || slot > pos
                } else {
                    last >= slot && slot > pos
                };
                if movable {
                    break curr;
                }
                pos = (pos + 1) & self.mask;
            };
            if pos < last {
                if let Some(wrapped) = wrapped.as_deref_mut() {
                    wrapped.push(curr);
                }
            }
            self.keys[last] = curr;
            self.values[last] = self.values[pos];
            self.links.relocate(pos, last);
        }
    }

    fn shrink_if_sparse(&mut self) {
        if self.n > self.min_n
            && self.size < self.max_fill / 4
            && self.n > DEFAULT_INITIAL_SIZE
        {
            self.rehash(self.n / 2);
        }
    }

    /// Remove every entry, keeping the current table size
    pub(crate) fn clear(&mut self) {
        if self.size == 0 {
            return;
        }
        self.size = 0;
        self.contains_null_key = false;
        self.keys.fill(K::ZERO);
        self.values.fill(V::default());
        self.links.clear();
        self.mod_count += 1;
    }

    /// Grow ahead of inserting up to `capacity` entries in total
    pub(crate) fn ensure_capacity(&mut self, capacity: usize) -> Result<()> {
        let needed = table_size(capacity, self.load_factor)?;
        if needed > self.n {
            self.rehash(needed);
        }
        Ok(())
    }

    /// Shrink to the smallest table holding `max(len, expected)` entries
    ///
    /// Returns false only if the table could not be resized.
    pub(crate) fn trim(&mut self, expected: usize) -> bool {
        let Ok(l) = table_size(expected.max(self.size), self.load_factor) else {
            return false;
        };
        if l >= self.n || self.size > max_fill(l, self.load_factor) {
            return true;
        }
        log::trace!("trimming open table from {} to {} slots", self.n, l);
        self.rehash(l);
        true
    }

    /// Move every entry into a table of `new_n` slots, preserving slot order
    fn rehash(&mut self, new_n: usize) {
        log::trace!(
            "rehashing open table from {} to {} slots ({} entries)",
            self.n,
            new_n,
            self.size
        );
        let old_keys = std::mem::replace(&mut self.keys, vec![K::ZERO; new_n + 1]);
        let old_values = std::mem::replace(&mut self.values, vec![V::default(); new_n + 1]);
        let old_links = std::mem::replace(&mut self.links, L::with_slots(new_n + 1));
        let old_n = self.n;
        self.n = new_n;
        self.mask = new_n - 1;
        self.max_fill = max_fill(new_n, self.load_factor);
        self.mod_count += 1;

        if L::ORDERED {
            let mut pos = old_links.first();
            while pos != NIL {
                self.place(old_keys[pos], old_values[pos], pos == old_n);
                pos = old_links.next(pos);
            }
        } else {
            if self.contains_null_key {
                self.place(old_keys[old_n], old_values[old_n], true);
            }
            for pos in (0..old_n).rev() {
                if !old_keys[pos].is_zero() {
                    self.place(old_keys[pos], old_values[pos], false);
                }
            }
        }
    }

    #[inline]
    fn place(&mut self, key: K, value: V, null: bool) {
        let pos = if null { self.n } else { self.free_slot_for(key) };
        self.keys[pos] = key;
        self.values[pos] = value;
        self.links.push_back(pos);
    }

    /// Largest used slot below `from`
    fn scan_down(&self, from: usize) -> usize {
        let mut pos = from;
        while pos > 0 {
            pos -= 1;
            if self.is_used(pos) {
                return pos;
            }
        }
        NIL
    }

    /// Smallest used slot at or above `from`
    fn scan_up(&self, from: usize) -> usize {
        (from..=self.n).find(|&pos| self.is_used(pos)).unwrap_or(NIL)
    }

    /// First slot in iteration order
    ///
    /// Unordered tables iterate the zero-key slot first, then the probed
    /// region from high to low indices.
    pub(crate) fn first_pos(&self) -> usize {
        if L::ORDERED {
            self.links.first()
        } else {
            self.scan_down(self.n + 1)
        }
    }

    /// Last slot in iteration order
    pub(crate) fn last_pos(&self) -> usize {
        if L::ORDERED {
            self.links.last()
        } else {
            self.scan_up(0)
        }
    }

    /// Slot after `pos` in iteration order
    pub(crate) fn next_pos(&self, pos: usize) -> usize {
        if L::ORDERED {
            self.links.next(pos)
        } else {
            self.scan_down(pos)
        }
    }

    /// Slot before `pos` in iteration order
    pub(crate) fn prev_pos(&self, pos: usize) -> usize {
        if L::ORDERED {
            self.links.prev(pos)
        } else {
            self.scan_up(pos + 1)
        }
    }

    /// Relink `pos` at the front of the slot order
    pub(crate) fn move_to_front(&mut self, pos: usize) -> bool {
        if self.links.first() == pos {
            return false;
        }
        self.links.unlink(pos);
        self.links.push_front(pos);
        self.mod_count += 1;
        true
    }

    /// Relink `pos` at the back of the slot order
    pub(crate) fn move_to_back(&mut self, pos: usize) -> bool {
        if self.links.last() == pos {
            return false;
        }
        self.links.unlink(pos);
        self.links.push_back(pos);
        self.mod_count += 1;
        true
    }

    /// Walk every cluster and check that each entry is reachable from its home
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut used = usize::from(self.contains_null_key);
        for pos in 0..self.n {
            let key = self.keys[pos];
            if key.is_zero() {
                continue;
            }
            used += 1;
            let mut probe = self.home_slot(key);
            while probe != pos {
                assert!(!self.keys[probe].is_zero(), "gap before {:?} at slot {}", key, probe);
                probe = (probe + 1) & self.mask;
            }
        }
        assert_eq!(used, self.size);
        assert!(self.size <= self.max_fill);
        assert!(self.n.is_power_of_two());
    }
}

impl<K: fmt::Debug, V, S, L> fmt::Debug for RawTable<K, V, S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawTable")
            .field("size", &self.size)
            .field("capacity", &self.n)
            .field("load_factor", &self.load_factor)
            .field("contains_null_key", &self.contains_null_key)
            .finish_non_exhaustive()
    }
}
