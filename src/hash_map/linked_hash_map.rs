//! Insertion-ordered overlay for the open hash table
//!
//! [`InsertionOrder`] threads a doubly-linked list through the slots of the
//! table. The list is updated whenever the table links, unlinks or relocates
//! an entry, so backward-shift deletion and rehashing keep the logical order
//! intact. Iteration walks the links and never scans the arrays.

use crate::error::{PrimError, Result};
use crate::hash_map::hash_set::LinkedPrimHashSet;
use crate::hash_map::open_hash_map::LinkedPrimHashMap;
use crate::hash_map::strategy::HashStrategy;
use crate::hash_map::table::{RawTable, SlotOrder, NIL};
use crate::primitive::Primitive;
use crate::traits::DefaultReturnValue;

const NO_LINK: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: u32,
    next: u32,
}

const UNLINKED: Link = Link { prev: NO_LINK, next: NO_LINK };

#[inline]
fn to_pos(link: u32) -> usize {
    if link == NO_LINK {
        NIL
    } else {
        link as usize
    }
}

/// Slot order following insertion and explicit reordering
///
/// Slot indices are stored as `u32`; tables never exceed `2^30 + 1` slots.
#[derive(Debug, Clone)]
pub struct InsertionOrder {
    links: Vec<Link>,
    first: u32,
    last: u32,
}

impl SlotOrder for InsertionOrder {
    const ORDERED: bool = true;

    fn with_slots(slots: usize) -> Self {
        Self {
            links: vec![UNLINKED; slots],
            first: NO_LINK,
            last: NO_LINK,
        }
    }

    fn clear(&mut self) {
        self.links.fill(UNLINKED);
        self.first = NO_LINK;
        self.last = NO_LINK;
    }

    fn push_back(&mut self, pos: usize) {
        let slot = pos as u32;
        self.links[pos] = Link { prev: self.last, next: NO_LINK };
        if self.last == NO_LINK {
            self.first = slot;
        } else {
            self.links[self.last as usize].next = slot;
        }
        self.last = slot;
    }

    fn push_front(&mut self, pos: usize) {
        let slot = pos as u32;
        self.links[pos] = Link { prev: NO_LINK, next: self.first };
        if self.first == NO_LINK {
            self.last = slot;
        } else {
            self.links[self.first as usize].prev = slot;
        }
        self.first = slot;
    }

    fn unlink(&mut self, pos: usize) {
        let Link { prev, next } = self.links[pos];
        if prev == NO_LINK {
            self.first = next;
        } else {
            self.links[prev as usize].next = next;
        }
        if next == NO_LINK {
            self.last = prev;
        } else {
            self.links[next as usize].prev = prev;
        }
        self.links[pos] = UNLINKED;
    }

    fn relocate(&mut self, from: usize, to: usize) {
        let link = self.links[from];
        let slot = to as u32;
        if link.prev == NO_LINK {
            self.first = slot;
        } else {
            self.links[link.prev as usize].next = slot;
        }
        if link.next == NO_LINK {
            self.last = slot;
        } else {
            self.links[link.next as usize].prev = slot;
        }
        self.links[to] = link;
        self.links[from] = UNLINKED;
    }

    #[inline]
    fn first(&self) -> usize {
        to_pos(self.first)
    }

    #[inline]
    fn last(&self) -> usize {
        to_pos(self.last)
    }

    #[inline]
    fn next(&self, pos: usize) -> usize {
        to_pos(self.links[pos].next)
    }

    #[inline]
    fn prev(&self, pos: usize) -> usize {
        to_pos(self.links[pos].prev)
    }
}

impl<K, V, S> LinkedPrimHashMap<K, V, S>
where
    K: Primitive,
    V: Primitive,
    S: HashStrategy<K>,
{
    fn put_and_move(&mut self, key: K, value: V, front: bool) -> V {
        match self.table.find(key) {
            Some(pos) => {
                if front {
                    self.table.move_to_front(pos);
                } else {
                    self.table.move_to_back(pos);
                }
                std::mem::replace(self.table.value_mut(pos), value)
            }
            None => {
                self.table.insert_new(key, value, front);
                self.default_return_value()
            }
        }
    }

    /// Insert or overwrite `key` and make it the first entry
    ///
    /// Returns the previous value or the default return value.
    pub fn put_and_move_to_first(&mut self, key: K, value: V) -> V {
        self.put_and_move(key, value, true)
    }

    /// Insert or overwrite `key` and make it the last entry
    pub fn put_and_move_to_last(&mut self, key: K, value: V) -> V {
        self.put_and_move(key, value, false)
    }

    /// Make `key` the first entry; returns whether it was present
    pub fn move_to_first(&mut self, key: K) -> bool {
        match self.table.find(key) {
            Some(pos) => {
                self.table.move_to_front(pos);
                true
            }
            None => false,
        }
    }

    /// Make `key` the last entry; returns whether it was present
    pub fn move_to_last(&mut self, key: K) -> bool {
        match self.table.find(key) {
            Some(pos) => {
                self.table.move_to_back(pos);
                true
            }
            None => false,
        }
    }

    /// Look up `key` and make it the first entry
    pub fn get_and_move_to_first(&mut self, key: K) -> V {
        match self.table.find(key) {
            Some(pos) => {
                self.table.move_to_front(pos);
                self.table.value_at(pos)
            }
            None => self.default_return_value(),
        }
    }

    /// Look up `key` and make it the last entry
    pub fn get_and_move_to_last(&mut self, key: K) -> V {
        match self.table.find(key) {
            Some(pos) => {
                self.table.move_to_back(pos);
                self.table.value_at(pos)
            }
            None => self.default_return_value(),
        }
    }

    fn entry_at(&self, pos: usize) -> Option<(K, V)> {
        (pos != NIL).then(|| (self.table.key_at(pos), self.table.value_at(pos)))
    }

    /// First entry in iteration order
    pub fn first_entry(&self) -> Option<(K, V)> {
        self.entry_at(self.table.first_pos())
    }

    /// Last entry in iteration order
    pub fn last_entry(&self) -> Option<(K, V)> {
        self.entry_at(self.table.last_pos())
    }

    /// First key in iteration order
    pub fn first_key(&self) -> Option<K> {
        self.first_entry().map(|(k, _)| k)
    }

    /// Last key in iteration order
    pub fn last_key(&self) -> Option<K> {
        self.last_entry().map(|(k, _)| k)
    }

    /// Value of the first entry
    pub fn first_value(&self) -> Option<V> {
        self.first_entry().map(|(_, v)| v)
    }

    /// Value of the last entry
    pub fn last_value(&self) -> Option<V> {
        self.last_entry().map(|(_, v)| v)
    }

    fn poll_at(&mut self, pos: usize) -> Option<(K, V)> {
        if pos == NIL {
            return None;
        }
        let key = self.table.key_at(pos);
        Some((key, self.table.remove_slot(pos)))
    }

    /// Remove and return the first entry
    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        self.poll_at(self.table.first_pos())
    }

    /// Remove and return the last entry
    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        self.poll_at(self.table.last_pos())
    }

    /// Remove the first entry, returning its key
    pub fn poll_first_key(&mut self) -> Option<K> {
        self.poll_first_entry().map(|(k, _)| k)
    }

    /// Remove the last entry, returning its key
    pub fn poll_last_key(&mut self) -> Option<K> {
        self.poll_last_entry().map(|(k, _)| k)
    }

    /// Open a detached cursor positioned before the first entry
    pub fn cursor(&self) -> LinkedCursor<K> {
        LinkedCursor::new(&self.table)
    }

    /// Open a detached cursor positioned just after `key`
    ///
    /// `previous` returns `key` itself and `next` returns its successor.
    pub fn cursor_at(&self, key: K) -> Result<LinkedCursor<K>> {
        LinkedCursor::starting_at(&self.table, key)
    }
}

/// Bidirectional, detached, fail-fast cursor over a linked table
///
/// The cursor remembers the keys around its position rather than slot
/// indices, so it survives the slot moves caused by its own removals.
#[derive(Debug, Clone)]
pub struct LinkedCursor<K> {
    expected_mod_count: u64,
    next: Option<K>,
    prev: Option<K>,
    last: Option<K>,
}

impl<K: Primitive> LinkedCursor<K> {
    pub(crate) fn new<V, S>(table: &RawTable<K, V, S, InsertionOrder>) -> Self
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        let first = table.first_pos();
        Self {
            expected_mod_count: table.mod_count(),
            next: (first != NIL).then(|| table.key_at(first)),
            prev: None,
            last: None,
        }
    }

    pub(crate) fn starting_at<V, S>(table: &RawTable<K, V, S, InsertionOrder>, key: K) -> Result<Self>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        let pos = table
            .find(key)
            .ok_or_else(|| PrimError::invalid_argument(format!("key {:?} is not present", key)))?;
        let next = table.next_pos(pos);
        Ok(Self {
            expected_mod_count: table.mod_count(),
            next: (next != NIL).then(|| table.key_at(next)),
            prev: Some(table.key_at(pos)),
            last: None,
        })
    }

    fn check<V, S>(&self, table: &RawTable<K, V, S, InsertionOrder>) -> Result<()>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        let actual = table.mod_count();
        if actual != self.expected_mod_count {
            return Err(PrimError::concurrent_modification(self.expected_mod_count, actual));
        }
        Ok(())
    }

    fn locate<V, S>(table: &RawTable<K, V, S, InsertionOrder>, key: K) -> Result<usize>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        table
            .find(key)
            .ok_or_else(|| PrimError::illegal_state("cursor position is no longer present"))
    }

    fn step_forward<V, S>(&mut self, table: &RawTable<K, V, S, InsertionOrder>) -> Result<Option<usize>>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        self.check(table)?;
        let Some(key) = self.next else {
            return Ok(None);
        };
        let pos = Self::locate(table, key)?;
        let after = table.next_pos(pos);
        self.prev = Some(key);
        self.next = (after != NIL).then(|| table.key_at(after));
        self.last = Some(key);
        Ok(Some(pos))
    }

    fn step_back<V, S>(&mut self, table: &RawTable<K, V, S, InsertionOrder>) -> Result<Option<usize>>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        self.check(table)?;
        let Some(key) = self.prev else {
            return Ok(None);
        };
        let pos = Self::locate(table, key)?;
        let before = table.prev_pos(pos);
        self.next = Some(key);
        self.prev = (before != NIL).then(|| table.key_at(before));
        self.last = Some(key);
        Ok(Some(pos))
    }

    fn remove_last<V, S>(&mut self, table: &mut RawTable<K, V, S, InsertionOrder>) -> Result<V>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        self.check(table)?;
        let key = self
            .last
            .take()
            .ok_or_else(|| PrimError::illegal_state("no current entry to remove"))?;
        let pos = Self::locate(table, key)?;
        let strategy = table.strategy();
        // After `previous`, the removed entry is also the cursor's next entry
        if self.next.is_some_and(|n| strategy.equals(n, key)) {
            let after = table.next_pos(pos);
            self.next = (after != NIL).then(|| table.key_at(after));
        }
        if self.prev.is_some_and(|p| strategy.equals(p, key)) {
            let before = table.prev_pos(pos);
            self.prev = (before != NIL).then(|| table.key_at(before));
        }
        let value = table.remove_slot(pos);
        self.expected_mod_count = table.mod_count();
        Ok(value)
    }

    /// Check whether a following entry exists
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Check whether a preceding entry exists
    pub fn has_previous(&self) -> bool {
        self.prev.is_some()
    }

    /// Advance and return the next entry of `map`
    #[allow(clippy::should_implement_trait)]
    pub fn next<V, S>(&mut self, map: &LinkedPrimHashMap<K, V, S>) -> Result<Option<(K, V)>>
    where
        V: Primitive,
        S: HashStrategy<K>,
    {
        let table = &map.table;
        Ok(self
            .step_forward(table)?
            .map(|pos| (table.key_at(pos), table.value_at(pos))))
    }

    /// Step back and return the previous entry of `map`
    pub fn previous<V, S>(&mut self, map: &LinkedPrimHashMap<K, V, S>) -> Result<Option<(K, V)>>
    where
        V: Primitive,
        S: HashStrategy<K>,
    {
        let table = &map.table;
        Ok(self
            .step_back(table)?
            .map(|pos| (table.key_at(pos), table.value_at(pos))))
    }

    /// Remove the entry returned by the last `next` or `previous`
    pub fn remove<V, S>(&mut self, map: &mut LinkedPrimHashMap<K, V, S>) -> Result<V>
    where
        V: Primitive,
        S: HashStrategy<K>,
    {
        self.remove_last(&mut map.table)
    }

    /// Advance and return the next key of `set`
    pub fn next_key<S: HashStrategy<K>>(&mut self, set: &LinkedPrimHashSet<K, S>) -> Result<Option<K>> {
        let table = &set.table;
        Ok(self.step_forward(table)?.map(|pos| table.key_at(pos)))
    }

    /// Step back and return the previous key of `set`
    pub fn previous_key<S: HashStrategy<K>>(&mut self, set: &LinkedPrimHashSet<K, S>) -> Result<Option<K>> {
        let table = &set.table;
        Ok(self.step_back(table)?.map(|pos| table.key_at(pos)))
    }

    /// Remove the key returned by the last `next_key` or `previous_key`
    pub fn remove_key<S: HashStrategy<K>>(&mut self, set: &mut LinkedPrimHashSet<K, S>) -> Result<()> {
        self.remove_last(&mut set.table)
    }
}
