//! Iteration over tree maps and their range views

use crate::error::{PrimError, Result};
use crate::hash_map::FastEntry;
use crate::primitive::Primitive;
use crate::tree_map::node::{Arena, Balance, NIL};
use crate::tree_map::order::KeyOrder;
use crate::tree_map::sorted_map::TreeMap;
use crate::tree_map::tree_set::TreeSet;
use std::iter::FusedIterator;

/// In-order iterator over `(key, value)` pairs of a tree or a range of it
pub struct Iter<'a, K, V> {
    tree: &'a Arena<K, V>,
    front: u32,
    back: u32,
    descending: bool,
}

impl<'a, K: Copy, V: Copy> Iter<'a, K, V> {
    /// Iterate the nodes from `first` to `last` inclusive (both or neither NIL)
    pub(crate) fn between(tree: &'a Arena<K, V>, first: u32, last: u32, descending: bool) -> Self {
        if first == NIL || last == NIL {
            return Self { tree, front: NIL, back: NIL, descending };
        }
        Self { tree, front: first, back: last, descending }
    }

    fn take_front(&mut self) -> Option<(K, V)> {
        if self.front == NIL {
            return None;
        }
        let n = self.front;
        if n == self.back {
            self.front = NIL;
            self.back = NIL;
        } else {
            self.front = self.tree.successor(n);
        }
        Some(self.tree.entry(n))
    }

    fn take_back(&mut self) -> Option<(K, V)> {
        if self.back == NIL {
            return None;
        }
        let n = self.back;
        if n == self.front {
            self.front = NIL;
            self.back = NIL;
        } else {
            self.back = self.tree.predecessor(n);
        }
        Some(self.tree.entry(n))
    }
}

impl<K: Copy, V: Copy> Iterator for Iter<'_, K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.descending {
            self.take_back()
        } else {
            self.take_front()
        }
    }
}

impl<K: Copy, V: Copy> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.descending {
            self.take_front()
        } else {
            self.take_back()
        }
    }
}

impl<K: Copy, V: Copy> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            descending: self.descending,
        }
    }
}

/// Iterator over keys in tree order
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<K: Copy, V: Copy> Iterator for Keys<'_, K, V> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K: Copy, V: Copy> DoubleEndedIterator for Keys<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K: Copy, V: Copy> FusedIterator for Keys<'_, K, V> {}

/// Iterator over values in key order
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<K: Copy, V: Copy> Iterator for Values<'_, K, V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K: Copy, V: Copy> DoubleEndedIterator for Values<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K: Copy, V: Copy> FusedIterator for Values<'_, K, V> {}

/// Lending iterator over mutable entries in key order
pub struct FastEntries<'a, K, V> {
    tree: &'a mut Arena<K, V>,
    next: u32,
}

impl<'a, K: Copy, V: Copy> FastEntries<'a, K, V> {
    pub(crate) fn new(tree: &'a mut Arena<K, V>) -> Self {
        let next = tree.first();
        Self { tree, next }
    }

    /// Advance to the next entry
    pub fn next_entry(&mut self) -> Option<FastEntry<'_, K, V>> {
        if self.next == NIL {
            return None;
        }
        let n = self.next;
        self.next = self.tree.successor(n);
        let key = self.tree.key(n);
        Some(FastEntry::new(key, self.tree.value_mut(n)))
    }
}

/// Detached, fail-fast cursor walking a tree map in key order
///
/// Removing through the cursor keeps it valid; any other structural
/// modification makes the next step fail with `ConcurrentModification`.
#[derive(Debug, Clone)]
pub struct TreeCursor {
    expected_mod_count: u64,
    next: u32,
    last: u32,
}

impl TreeCursor {
    pub(crate) fn new(first: u32, mod_count: u64) -> Self {
        Self {
            expected_mod_count: mod_count,
            next: first,
            last: NIL,
        }
    }

    /// Check whether another entry follows
    pub fn has_next(&self) -> bool {
        self.next != NIL
    }

    fn check(&self, actual: u64) -> Result<()> {
        if actual != self.expected_mod_count {
            return Err(PrimError::concurrent_modification(self.expected_mod_count, actual));
        }
        Ok(())
    }

    fn step<K: Copy, V: Copy>(&mut self, tree: &Arena<K, V>, mod_count: u64) -> Result<Option<u32>> {
        self.check(mod_count)?;
        if self.next == NIL {
            return Ok(None);
        }
        let n = self.next;
        self.last = n;
        self.next = tree.successor(n);
        Ok(Some(n))
    }

    fn remove_last<K, V, B, C>(&mut self, map: &mut TreeMap<K, V, B, C>) -> Result<V>
    where
        K: Primitive,
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        self.check(map.mod_count())?;
        if self.last == NIL {
            return Err(PrimError::illegal_state("no current entry to remove"));
        }
        // A node with two children takes over its successor's entry, which
        // is exactly the entry this cursor returns next
        if map.tree.left(self.last) != NIL && map.tree.right(self.last) != NIL {
            self.next = self.last;
        }
        let (_, value) = map.remove_node(self.last);
        self.last = NIL;
        self.expected_mod_count = map.mod_count();
        Ok(value)
    }

    /// Advance and return the next entry of `map`
    #[allow(clippy::should_implement_trait)]
    pub fn next<K, V, B, C>(&mut self, map: &TreeMap<K, V, B, C>) -> Result<Option<(K, V)>>
    where
        K: Primitive,
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        Ok(self.step(&map.tree, map.mod_count())?.map(|n| map.tree.entry(n)))
    }

    /// Remove the entry returned by the last call to [`TreeCursor::next`]
    pub fn remove<K, V, B, C>(&mut self, map: &mut TreeMap<K, V, B, C>) -> Result<V>
    where
        K: Primitive,
        V: Copy + Default,
        B: Balance,
        C: KeyOrder<K>,
    {
        self.remove_last(map)
    }

    /// Advance and return the next key of `set`
    pub fn next_key<K, B, C>(&mut self, set: &TreeSet<K, B, C>) -> Result<Option<K>>
    where
        K: Primitive,
        B: Balance,
        C: KeyOrder<K>,
    {
        let map = &set.map;
        Ok(self.step(&map.tree, map.mod_count())?.map(|n| map.tree.key(n)))
    }

    /// Remove the key returned by the last call to [`TreeCursor::next_key`]
    pub fn remove_key<K, B, C>(&mut self, set: &mut TreeSet<K, B, C>) -> Result<()>
    where
        K: Primitive,
        B: Balance,
        C: KeyOrder<K>,
    {
        self.remove_last(&mut set.map)
    }
}
