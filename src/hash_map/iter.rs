//! Iteration over open hash tables
//!
//! Three flavours are provided:
//!
//! - borrowing iterators ([`Iter`], [`Keys`], [`Values`], [`IterMut`]): the
//!   borrow checker rejects structural modification while they are alive
//! - [`FastEntries`]: a lending iterator handing out one reused
//!   [`FastEntry`] per step; the entry cannot outlive the step
//! - [`HashCursor`]: a detached cursor that does not borrow the container
//!   between steps and fails fast when the container was structurally
//!   modified behind its back

use crate::error::{PrimError, Result};
use crate::hash_map::strategy::HashStrategy;
use crate::hash_map::table::{RawTable, SlotOrder, Unordered, NIL};
use crate::primitive::Primitive;
use std::iter::FusedIterator;

/// Iterator over `(key, value)` pairs in iteration order
pub struct Iter<'a, K, V, S, L> {
    table: &'a RawTable<K, V, S, L>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, K, V, S, L> Iter<'a, K, V, S, L>
where
    K: Primitive,
    V: Copy + Default,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    pub(crate) fn new(table: &'a RawTable<K, V, S, L>) -> Self {
        Self {
            table,
            front: table.first_pos(),
            back: table.last_pos(),
            remaining: table.len(),
        }
    }
}

impl<K, V, S, L> Iterator for Iter<'_, K, V, S, L>
where
    K: Primitive,
    V: Copy + Default,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = self.table.next_pos(pos);
        }
        Some((self.table.key_at(pos), self.table.value_at(pos)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, S, L> DoubleEndedIterator for Iter<'_, K, V, S, L>
where
    K: Primitive,
    V: Copy + Default,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = self.table.prev_pos(pos);
        }
        Some((self.table.key_at(pos), self.table.value_at(pos)))
    }
}

impl<K, V, S, L> ExactSizeIterator for Iter<'_, K, V, S, L>
where
    K: Primitive,
    V: Copy + Default,
    S: HashStrategy<K>,
    L: SlotOrder,
{
}

impl<K, V, S, L> FusedIterator for Iter<'_, K, V, S, L>
where
    K: Primitive,
    V: Copy + Default,
    S: HashStrategy<K>,
    L: SlotOrder,
{
}

impl<K, V, S, L> Clone for Iter<'_, K, V, S, L> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

macro_rules! projection_iter {
    ($(#[$doc:meta])* $name:ident, $item:ty, |$k:ident, $v:ident| $proj:expr) => {
        $(#[$doc])*
        pub struct $name<'a, K, V, S, L> {
            inner: Iter<'a, K, V, S, L>,
        }

        impl<'a, K, V, S, L> $name<'a, K, V, S, L> {
            pub(crate) fn new(inner: Iter<'a, K, V, S, L>) -> Self {
                Self { inner }
            }
        }

        impl<K, V, S, L> Iterator for $name<'_, K, V, S, L>
        where
            K: Primitive,
            V: Copy + Default,
            S: HashStrategy<K>,
            L: SlotOrder,
        {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.inner.next().map(|($k, $v)| $proj)
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.inner.size_hint()
            }
        }

        impl<K, V, S, L> DoubleEndedIterator for $name<'_, K, V, S, L>
        where
            K: Primitive,
            V: Copy + Default,
            S: HashStrategy<K>,
            L: SlotOrder,
        {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.inner.next_back().map(|($k, $v)| $proj)
            }
        }

        impl<K, V, S, L> ExactSizeIterator for $name<'_, K, V, S, L>
        where
            K: Primitive,
            V: Copy + Default,
            S: HashStrategy<K>,
            L: SlotOrder,
        {
        }

        impl<K, V, S, L> FusedIterator for $name<'_, K, V, S, L>
        where
            K: Primitive,
            V: Copy + Default,
            S: HashStrategy<K>,
            L: SlotOrder,
        {
        }
    };
}

projection_iter!(
    /// Iterator over keys in iteration order
    Keys, K, |k, _v| k
);

projection_iter!(
    /// Iterator over values in iteration order
    Values, V, |_k, v| v
);

/// Iterator over `(key, &mut value)` pairs in slot order
///
/// Slot order is the physical layout of the table; for linked maps it is not
/// the link order. Use [`FastEntries`] to mutate values in iteration order.
pub struct IterMut<'a, K, V> {
    keys: std::iter::Enumerate<std::slice::Iter<'a, K>>,
    values: std::slice::IterMut<'a, V>,
    null_slot: usize,
    contains_null_key: bool,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a mut [V], contains_null_key: bool, len: usize) -> Self {
        Self {
            null_slot: keys.len() - 1,
            keys: keys.iter().enumerate(),
            values: values.iter_mut(),
            contains_null_key,
            remaining: len,
        }
    }
}

impl<'a, K: Primitive, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let (pos, &key) = self.keys.next()?;
            let value = self.values.next()?;
            let used = if pos == self.null_slot {
                self.contains_null_key
            } else {
                !key.is_zero()
            };
            if used {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Primitive, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K: Primitive, V> FusedIterator for IterMut<'_, K, V> {}

/// Reusable mutable entry handed out by [`FastEntries`]
///
/// Valid for a single step: it borrows the iterator, so it cannot be held
/// while the iterator advances.
#[derive(Debug)]
pub struct FastEntry<'e, K, V> {
    key: K,
    value: &'e mut V,
}

impl<'e, K, V> FastEntry<'e, K, V> {
    pub(crate) fn new(key: K, value: &'e mut V) -> Self {
        Self { key, value }
    }
}

impl<K: Copy, V: Copy> FastEntry<'_, K, V> {
    /// Key of the current entry
    #[inline]
    pub fn key(&self) -> K {
        self.key
    }

    /// Value of the current entry
    #[inline]
    pub fn value(&self) -> V {
        *self.value
    }

    /// Overwrite the value in place, returning the old one
    #[inline]
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(self.value, value)
    }
}

/// Lending iterator over mutable entries in iteration order
pub struct FastEntries<'a, K, V, S, L> {
    table: &'a mut RawTable<K, V, S, L>,
    next: usize,
    remaining: usize,
}

impl<'a, K, V, S, L> FastEntries<'a, K, V, S, L>
where
    K: Primitive,
    V: Copy + Default,
    S: HashStrategy<K>,
    L: SlotOrder,
{
    pub(crate) fn new(table: &'a mut RawTable<K, V, S, L>) -> Self {
        Self {
            next: table.first_pos(),
            remaining: table.len(),
            table,
        }
    }

    /// Advance to the next entry
    #[allow(clippy::should_implement_trait)]
    pub fn next_entry(&mut self) -> Option<FastEntry<'_, K, V>> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.next;
        self.remaining -= 1;
        self.next = if self.remaining > 0 { self.table.next_pos(pos) } else { NIL };
        Some(FastEntry {
            key: self.table.key_at(pos),
            value: self.table.value_mut(pos),
        })
    }

    /// Number of entries not yet visited
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Visit every remaining entry
    pub fn for_each<F: FnMut(&mut FastEntry<'_, K, V>)>(mut self, mut f: F) {
        while let Some(mut entry) = self.next_entry() {
            f(&mut entry);
        }
    }
}

/// What the cursor returned last
#[derive(Debug, Clone, Copy)]
enum Last<K> {
    None,
    Slot(usize),
    Wrapped(K),
}

/// Detached, fail-fast cursor over an unordered hash table
///
/// The cursor does not borrow the container; every step takes it as an
/// argument. A structural modification made through the container rather
/// than through [`HashCursor::remove`] makes the next step fail with
/// [`PrimError::ConcurrentModification`].
///
/// Slots are visited from the zero-key slot down to slot 0. Removing through
/// the cursor may shift an unvisited entry from the start of the table into
/// an already visited slot at the end; such entries are remembered and
/// returned after the scan, so every entry is visited exactly once.
#[derive(Debug, Clone)]
pub struct HashCursor<K> {
    expected_mod_count: u64,
    /// Next slot to examine is `pos - 1`
    pos: usize,
    null_pending: bool,
    remaining: usize,
    wrapped: Vec<K>,
    wrapped_next: usize,
    last: Last<K>,
}

impl<K: Primitive> HashCursor<K> {
    pub(crate) fn new<V, S>(table: &RawTable<K, V, S, Unordered>) -> Self
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        let null_pending = table.is_used(table.null_slot());
        Self {
            expected_mod_count: table.mod_count(),
            pos: table.null_slot(),
            null_pending,
            remaining: table.len(),
            wrapped: Vec::new(),
            wrapped_next: 0,
            last: Last::None,
        }
    }

    /// Number of entries not yet returned
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn check<V, S, L>(&self, table: &RawTable<K, V, S, L>) -> Result<()>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
        L: SlotOrder,
    {
        let actual = table.mod_count();
        if actual != self.expected_mod_count {
            return Err(PrimError::concurrent_modification(self.expected_mod_count, actual));
        }
        Ok(())
    }

    pub(crate) fn advance<V, S>(&mut self, table: &RawTable<K, V, S, Unordered>) -> Result<Option<usize>>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        self.check(table)?;
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        if self.null_pending {
            self.null_pending = false;
            self.last = Last::Slot(table.null_slot());
            return Ok(Some(table.null_slot()));
        }
        while self.pos > 0 {
            self.pos -= 1;
            if table.is_used(self.pos) {
                self.last = Last::Slot(self.pos);
                return Ok(Some(self.pos));
            }
        }
        let key = *self
            .wrapped
            .get(self.wrapped_next)
            .ok_or_else(|| PrimError::illegal_state("cursor ran past the last entry"))?;
        self.wrapped_next += 1;
        let pos = table
            .find(key)
            .ok_or_else(|| PrimError::illegal_state("wrapped entry is no longer present"))?;
        self.last = Last::Wrapped(key);
        Ok(Some(pos))
    }

    pub(crate) fn remove_current<V, S>(&mut self, table: &mut RawTable<K, V, S, Unordered>) -> Result<V>
    where
        V: Copy + Default,
        S: HashStrategy<K>,
    {
        self.check(table)?;
        let value = match std::mem::replace(&mut self.last, Last::None) {
            Last::None => return Err(PrimError::illegal_state("no current entry to remove")),
            Last::Slot(pos) => table.remove_at(pos, Some(&mut self.wrapped)),
            Last::Wrapped(key) => table
                .remove_in_place(key)
                .ok_or_else(|| PrimError::illegal_state("current entry is no longer present"))?,
        };
        self.expected_mod_count = table.mod_count();
        Ok(value)
    }
}
