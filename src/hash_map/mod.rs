//! Open-addressing hash maps and sets over primitive keys
//!
//! This module provides one table engine and the containers built on it:
//! - `PrimHashMap`: unordered map, linear probing with backward-shift deletion
//! - `LinkedPrimHashMap`: insertion-ordered map with O(1) reordering and
//!   polling at both ends
//! - `PrimHashSet` / `LinkedPrimHashSet`: key-only counterparts
//!
//! Hashing is pluggable through [`HashStrategy`]; the default
//! [`BitHashStrategy`] compares keys bit for bit.

mod hash_set;
mod iter;
mod linked_hash_map;
mod open_hash_map;
mod strategy;
mod table;

pub use hash_set::{LinkedPrimHashSet, OpenHashSet, PrimHashSet, SetIter};
pub use iter::{FastEntries, FastEntry, HashCursor, Iter, IterMut, Keys, Values};
pub use linked_hash_map::{InsertionOrder, LinkedCursor};
pub use open_hash_map::{LinkedPrimHashMap, OpenHashMap, PrimHashMap};
pub use strategy::{mix, AHashStrategy, BitHashStrategy, FnHashStrategy, HashStrategy, GOLDEN_RATIO_64};
pub use table::{
    SlotOrder, Unordered, DEFAULT_INITIAL_SIZE, DEFAULT_LOAD_FACTOR, FAST_LOAD_FACTOR,
    MAX_TABLE_SIZE, NIL, VERY_FAST_LOAD_FACTOR,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{PrimitiveMap, PrimitiveSet};

    #[test]
    fn test_module_exports() {
        let mut map = PrimHashMap::<i32, f64>::new();
        map.put(1, 2.5);
        assert_eq!(map.get(1), 2.5);

        let mut linked = LinkedPrimHashMap::<u8, u8>::new();
        linked.put(1, 1);
        assert_eq!(linked.first_key(), Some(1));

        let mut set = PrimHashSet::<char>::new();
        assert!(set.add('a'));
        let mut linked_set = LinkedPrimHashSet::<i16>::new();
        assert!(linked_set.add(3));

        let mut seeded = PrimHashMap::<u64, u64, AHashStrategy>::with_strategy(AHashStrategy::with_seeds(1, 2, 3, 4));
        seeded.put(7, 8);
        assert_eq!(seeded.get(7), 8);

        assert_eq!(DEFAULT_INITIAL_SIZE, 16);
        assert!(FAST_LOAD_FACTOR < DEFAULT_LOAD_FACTOR);
        assert!(VERY_FAST_LOAD_FACTOR < FAST_LOAD_FACTOR);
    }
}
