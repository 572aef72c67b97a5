//! Balanced tree maps and sets over primitive keys
//!
//! This module provides:
//! - `AvlTreeMap` / `RbTreeMap`: sorted maps balanced by AVL heights or
//!   red/black colours, sharing one [`TreeMap`] engine
//! - `SubMap` / `SubMapMut`: live range and descending views
//! - `AvlTreeSet` / `RbTreeSet`: key-only sorted sets
//!
//! Nodes live in an index-addressed arena, so the trees hold no pointers
//! and clone with a single allocation per buffer. Key order is pluggable via
//! [`KeyOrder`]; [`NaturalOrder`] sorts floats by `total_cmp`.

mod avl;
mod iter;
mod node;
mod order;
mod red_black;
mod sorted_map;
mod sub_map;
mod tree_set;

pub use avl::Avl;
pub use iter::{FastEntries, Iter, Keys, TreeCursor, Values};
pub use node::Balance;
pub use order::{KeyOrder, NaturalOrder};
pub use red_black::RedBlack;
pub use sorted_map::{AvlTreeMap, RbTreeMap, TreeMap};
pub use sub_map::{SubMap, SubMapMut};
pub use tree_set::{AvlTreeSet, RbTreeSet, TreeSet};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{NavigableMap, PrimitiveMap, PrimitiveSet};

    #[test]
    fn test_module_exports() {
        let mut avl = AvlTreeMap::<i32, i32>::new();
        avl.put(2, 20);
        assert_eq!(avl.first_key(), Some(2));

        let mut rb = RbTreeMap::<u64, f32>::new();
        rb.put(9, 1.5);
        assert_eq!(rb.get(9), 1.5);

        let mut set = AvlTreeSet::<char>::new();
        assert!(set.add('z'));
        let mut rb_set = RbTreeSet::<i16>::new();
        assert!(rb_set.add(-4));

        let view: SubMap<'_, i32, i32, Avl> = avl.head_map(10, true);
        assert_eq!(view.len(), 1);
    }
}
