//! # Primkit: Primitive-Specialized Maps and Sets
//!
//! This crate provides associative containers whose keys and values are
//! primitive scalars, stored unboxed in flat arrays or index-addressed arenas.
//!
//! ## Key Features
//!
//! - **Open-Addressing Hash Maps**: linear probing with backward-shift
//!   deletion, a dedicated slot for the zero key and automatic shrinking
//! - **Linked Hash Maps**: insertion order with O(1) move-to-front/back and
//!   polling at both ends
//! - **Balanced Tree Maps**: AVL and red/black trees with floor/ceiling
//!   navigation, live range views and descending views
//! - **Default Return Values**: every map returns a per-instance sentinel for
//!   missing keys, and `compute`/`merge` treat that sentinel as "remove"
//! - **Fail-Fast Cursors**: detached cursors that survive their own removals
//!   and report concurrent structural modification as an error
//!
//! ## Quick Start
//!
//! ```rust
//! use primkit::prelude::*;
//!
//! // Hash map with a custom miss value
//! let mut counts = PrimHashMap::<i32, i64>::new();
//! counts.set_default_return_value(-1);
//! assert_eq!(counts.get(7), -1);
//! counts.put(7, 3);
//! counts.add_to(7, 2);
//! assert_eq!(counts.get(7), 5);
//!
//! // Insertion-ordered map
//! let mut linked = LinkedPrimHashMap::<i32, i32>::new();
//! for k in [1, 2, 3] {
//!     linked.put(k, k);
//! }
//! linked.move_to_first(3);
//! assert_eq!(linked.keys().collect::<Vec<_>>(), vec![3, 1, 2]);
//!
//! // Sorted map with navigation
//! let mut tree = AvlTreeMap::<i32, i32>::new();
//! for k in [5, 3, 8, 1, 4] {
//!     tree.put(k, k);
//! }
//! assert_eq!(tree.floor_key(6), 5);
//! assert_eq!(tree.ceiling_key(6), 8);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash_map;
pub mod primitive;
pub mod traits;
pub mod tree_map;

// Re-export core types
pub use config::{Config, HashMapConfig};
pub use error::{PrimError, Result};
pub use primitive::{Numeric, Primitive};
pub use traits::{DefaultReturnValue, NavigableMap, NumericMap, PrimitiveMap, PrimitiveSet};

// Re-export hash containers
pub use hash_map::{
    AHashStrategy, BitHashStrategy, HashCursor, HashStrategy, LinkedCursor, LinkedPrimHashMap,
    LinkedPrimHashSet, OpenHashMap, OpenHashSet, PrimHashMap, PrimHashSet,
};

// Re-export tree containers
pub use tree_map::{
    Avl, AvlTreeMap, AvlTreeSet, KeyOrder, NaturalOrder, RbTreeMap, RbTreeSet, RedBlack, SubMap,
    SubMapMut, TreeCursor, TreeMap, TreeSet,
};

/// Commonly used types and traits
pub mod prelude {
    pub use crate::error::{PrimError, Result};
    pub use crate::hash_map::{LinkedPrimHashMap, LinkedPrimHashSet, PrimHashMap, PrimHashSet};
    pub use crate::traits::{DefaultReturnValue, NavigableMap, NumericMap, PrimitiveMap, PrimitiveSet};
    pub use crate::tree_map::{AvlTreeMap, AvlTreeSet, RbTreeMap, RbTreeSet};
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing primkit v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        init();
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_info() {
        assert!(VERSION.contains('.'));
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }

    #[test]
    fn test_re_exports() {
        let mut map = PrimHashMap::<u32, u32>::new();
        map.put(1, 2);
        let tree: AvlTreeMap<u32, u32> = map.iter().collect();
        assert_eq!(tree.first_entry(), Some((1, 2)));

        let err = PrimError::invalid_argument("test");
        assert_eq!(err.category(), "argument");
        assert!(std::any::type_name::<Result<()>>().contains("PrimError"));
    }

    #[test]
    fn test_multiple_init_calls() {
        init();
        init();
    }
}
