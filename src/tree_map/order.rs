//! Key comparators for tree maps

use crate::primitive::Primitive;
use std::cmp::Ordering;

/// Total order over keys used by tree maps
///
/// Any `Fn(K, K) -> Ordering + Clone` closure is a key order:
///
/// ```rust
/// use primkit::tree_map::AvlTreeMap;
/// use primkit::traits::{NavigableMap, PrimitiveMap};
///
/// // Largest key first
/// let mut map = AvlTreeMap::<i32, i32, _>::with_order(|a: i32, b: i32| b.cmp(&a));
/// map.put(1, 1);
/// map.put(5, 5);
/// assert_eq!(map.first_key(), Some(5));
/// ```
pub trait KeyOrder<K>: Clone {
    /// Compare two keys
    fn compare(&self, a: K, b: K) -> Ordering;
}

/// Natural order of the key type, see [`Primitive::prim_cmp`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Primitive> KeyOrder<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: K, b: K) -> Ordering {
        a.prim_cmp(b)
    }
}

impl<K, F> KeyOrder<K> for F
where
    F: Fn(K, K) -> Ordering + Clone,
{
    #[inline]
    fn compare(&self, a: K, b: K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(KeyOrder::<i32>::compare(&NaturalOrder, 1, 2), Ordering::Less);
        assert_eq!(KeyOrder::<f64>::compare(&NaturalOrder, -0.0, 0.0), Ordering::Less);
    }

    #[test]
    fn test_closure_order() {
        let reversed = |a: u8, b: u8| b.cmp(&a);
        assert_eq!(reversed.compare(1, 2), Ordering::Greater);
    }
}
