//! Pluggable hashing and equality for open hash tables
//!
//! A [`HashStrategy`] is injected at construction and used for every probe.
//! The table always passes the strategy's hash through [`mix`] before masking,
//! so strategies do not need to spread low-entropy integer keys themselves.

use crate::primitive::Primitive;
use std::hash::{BuildHasher, Hasher};

/// 2^64 / φ, the multiplicative constant used by [`mix`]
pub const GOLDEN_RATIO_64: u64 = 0x9E37_79B9_7F4A_7C15;

/// Spread the bits of a hash so that masking the low bits is well distributed
#[inline]
pub fn mix(x: u64) -> u64 {
    let mut h = x.wrapping_mul(GOLDEN_RATIO_64);
    h ^= h >> 32;
    h ^ (h >> 16)
}

/// Custom hashing and equality for keys of type `K`
///
/// Keys that are `equals` must produce the same `hash`. The key that is
/// `equals` to `K::ZERO` is stored in the table's dedicated zero-key slot.
pub trait HashStrategy<K>: Clone {
    /// Hash code of `key`
    fn hash(&self, key: K) -> u64;

    /// Whether `a` and `b` denote the same key
    fn equals(&self, a: K, b: K) -> bool;
}

/// Default strategy: bit-exact equality, hash of the raw bit image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitHashStrategy;

impl<K: Primitive> HashStrategy<K> for BitHashStrategy {
    #[inline]
    fn hash(&self, key: K) -> u64 {
        key.raw_bits()
    }

    #[inline]
    fn equals(&self, a: K, b: K) -> bool {
        a.bit_eq(b)
    }
}

/// Randomly keyed strategy backed by AHash
///
/// Each instance draws its own seed, so iteration order differs between maps
/// holding the same keys.
#[derive(Clone)]
pub struct AHashStrategy {
    state: ahash::RandomState,
}

impl AHashStrategy {
    /// Create a strategy with a random seed
    pub fn new() -> Self {
        Self { state: ahash::RandomState::new() }
    }

    /// Create a strategy with fixed seeds, for reproducible layouts
    pub fn with_seeds(k0: u64, k1: u64, k2: u64, k3: u64) -> Self {
        Self { state: ahash::RandomState::with_seeds(k0, k1, k2, k3) }
    }
}

impl Default for AHashStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AHashStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AHashStrategy").finish_non_exhaustive()
    }
}

impl<K: Primitive> HashStrategy<K> for AHashStrategy {
    #[inline]
    fn hash(&self, key: K) -> u64 {
        let mut hasher = self.state.build_hasher();
        hasher.write_u64(key.raw_bits());
        hasher.finish()
    }

    #[inline]
    fn equals(&self, a: K, b: K) -> bool {
        a.bit_eq(b)
    }
}

/// Strategy built from a pair of closures
///
/// ```rust
/// use primkit::hash_map::{FnHashStrategy, HashStrategy};
///
/// // Keys compare by absolute value
/// let abs = FnHashStrategy::new(|k: i32| k.unsigned_abs() as u64, |a: i32, b: i32| a.abs() == b.abs());
/// assert!(HashStrategy::<i32>::equals(&abs, -3, 3));
/// ```
#[derive(Clone, Copy)]
pub struct FnHashStrategy<H, E> {
    hash: H,
    equals: E,
}

impl<H, E> FnHashStrategy<H, E> {
    /// Combine a hash function and an equality predicate
    pub fn new(hash: H, equals: E) -> Self {
        Self { hash, equals }
    }
}

impl<H, E> std::fmt::Debug for FnHashStrategy<H, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHashStrategy").finish_non_exhaustive()
    }
}

impl<K, H, E> HashStrategy<K> for FnHashStrategy<H, E>
where
    H: Fn(K) -> u64 + Clone,
    E: Fn(K, K) -> bool + Clone,
{
    #[inline]
    fn hash(&self, key: K) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn equals(&self, a: K, b: K) -> bool {
        (self.equals)(a, b)
    }
}
