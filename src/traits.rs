//! Shared container contracts
//!
//! [`PrimitiveMap`] is implemented by every map in the crate. Its provided
//! methods express the default-return-value protocol once: a function result
//! equal (bit-exactly) to the container's default return value means
//! "no mapping", so `compute` removes the key, `compute_if_absent` does not
//! insert, and `merge` treats it as a removal.
//!
//! All callbacks run before the container is mutated. A panicking callback
//! therefore unwinds through an unchanged container.

use crate::error::{check_parallel_arrays, check_slice_window, Result};
use crate::primitive::{Numeric, Primitive};

/// Per-instance sentinel returned for missing mappings
pub trait DefaultReturnValue<V: Primitive> {
    /// Current default return value
    fn default_return_value(&self) -> V;

    /// Replace the default return value
    fn set_default_return_value(&mut self, value: V);
}

/// Associative container over primitive keys and values
pub trait PrimitiveMap<K: Primitive, V: Primitive>: DefaultReturnValue<V> {
    /// Number of mappings
    fn len(&self) -> usize;

    /// Look up `key`, returning `None` when absent
    fn get_opt(&self, key: K) -> Option<V>;

    /// Mutable access to the value mapped to `key`
    fn get_mut(&mut self, key: K) -> Option<&mut V>;

    /// Insert or overwrite a mapping, returning the previous value
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Remove `key`, returning its value when it was present
    fn remove_opt(&mut self, key: K) -> Option<V>;

    /// Remove all mappings
    fn clear(&mut self);

    /// Visit every mapping in iteration order
    fn for_each<F: FnMut(K, V)>(&self, f: F);

    /// Keep only the mappings for which `f` returns true
    fn retain<F: FnMut(K, V) -> bool>(&mut self, f: F);

    /// Check whether the map is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up `key`, returning the default return value when absent
    fn get(&self, key: K) -> V {
        self.get_opt(key).unwrap_or_else(|| self.default_return_value())
    }

    /// Check whether `key` has a mapping
    fn contains_key(&self, key: K) -> bool {
        self.get_opt(key).is_some()
    }

    /// Check whether some key maps to `value` (bit-exact comparison)
    fn contains_value(&self, value: V) -> bool {
        let mut found = false;
        self.for_each(|_, v| found |= v.bit_eq(value));
        found
    }

    /// Insert or overwrite a mapping, returning the previous value or the default
    fn put(&mut self, key: K, value: V) -> V {
        self.insert(key, value)
            .unwrap_or_else(|| self.default_return_value())
    }

    /// Remove `key`, returning its value or the default
    fn remove(&mut self, key: K) -> V {
        self.remove_opt(key)
            .unwrap_or_else(|| self.default_return_value())
    }

    /// Look up `key`, returning `default` when absent
    fn get_or_default(&self, key: K, default: V) -> V {
        self.get_opt(key).unwrap_or(default)
    }

    /// Insert only if `key` is absent; returns the existing value or the default
    fn put_if_absent(&mut self, key: K, value: V) -> V {
        match self.get_opt(key) {
            Some(existing) => existing,
            None => {
                self.insert(key, value);
                self.default_return_value()
            }
        }
    }

    /// Remove `key` only when it currently maps to `value`
    fn remove_if_value(&mut self, key: K, value: V) -> bool {
        match self.get_opt(key) {
            Some(current) if current.bit_eq(value) => {
                self.remove_opt(key);
                true
            }
            _ => false,
        }
    }

    /// Overwrite the value of an existing key; returns the old value or the default
    fn replace(&mut self, key: K, value: V) -> V {
        match self.get_mut(key) {
            Some(slot) => std::mem::replace(slot, value),
            None => self.default_return_value(),
        }
    }

    /// Overwrite the value of `key` only when it currently maps to `old`
    fn replace_if_value(&mut self, key: K, old: V, new: V) -> bool {
        match self.get_mut(key) {
            Some(slot) if slot.bit_eq(old) => {
                *slot = new;
                true
            }
            _ => false,
        }
    }

    /// Recompute the mapping of `key` from its current value (or the default)
    ///
    /// A result equal to the default return value removes the key.
    fn compute<F: FnOnce(K, V) -> V>(&mut self, key: K, f: F) -> V {
        let default = self.default_return_value();
        let current = self.get_opt(key);
        let value = f(key, current.unwrap_or(default));
        if value.bit_eq(default) {
            if current.is_some() {
                self.remove_opt(key);
            }
            return default;
        }
        match self.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.insert(key, value);
            }
        }
        value
    }

    /// Insert `f(key)` when `key` is absent; returns the resulting value
    ///
    /// A result equal to the default return value is not inserted.
    fn compute_if_absent<F: FnOnce(K) -> V>(&mut self, key: K, f: F) -> V {
        if let Some(existing) = self.get_opt(key) {
            return existing;
        }
        let value = f(key);
        if !value.bit_eq(self.default_return_value()) {
            self.insert(key, value);
        }
        value
    }

    /// Recompute the value of an existing key; absent keys are left alone
    ///
    /// A result equal to the default return value removes the key.
    fn compute_if_present<F: FnOnce(K, V) -> V>(&mut self, key: K, f: F) -> V {
        let default = self.default_return_value();
        let Some(current) = self.get_opt(key) else {
            return default;
        };
        let value = f(key, current);
        if value.bit_eq(default) {
            self.remove_opt(key);
        } else if let Some(slot) = self.get_mut(key) {
            *slot = value;
        }
        value
    }

    /// Combine `value` with the existing mapping using `f`, or insert it when absent
    ///
    /// A combined result equal to the default return value removes the key.
    fn merge<F: FnOnce(V, V) -> V>(&mut self, key: K, value: V, f: F) -> V {
        let default = self.default_return_value();
        let merged = match self.get_opt(key) {
            None => value,
            Some(current) => f(current, value),
        };
        if merged.bit_eq(default) {
            self.remove_opt(key);
        } else {
            self.insert(key, merged);
        }
        merged
    }

    /// Copy every mapping of `other` into this map
    fn put_all<M: PrimitiveMap<K, V> + ?Sized>(&mut self, other: &M)
    where
        Self: Sized,
    {
        other.for_each(|k, v| {
            self.insert(k, v);
        });
    }

    /// Insert parallel key/value arrays; later duplicates overwrite earlier ones
    fn put_all_arrays(&mut self, keys: &[K], values: &[V]) -> Result<()> {
        check_parallel_arrays(keys.len(), values.len())?;
        for (&k, &v) in keys.iter().zip(values) {
            self.insert(k, v);
        }
        Ok(())
    }

    /// Insert `length` mappings of parallel arrays starting at `offset`
    fn put_all_slices(&mut self, keys: &[K], values: &[V], offset: usize, length: usize) -> Result<()> {
        check_parallel_arrays(keys.len(), values.len())?;
        check_slice_window(offset, length, keys.len())?;
        self.put_all_arrays(&keys[offset..offset + length], &values[offset..offset + length])
    }
}

/// Arithmetic helpers for maps with numeric values
///
/// Implemented for every [`PrimitiveMap`] whose value type is [`Numeric`].
pub trait NumericMap<K: Primitive, V: Numeric>: PrimitiveMap<K, V> {
    /// Add `increment` to the value of `key`
    ///
    /// An absent key is treated as holding the default return value.
    /// Returns the previous value or the default.
    fn add_to(&mut self, key: K, increment: V) -> V {
        let default = self.default_return_value();
        match self.get_mut(key) {
            Some(slot) => {
                let old = *slot;
                *slot = old.plus(increment);
                old
            }
            None => {
                self.insert(key, default.plus(increment));
                default
            }
        }
    }

    /// Subtract `decrement` from the value of an existing key
    ///
    /// When the result reaches the default return value (or passes it in the
    /// direction of the subtraction) the key is removed. Absent keys are left
    /// alone. Returns the previous value or the default.
    fn sub_from(&mut self, key: K, decrement: V) -> V {
        let default = self.default_return_value();
        let Some(old) = self.get_opt(key) else {
            return default;
        };
        let value = old.minus(decrement);
        let reached = if decrement.prim_cmp(V::ZERO).is_lt() {
            value.prim_cmp(default).is_ge()
        } else {
            value.prim_cmp(default).is_le()
        };
        if reached {
            self.remove_opt(key);
        } else if let Some(slot) = self.get_mut(key) {
            *slot = value;
        }
        old
    }
}

impl<K: Primitive, V: Numeric, M: PrimitiveMap<K, V> + ?Sized> NumericMap<K, V> for M {}

/// Ordered navigation shared by tree maps and their range views
///
/// Key lookups that miss return the default min sentinel (`lower`/`floor`)
/// or the default max sentinel (`ceiling`/`higher`); entry lookups return
/// `None`.
pub trait NavigableMap<K: Primitive, V: Primitive> {
    /// Sentinel returned by `lower_key` / `floor_key` misses
    fn default_min_value(&self) -> K;

    /// Sentinel returned by `ceiling_key` / `higher_key` misses
    fn default_max_value(&self) -> K;

    /// Smallest mapping
    fn first_entry(&self) -> Option<(K, V)>;

    /// Largest mapping
    fn last_entry(&self) -> Option<(K, V)>;

    /// Greatest mapping strictly below `key`
    fn lower_entry(&self, key: K) -> Option<(K, V)>;

    /// Greatest mapping at or below `key`
    fn floor_entry(&self, key: K) -> Option<(K, V)>;

    /// Least mapping at or above `key`
    fn ceiling_entry(&self, key: K) -> Option<(K, V)>;

    /// Least mapping strictly above `key`
    fn higher_entry(&self, key: K) -> Option<(K, V)>;

    /// Smallest key
    fn first_key(&self) -> Option<K> {
        self.first_entry().map(|(k, _)| k)
    }

    /// Largest key
    fn last_key(&self) -> Option<K> {
        self.last_entry().map(|(k, _)| k)
    }

    /// Greatest key strictly below `key`, or the default min sentinel
    fn lower_key(&self, key: K) -> K {
        self.lower_entry(key)
            .map_or_else(|| self.default_min_value(), |(k, _)| k)
    }

    /// Greatest key at or below `key`, or the default min sentinel
    fn floor_key(&self, key: K) -> K {
        self.floor_entry(key)
            .map_or_else(|| self.default_min_value(), |(k, _)| k)
    }

    /// Least key at or above `key`, or the default max sentinel
    fn ceiling_key(&self, key: K) -> K {
        self.ceiling_entry(key)
            .map_or_else(|| self.default_max_value(), |(k, _)| k)
    }

    /// Least key strictly above `key`, or the default max sentinel
    fn higher_key(&self, key: K) -> K {
        self.higher_entry(key)
            .map_or_else(|| self.default_max_value(), |(k, _)| k)
    }
}

/// Key-only container over primitive keys
pub trait PrimitiveSet<K: Primitive> {
    /// Number of keys
    fn len(&self) -> usize;

    /// Insert `key`; returns true if it was not present
    fn add(&mut self, key: K) -> bool;

    /// Check membership
    fn contains(&self, key: K) -> bool;

    /// Remove `key`; returns true if it was present
    fn remove(&mut self, key: K) -> bool;

    /// Remove all keys
    fn clear(&mut self);

    /// Visit every key in iteration order
    fn for_each<F: FnMut(K)>(&self, f: F);

    /// Check whether the set is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert every key of `keys`; returns true if any was new
    fn add_all(&mut self, keys: &[K]) -> bool {
        keys.iter().fold(false, |changed, &k| self.add(k) | changed)
    }
}
