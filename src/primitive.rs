//! Primitive element protocol
//!
//! Every container in this crate is generic over key and value types that
//! implement [`Primitive`]. The trait supplies what the engines need without
//! boxing or wrapper objects:
//!
//! - a raw bit image, so equality against the default return value is
//!   bit-exact (`NaN` equals `NaN`, `0.0` differs from `-0.0`)
//! - a natural total order used by tree maps when no comparator is supplied
//! - the reserved zero value the hash table uses as its empty-slot marker
//! - default min/max sentinels returned by tree navigation misses
//!
//! Numeric types additionally implement [`Numeric`], which backs `add_to`
//! and `sub_from`.

use std::cmp::Ordering;
use std::fmt::Debug;

/// A primitive key or value type stored inline in container arrays
pub trait Primitive: Copy + Debug + Default + 'static {
    /// The zero value; reserved as the empty-slot marker in hash tables
    const ZERO: Self;

    /// Smallest value of the type, the default "min" navigation sentinel
    const MIN_VALUE: Self;

    /// Largest value of the type, the default "max" navigation sentinel
    const MAX_VALUE: Self;

    /// Raw bit image of the value, zero-extended to 64 bits
    fn raw_bits(self) -> u64;

    /// Natural total order of the type
    fn prim_cmp(self, other: Self) -> Ordering;

    /// Bit-exact equality
    #[inline]
    fn bit_eq(self, other: Self) -> bool {
        self.raw_bits() == other.raw_bits()
    }

    /// Check whether this is the reserved zero value
    #[inline]
    fn is_zero(self) -> bool {
        self.raw_bits() == 0
    }
}

/// Primitive types supporting the arithmetic used by `add_to` / `sub_from`
///
/// Integer arithmetic wraps on overflow; floating point follows IEEE-754.
pub trait Numeric: Primitive {
    /// `self + rhs`
    fn plus(self, rhs: Self) -> Self;

    /// `self - rhs`
    fn minus(self, rhs: Self) -> Self;
}

macro_rules! impl_integer {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl Primitive for $t {
                const ZERO: Self = 0;
                const MIN_VALUE: Self = <$t>::MIN;
                const MAX_VALUE: Self = <$t>::MAX;

                #[inline]
                fn raw_bits(self) -> u64 {
                    self as $u as u64
                }

                #[inline]
                fn prim_cmp(self, other: Self) -> Ordering {
                    self.cmp(&other)
                }
            }

            impl Numeric for $t {
                #[inline]
                fn plus(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn minus(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }
            }
        )*
    };
}

impl_integer! {
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    isize => usize,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    usize => usize,
}

macro_rules! impl_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Primitive for $t {
                const ZERO: Self = 0.0;
                const MIN_VALUE: Self = <$t>::MIN;
                const MAX_VALUE: Self = <$t>::MAX;

                #[inline]
                fn raw_bits(self) -> u64 {
                    self.to_bits() as u64
                }

                #[inline]
                fn prim_cmp(self, other: Self) -> Ordering {
                    self.total_cmp(&other)
                }
            }

            impl Numeric for $t {
                #[inline]
                fn plus(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn minus(self, rhs: Self) -> Self {
                    self - rhs
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl Primitive for char {
    const ZERO: Self = '\0';
    const MIN_VALUE: Self = '\0';
    const MAX_VALUE: Self = char::MAX;

    #[inline]
    fn raw_bits(self) -> u64 {
        self as u64
    }

    #[inline]
    fn prim_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }
}

impl Primitive for bool {
    const ZERO: Self = false;
    const MIN_VALUE: Self = false;
    const MAX_VALUE: Self = true;

    #[inline]
    fn raw_bits(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn prim_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_bit_equality() {
        assert!(f64::NAN.bit_eq(f64::NAN));
        assert!(!0.0f64.bit_eq(-0.0));
        assert!(0.0f32.is_zero());
        assert!(!(-0.0f32).is_zero());
    }

    #[test]
    fn test_signed_bits_do_not_collide() {
        assert_ne!((-1i32).raw_bits(), (-1i64).raw_bits());
        assert_eq!((-1i8).raw_bits(), 0xFF);
        assert!(0i16.is_zero());
    }

    #[test]
    fn test_natural_order() {
        assert_eq!(3i32.prim_cmp(5), Ordering::Less);
        assert_eq!((-0.0f64).prim_cmp(0.0), Ordering::Less);
        assert_eq!(f64::NAN.prim_cmp(f64::INFINITY), Ordering::Greater);
        assert_eq!('b'.prim_cmp('a'), Ordering::Greater);
        assert_eq!(true.prim_cmp(false), Ordering::Greater);
    }

    #[test]
    fn test_numeric_wraps() {
        assert_eq!(i8::MAX.plus(1), i8::MIN);
        assert_eq!(0u32.minus(1), u32::MAX);
        assert_eq!(1.5f64.plus(2.0), 3.5);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(<i32 as Primitive>::MIN_VALUE, i32::MIN);
        assert_eq!(<u64 as Primitive>::MAX_VALUE, u64::MAX);
        assert_eq!(<f32 as Primitive>::MIN_VALUE, f32::MIN);
    }
}
